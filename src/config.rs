//! Database connection configuration.
//!
//! Read once at startup from the standard PostgreSQL environment variables:
//! - `PGHOST`: server hostname (default: "localhost")
//! - `PGPORT`: server port (default: 5432)
//! - `PGDATABASE`: database name (required)
//! - `PGUSER`: role name (default: `USER`, then "postgres")
//! - `PGPASSWORD`: password (optional)

use sqlx::postgres::PgConnectOptions;
use std::env;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {var}: {value}")]
    InvalidValue { var: String, value: String },
}

/// Connection parameters for one database.
///
/// Immutable after construction; passed by reference to every tool call so
/// each call can open its own connection.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,
    pub password: Option<String>,
}

impl ConnectionConfig {
    /// Build the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("PGHOST").unwrap_or_else(|_| "localhost".to_string());

        let port = match env::var("PGPORT") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                var: "PGPORT".to_string(),
                value: raw,
            })?,
            Err(_) => 5432,
        };

        let database = env::var("PGDATABASE")
            .map_err(|_| ConfigError::MissingEnvVar("PGDATABASE".to_string()))?;

        let user = env::var("PGUSER")
            .or_else(|_| env::var("USER"))
            .unwrap_or_else(|_| "postgres".to_string());

        let password = env::var("PGPASSWORD").ok();

        Ok(Self {
            host,
            port,
            database,
            user,
            password,
        })
    }

    /// Driver-level connect options for this configuration.
    pub fn pg_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user);

        if let Some(password) = &self.password {
            options = options.password(password);
        }

        options
    }
}
