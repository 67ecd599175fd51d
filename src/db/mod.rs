pub mod schema;

use crate::config::ConnectionConfig;
use anyhow::{Context, Result};
use sqlx::postgres::PgConnection;
use sqlx::Connection;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to {host}:{port}/{database}: {source}")]
    Connection {
        host: String,
        port: u16,
        database: String,
        #[source]
        source: sqlx::Error,
    },
    #[error("Query failed: {0}")]
    Query(#[from] sqlx::Error),
}

/// Database connection wrapper.
///
/// Each tool call opens one connection, runs its queries sequentially and
/// closes the connection before returning. The session is forced read-only
/// right after connecting, so no query issued through this wrapper can
/// mutate database state.
pub struct Database {
    conn: PgConnection,
}

impl Database {
    /// Open a read-only connection using the given configuration
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        debug!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "connecting"
        );

        let mut conn = PgConnection::connect_with(&config.pg_options())
            .await
            .map_err(|source| DatabaseError::Connection {
                host: config.host.clone(),
                port: config.port,
                database: config.database.clone(),
                source,
            })?;

        // Guard against accidental writes for the lifetime of the session
        sqlx::query("SET default_transaction_read_only = on")
            .execute(&mut conn)
            .await
            .context("Failed to set connection read-only")?;

        Ok(Self { conn })
    }

    /// Get the underlying connection for query execution
    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }

    /// Close the connection, flushing the driver's termination message.
    ///
    /// Dropping a `Database` also releases the socket, so error paths that
    /// never reach this point still free the connection.
    pub async fn close(self) -> Result<()> {
        self.conn.close().await.context("Failed to close connection")
    }
}
