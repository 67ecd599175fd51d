use anyhow::Result;
use clap::{Parser, Subcommand};
use pgscope::config::ConnectionConfig;
use pgscope::render::Format;
use pgscope::tools;

#[derive(Parser)]
#[command(name = "pgscope")]
#[command(about = "A read-only CLI for exploring PostgreSQL schema metadata")]
#[command(
    after_help = "Connection is taken from the PGHOST, PGPORT, PGDATABASE, PGUSER and \
                  PGPASSWORD environment variables; the session is always read-only."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all tables in a schema
    ListTables {
        /// Schema name
        #[arg(long, default_value = "public")]
        schema: String,

        /// Emit rows as JSON instead of a Markdown table
        #[arg(long)]
        json: bool,
    },

    /// Show the columns of a table
    TableSchema {
        /// Table name
        table: String,

        /// Schema name
        #[arg(long, default_value = "public")]
        schema: String,

        /// Emit rows as JSON instead of a Markdown table
        #[arg(long)]
        json: bool,
    },

    /// Show the indexes of a table
    Indexes {
        /// Table name
        table: String,

        /// Schema name
        #[arg(long, default_value = "public")]
        schema: String,

        /// Emit rows as JSON instead of a Markdown table
        #[arg(long)]
        json: bool,
    },

    /// Show the declared foreign keys of a table
    ForeignKeys {
        /// Table name
        table: String,

        /// Schema name
        #[arg(long, default_value = "public")]
        schema: String,

        /// Emit rows as JSON instead of a Markdown table
        #[arg(long)]
        json: bool,
    },

    /// Generate a Mermaid ER diagram for a schema
    ErDiagram {
        /// Schema name
        #[arg(long, default_value = "public")]
        schema: String,

        /// Restrict the diagram to these tables
        #[arg(long, value_delimiter = ',')]
        tables: Option<Vec<String>>,
    },
}

fn format_flag(json: bool) -> Format {
    if json {
        Format::Json
    } else {
        Format::Markdown
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ConnectionConfig::from_env()?;

    let output = match cli.command {
        Commands::ListTables { schema, json } => {
            tools::list_tables(&config, &schema, format_flag(json)).await?
        }
        Commands::TableSchema {
            table,
            schema,
            json,
        } => tools::get_table_schema(&config, &table, &schema, format_flag(json)).await?,
        Commands::Indexes {
            table,
            schema,
            json,
        } => tools::get_table_indexes(&config, &table, &schema, format_flag(json)).await?,
        Commands::ForeignKeys {
            table,
            schema,
            json,
        } => tools::get_foreign_keys(&config, &table, &schema, format_flag(json)).await?,
        Commands::ErDiagram { schema, tables } => {
            tools::generate_er_diagram(&config, &schema, tables.as_deref()).await?
        }
    };

    println!("{output}");
    Ok(())
}
