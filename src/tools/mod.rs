//! The tool surface: one request/response operation per function.
//!
//! Every operation opens its own read-only connection from the
//! configuration, runs its queries, closes the connection and renders the
//! result as text. Query failures propagate immediately; empty result sets
//! are successful responses carrying a "not found" sentence.

use crate::config::ConnectionConfig;
use crate::db::{schema, Database};
use crate::render::{self, Format};
use crate::{diagram, infer};
use anyhow::Result;
use tracing::debug;

/// List all tables and views in a schema
pub async fn list_tables(
    config: &ConnectionConfig,
    schema_name: &str,
    format: Format,
) -> Result<String> {
    let mut db = Database::connect(config).await?;
    let rows = schema::list_tables(db.connection(), schema_name).await?;
    db.close().await?;

    render::table_list(&rows, format)
}

/// Describe the columns of one table
pub async fn get_table_schema(
    config: &ConnectionConfig,
    table_name: &str,
    schema_name: &str,
    format: Format,
) -> Result<String> {
    let mut db = Database::connect(config).await?;
    let rows = schema::table_columns(db.connection(), table_name, schema_name).await?;
    db.close().await?;

    render::table_schema(&rows, format)
}

/// List the indexes of one table
pub async fn get_table_indexes(
    config: &ConnectionConfig,
    table_name: &str,
    schema_name: &str,
    format: Format,
) -> Result<String> {
    let mut db = Database::connect(config).await?;
    let rows = schema::table_indexes(db.connection(), table_name, schema_name).await?;
    db.close().await?;

    render::table_indexes(&rows, format)
}

/// List the declared foreign keys of one table
pub async fn get_foreign_keys(
    config: &ConnectionConfig,
    table_name: &str,
    schema_name: &str,
    format: Format,
) -> Result<String> {
    let mut db = Database::connect(config).await?;
    let rows = schema::table_foreign_keys(db.connection(), table_name, schema_name).await?;
    db.close().await?;

    render::foreign_keys(&rows, format)
}

/// Generate a Mermaid ER diagram for a schema.
///
/// Declared foreign keys come from the catalog; virtual foreign keys are
/// inferred from column-naming conventions over the same snapshot.
pub async fn generate_er_diagram(
    config: &ConnectionConfig,
    schema_name: &str,
    tables: Option<&[String]>,
) -> Result<String> {
    let mut db = Database::connect(config).await?;
    let snapshot = schema::schema_snapshot(db.connection(), schema_name, tables).await?;
    let declared = schema::declared_relationships(db.connection(), schema_name, tables).await?;
    db.close().await?;

    let inferred = infer::virtual_foreign_keys(&snapshot);
    debug!(
        declared = declared.len(),
        inferred = inferred.len(),
        "assembling diagram"
    );

    Ok(diagram::render(
        &snapshot,
        &declared,
        &inferred,
        tables.is_some(),
    ))
}
