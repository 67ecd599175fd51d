//! Text rendering for the tabular tools.
//!
//! Each tool result renders either as a Markdown table or, in JSON mode, as
//! a pretty-printed array of the row structs. An empty result set renders a
//! fixed "not found" sentence instead of an empty table; JSON mode keeps
//! the empty array so downstream consumers can parse it.

use crate::types::{ColumnDetail, ForeignKeyInfo, IndexInfo, TableEntry};
use anyhow::{Context, Result};
use serde::Serialize;

/// Output format for tabular tool results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Markdown,
    Json,
}

pub const NO_TABLES: &str = "No tables found.";
pub const TABLE_NOT_FOUND: &str = "Table not found.";
pub const NO_INDEXES: &str = "No indexes found.";
pub const NO_FOREIGN_KEYS: &str = "No foreign keys found.";

fn to_json<T: Serialize>(rows: &[T]) -> Result<String> {
    serde_json::to_string_pretty(rows).context("Failed to serialize rows")
}

/// Render the table listing
pub fn table_list(rows: &[TableEntry], format: Format) -> Result<String> {
    if format == Format::Json {
        return to_json(rows);
    }
    if rows.is_empty() {
        return Ok(NO_TABLES.to_string());
    }

    let mut lines = vec![
        "| table_name | table_type |".to_string(),
        "|------------|------------|".to_string(),
    ];
    for row in rows {
        lines.push(format!("| {} | {} |", row.name, row.kind));
    }
    Ok(lines.join("\n"))
}

/// Render the column details of one table
pub fn table_schema(rows: &[ColumnDetail], format: Format) -> Result<String> {
    if format == Format::Json {
        return to_json(rows);
    }
    if rows.is_empty() {
        return Ok(TABLE_NOT_FOUND.to_string());
    }

    let mut lines = vec![
        "| column_name | data_type | nullable | default | PK | comment |".to_string(),
        "|-------------|-----------|----------|---------|-----|---------|".to_string(),
    ];
    for row in rows {
        lines.push(format!(
            "| {} | {} | {} | {} | {} | {} |",
            row.name,
            row.data_type,
            if row.nullable { "YES" } else { "NO" },
            row.default.as_deref().unwrap_or("-"),
            if row.primary_key { "✓" } else { "" },
            row.comment.as_deref().unwrap_or(""),
        ));
    }
    Ok(lines.join("\n"))
}

/// Render the index listing of one table
pub fn table_indexes(rows: &[IndexInfo], format: Format) -> Result<String> {
    if format == Format::Json {
        return to_json(rows);
    }
    if rows.is_empty() {
        return Ok(NO_INDEXES.to_string());
    }

    let mut lines = vec![
        "| index_name | columns | unique | type | definition |".to_string(),
        "|------------|---------|--------|------|------------|".to_string(),
    ];
    for row in rows {
        lines.push(format!(
            "| {} | {} | {} | {} | {} |",
            row.name,
            row.columns,
            if row.unique { "✓" } else { "" },
            row.method,
            row.definition,
        ));
    }
    Ok(lines.join("\n"))
}

/// Render the foreign-key listing of one table
pub fn foreign_keys(rows: &[ForeignKeyInfo], format: Format) -> Result<String> {
    if format == Format::Json {
        return to_json(rows);
    }
    if rows.is_empty() {
        return Ok(NO_FOREIGN_KEYS.to_string());
    }

    let mut lines = vec![
        "| constraint_name | column_name | foreign_table | foreign_column |".to_string(),
        "|-----------------|-------------|---------------|----------------|".to_string(),
    ];
    for row in rows {
        lines.push(format!(
            "| {} | {} | {} | {} |",
            row.constraint, row.column, row.foreign_table, row.foreign_column,
        ));
    }
    Ok(lines.join("\n"))
}
