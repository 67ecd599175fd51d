//! Mermaid ER diagram assembly.
//!
//! Merges the schema snapshot, declared foreign keys and inferred virtual
//! foreign keys into one diagram. Declared relationships render as solid
//! identifying edges, virtual ones as dotted non-identifying edges, and a
//! virtual edge is suppressed when a declared edge already covers the same
//! referencing column and target table.

use crate::types::{Relationship, SchemaSnapshot};
use std::collections::HashSet;
use std::fmt::Write;

/// Sentinel returned when the snapshot has no tables
pub const NO_TABLES_FOUND: &str = "No matching tables found.";

/// Advisory threshold for unfiltered diagrams
const TABLE_WARNING_LIMIT: usize = 100;

/// Render the full diagram text for one request.
///
/// `filtered` records whether the caller supplied an explicit table list;
/// the large-schema warning only applies to unfiltered requests.
pub fn render(
    snapshot: &SchemaSnapshot,
    declared: &[Relationship],
    inferred: &[Relationship],
    filtered: bool,
) -> String {
    let mut output = String::new();

    if !filtered && snapshot.tables.len() > TABLE_WARNING_LIMIT {
        let _ = writeln!(
            output,
            "Warning: {} tables found. Consider narrowing the request with an explicit table list.",
            snapshot.tables.len()
        );
        output.push('\n');
    }

    output.push_str(&mermaid(snapshot, declared, inferred));
    output
}

/// Render the Mermaid `erDiagram` body
pub fn mermaid(
    snapshot: &SchemaSnapshot,
    declared: &[Relationship],
    inferred: &[Relationship],
) -> String {
    if snapshot.is_empty() {
        return NO_TABLES_FOUND.to_string();
    }

    // Referencing columns of virtual relationships get an FK marker even
    // though no constraint covers them
    let virtual_columns: HashSet<(&str, &str)> = inferred
        .iter()
        .map(|r| (r.from_table.as_str(), r.from_column.as_str()))
        .collect();

    let mut lines = vec!["erDiagram".to_string()];

    let mut tables: Vec<_> = snapshot.tables.iter().collect();
    tables.sort_by(|a, b| a.name.cmp(&b.name));

    for table in tables {
        lines.push(format!("    {} {{", table.name));
        for column in &table.columns {
            let mut markers = Vec::new();
            if column.primary_key {
                markers.push("PK");
            }
            if column.foreign_key
                || virtual_columns.contains(&(table.name.as_str(), column.name.as_str()))
            {
                markers.push("FK");
            }
            let marker = if markers.is_empty() {
                String::new()
            } else {
                format!(" {}", markers.join(","))
            };
            let comment = column
                .comment
                .as_deref()
                .map(|c| format!(" \"{c}\""))
                .unwrap_or_default();
            lines.push(format!(
                "        {} {}{}{}",
                simplify_type(&column.data_type),
                column.name,
                marker,
                comment,
            ));
        }
        lines.push("    }".to_string());
    }

    for relation in declared {
        lines.push(format!(
            "    {} ||--o{{ {} : \"has\"",
            relation.to_table, relation.from_table
        ));
    }

    for relation in inferred {
        let duplicate = declared.iter().any(|d| {
            d.from_table == relation.from_table
                && d.from_column == relation.from_column
                && d.to_table == relation.to_table
        });
        if !duplicate {
            lines.push(format!(
                "    {} ||..o{{ {} : \"references\"",
                relation.to_table, relation.from_table
            ));
        }
    }

    lines.join("\n")
}

/// Map an engine type descriptor to a short diagram tag.
///
/// Parenthesized length/precision suffixes are stripped before lookup,
/// array types recurse on the element type, and unknown types pass through
/// with spaces replaced by underscores.
pub fn simplify_type(data_type: &str) -> String {
    if let Some(element) = data_type.strip_suffix("[]") {
        return format!("{}_array", simplify_type(element));
    }

    let base = data_type
        .split('(')
        .next()
        .unwrap_or(data_type)
        .trim();

    match base {
        "integer" => "integer",
        "bigint" => "bigint",
        "smallint" => "smallint",
        "serial" => "serial",
        "bigserial" => "bigserial",
        "character varying" => "varchar",
        "character" => "char",
        "text" => "text",
        "boolean" => "boolean",
        "timestamp with time zone" => "timestamptz",
        "timestamp without time zone" => "timestamp",
        "date" => "date",
        "time with time zone" => "timetz",
        "time without time zone" => "time",
        "numeric" => "numeric",
        "decimal" => "decimal",
        "real" => "real",
        "double precision" => "double",
        "uuid" => "uuid",
        "json" => "json",
        "jsonb" => "jsonb",
        "bytea" => "bytea",
        "interval" => "interval",
        other => return other.replace(' ', "_"),
    }
    .to_string()
}
