use serde::{Deserialize, Serialize};

/// One column of a snapshot table, with the flags the diagram pipeline needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: String,
    pub primary_key: bool,
    /// True only for columns covered by a declared foreign-key constraint
    pub foreign_key: bool,
    pub comment: Option<String>,
}

/// A table and its columns in catalog attribute order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<Column>,
}

impl Table {
    /// Names of this table's primary-key columns, in column order
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter(|c| c.primary_key)
            .map(|c| c.name.as_str())
    }
}

/// Point-in-time metadata for one schema, scoped to one request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    pub tables: Vec<Table>,
}

impl SchemaSnapshot {
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.iter().any(|t| t.name == name)
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}

/// A directed table relationship; "from" is the referencing side.
///
/// The same shape serves declared foreign keys (verified by the engine) and
/// virtual foreign keys (inferred from naming conventions, unverified).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relationship {
    pub from_table: String,
    pub from_column: String,
    pub to_table: String,
    pub to_column: String,
}
