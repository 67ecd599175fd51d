use serde::{Deserialize, Serialize};

/// One row of the table listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableEntry {
    pub name: String,
    /// Relation kind as reported by the catalog, e.g. "BASE TABLE" or "VIEW"
    pub kind: String,
}

/// Detailed information about a single column of one table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDetail {
    pub name: String,
    pub data_type: String,
    pub nullable: bool,
    pub default: Option<String>,
    pub primary_key: bool,
    pub comment: Option<String>,
}

/// Information about an index
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexInfo {
    pub name: String,
    /// Covered column expressions in index order, comma-joined
    pub columns: String,
    pub unique: bool,
    /// Access method name, e.g. "btree" or "gin"
    pub method: String,
    pub definition: String,
}

/// Information about a declared foreign-key constraint column pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForeignKeyInfo {
    pub constraint: String,
    pub column: String,
    pub foreign_table: String,
    pub foreign_column: String,
}
