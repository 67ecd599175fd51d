pub mod diagram;
pub mod table;

pub use diagram::{Column, Relationship, SchemaSnapshot, Table};
pub use table::{ColumnDetail, ForeignKeyInfo, IndexInfo, TableEntry};
