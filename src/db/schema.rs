use crate::types::{
    Column, ColumnDetail, ForeignKeyInfo, IndexInfo, Relationship, SchemaSnapshot, Table,
    TableEntry,
};
use anyhow::Result;
use sqlx::postgres::PgConnection;
use sqlx::Row;
use tracing::debug;

/// List all tables and views in a schema
pub async fn list_tables(conn: &mut PgConnection, schema: &str) -> Result<Vec<TableEntry>> {
    let rows = sqlx::query(
        r#"
        SELECT
            table_name::text AS table_name,
            table_type::text AS table_type
        FROM information_schema.tables
        WHERE table_schema = $1
        ORDER BY table_name
        "#,
    )
    .bind(schema)
    .fetch_all(conn)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(TableEntry {
                name: row.try_get("table_name")?,
                kind: row.try_get("table_type")?,
            })
        })
        .collect()
}

/// Get column details for a table, in catalog attribute order
pub async fn table_columns(
    conn: &mut PgConnection,
    table_name: &str,
    schema: &str,
) -> Result<Vec<ColumnDetail>> {
    let rows = sqlx::query(
        r#"
        SELECT
            a.attname::text AS column_name,
            pg_catalog.format_type(a.atttypid, a.atttypmod) AS data_type,
            NOT a.attnotnull AS is_nullable,
            pg_catalog.pg_get_expr(d.adbin, d.adrelid) AS column_default,
            COALESCE(
                (SELECT TRUE
                 FROM pg_catalog.pg_constraint con
                 WHERE con.conrelid = a.attrelid
                   AND a.attnum = ANY(con.conkey)
                   AND con.contype = 'p'),
                FALSE
            ) AS is_primary_key,
            pg_catalog.col_description(a.attrelid, a.attnum) AS column_comment
        FROM pg_catalog.pg_attribute a
        JOIN pg_catalog.pg_class c ON c.oid = a.attrelid
        JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
        LEFT JOIN pg_catalog.pg_attrdef d ON d.adrelid = a.attrelid AND d.adnum = a.attnum
        WHERE c.relname = $1
          AND n.nspname = $2
          AND a.attnum > 0
          AND NOT a.attisdropped
        ORDER BY a.attnum
        "#,
    )
    .bind(table_name)
    .bind(schema)
    .fetch_all(conn)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(ColumnDetail {
                name: row.try_get("column_name")?,
                data_type: row.try_get("data_type")?,
                nullable: row.try_get("is_nullable")?,
                default: row.try_get("column_default")?,
                primary_key: row.try_get("is_primary_key")?,
                comment: row.try_get("column_comment")?,
            })
        })
        .collect()
}

/// Get indexes for a table
pub async fn table_indexes(
    conn: &mut PgConnection,
    table_name: &str,
    schema: &str,
) -> Result<Vec<IndexInfo>> {
    let rows = sqlx::query(
        r#"
        SELECT
            i.relname::text AS index_name,
            array_to_string(
                ARRAY(
                    SELECT pg_catalog.pg_get_indexdef(ix.indexrelid, k + 1, true)
                    FROM generate_subscripts(ix.indkey, 1) AS k
                    ORDER BY k
                ),
                ', '
            ) AS columns,
            ix.indisunique AS is_unique,
            am.amname::text AS index_type,
            pg_catalog.pg_get_indexdef(ix.indexrelid) AS definition
        FROM pg_catalog.pg_index ix
        JOIN pg_catalog.pg_class i ON i.oid = ix.indexrelid
        JOIN pg_catalog.pg_class t ON t.oid = ix.indrelid
        JOIN pg_catalog.pg_namespace n ON n.oid = t.relnamespace
        JOIN pg_catalog.pg_am am ON am.oid = i.relam
        WHERE t.relname = $1
          AND n.nspname = $2
        ORDER BY i.relname
        "#,
    )
    .bind(table_name)
    .bind(schema)
    .fetch_all(conn)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(IndexInfo {
                name: row.try_get("index_name")?,
                columns: row.try_get("columns")?,
                unique: row.try_get("is_unique")?,
                method: row.try_get("index_type")?,
                definition: row.try_get("definition")?,
            })
        })
        .collect()
}

/// Get declared foreign keys for a table.
///
/// Referencing and referenced columns are paired by their ordinal position
/// within the constraint's key-column arrays, so composite keys line up
/// element by element.
pub async fn table_foreign_keys(
    conn: &mut PgConnection,
    table_name: &str,
    schema: &str,
) -> Result<Vec<ForeignKeyInfo>> {
    let rows = sqlx::query(
        r#"
        SELECT
            con.conname::text AS constraint_name,
            a.attname::text AS column_name,
            ref_class.relname::text AS foreign_table,
            ref_attr.attname::text AS foreign_column
        FROM pg_catalog.pg_constraint con
        JOIN pg_catalog.pg_class cls ON cls.oid = con.conrelid
        JOIN pg_catalog.pg_namespace nsp ON nsp.oid = cls.relnamespace
        JOIN pg_catalog.pg_attribute a ON a.attrelid = con.conrelid
            AND a.attnum = ANY(con.conkey)
        JOIN pg_catalog.pg_class ref_class ON ref_class.oid = con.confrelid
        JOIN pg_catalog.pg_attribute ref_attr ON ref_attr.attrelid = con.confrelid
            AND ref_attr.attnum = ANY(con.confkey)
            AND array_position(con.conkey, a.attnum) = array_position(con.confkey, ref_attr.attnum)
        WHERE con.contype = 'f'
          AND cls.relname = $1
          AND nsp.nspname = $2
        ORDER BY con.conname, a.attnum
        "#,
    )
    .bind(table_name)
    .bind(schema)
    .fetch_all(conn)
    .await?;

    rows.iter()
        .map(|row| {
            Ok(ForeignKeyInfo {
                constraint: row.try_get("constraint_name")?,
                column: row.try_get("column_name")?,
                foreign_table: row.try_get("foreign_table")?,
                foreign_column: row.try_get("foreign_column")?,
            })
        })
        .collect()
}

/// Build the per-request metadata snapshot for a schema.
///
/// Only base tables are included. The query scans the whole schema ordered
/// by table name and column position; the optional table filter is applied
/// in memory while the rows are grouped into tables.
pub async fn schema_snapshot(
    conn: &mut PgConnection,
    schema: &str,
    filter: Option<&[String]>,
) -> Result<SchemaSnapshot> {
    let rows = sqlx::query(
        r#"
        SELECT
            c.relname::text AS table_name,
            a.attname::text AS column_name,
            pg_catalog.format_type(a.atttypid, a.atttypmod) AS data_type,
            COALESCE(
                (SELECT TRUE
                 FROM pg_catalog.pg_constraint con
                 WHERE con.conrelid = a.attrelid
                   AND a.attnum = ANY(con.conkey)
                   AND con.contype = 'p'),
                FALSE
            ) AS is_primary_key,
            COALESCE(
                (SELECT TRUE
                 FROM pg_catalog.pg_constraint con
                 WHERE con.conrelid = a.attrelid
                   AND a.attnum = ANY(con.conkey)
                   AND con.contype = 'f'),
                FALSE
            ) AS is_foreign_key,
            pg_catalog.col_description(a.attrelid, a.attnum) AS column_comment
        FROM pg_catalog.pg_attribute a
        JOIN pg_catalog.pg_class c ON c.oid = a.attrelid
        JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
        WHERE n.nspname = $1
          AND c.relkind = 'r'
          AND a.attnum > 0
          AND NOT a.attisdropped
        ORDER BY c.relname, a.attnum
        "#,
    )
    .bind(schema)
    .fetch_all(conn)
    .await?;

    let mut snapshot = SchemaSnapshot::default();
    for row in &rows {
        let table_name: String = row.try_get("table_name")?;
        if let Some(filter) = filter {
            if !filter.iter().any(|t| t == &table_name) {
                continue;
            }
        }

        let column = Column {
            name: row.try_get("column_name")?,
            data_type: row.try_get("data_type")?,
            primary_key: row.try_get("is_primary_key")?,
            foreign_key: row.try_get("is_foreign_key")?,
            comment: row.try_get("column_comment")?,
        };

        // Rows arrive grouped by table, so a name change starts a new table
        match snapshot.tables.last_mut() {
            Some(table) if table.name == table_name => table.columns.push(column),
            _ => snapshot.tables.push(Table {
                name: table_name,
                columns: vec![column],
            }),
        }
    }

    debug!(schema, tables = snapshot.tables.len(), "snapshot built");
    Ok(snapshot)
}

/// Collect all declared foreign-key relationships within a schema.
///
/// When a table filter is given, only relationships with both endpoints in
/// the filter are kept.
pub async fn declared_relationships(
    conn: &mut PgConnection,
    schema: &str,
    filter: Option<&[String]>,
) -> Result<Vec<Relationship>> {
    let rows = sqlx::query(
        r#"
        SELECT DISTINCT
            cls.relname::text AS from_table,
            a.attname::text AS from_column,
            ref_class.relname::text AS to_table,
            ref_attr.attname::text AS to_column,
            con.conname::text AS constraint_name,
            array_position(con.conkey, a.attnum) AS key_ordinal
        FROM pg_catalog.pg_constraint con
        JOIN pg_catalog.pg_class cls ON cls.oid = con.conrelid
        JOIN pg_catalog.pg_namespace nsp ON nsp.oid = cls.relnamespace
        JOIN pg_catalog.pg_attribute a ON a.attrelid = con.conrelid
            AND a.attnum = ANY(con.conkey)
        JOIN pg_catalog.pg_class ref_class ON ref_class.oid = con.confrelid
        JOIN pg_catalog.pg_namespace ref_nsp ON ref_nsp.oid = ref_class.relnamespace
        JOIN pg_catalog.pg_attribute ref_attr ON ref_attr.attrelid = con.confrelid
            AND ref_attr.attnum = ANY(con.confkey)
            AND array_position(con.conkey, a.attnum) = array_position(con.confkey, ref_attr.attnum)
        WHERE con.contype = 'f'
          AND nsp.nspname = $1
          AND ref_nsp.nspname = $1
        ORDER BY constraint_name, key_ordinal
        "#,
    )
    .bind(schema)
    .fetch_all(conn)
    .await?;

    let mut relations = Vec::new();
    for row in &rows {
        let from_table: String = row.try_get("from_table")?;
        let to_table: String = row.try_get("to_table")?;
        if let Some(filter) = filter {
            let keep = filter.iter().any(|t| t == &from_table)
                && filter.iter().any(|t| t == &to_table);
            if !keep {
                continue;
            }
        }
        relations.push(Relationship {
            from_table,
            from_column: row.try_get("from_column")?,
            to_table,
            to_column: row.try_get("to_column")?,
        });
    }

    Ok(relations)
}
