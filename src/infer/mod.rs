//! Virtual foreign-key inference.
//!
//! Proposes table relationships that are not declared as constraints, based
//! purely on column-naming conventions. Two pattern families are tried in
//! order for each candidate column, and the first hit wins:
//!
//! 1. Suffix-and-pluralize: a column named `customer_id` (or `customer_no`)
//!    points at a table named `customer`, `customers`, `customeres`, or for
//!    `y`-stems `categories`.
//! 2. Same-name primary key: a column whose name equals another table's
//!    primary-key column points at that table.
//!
//! The precedence rules are kept auditable by expressing every trial as an
//! ordered candidate sequence evaluated lazily until one yields a hit.

use crate::types::{Relationship, SchemaSnapshot, Table};

/// Reference-column suffixes tried by the suffix-and-pluralize family,
/// in match order.
const REFERENCE_SUFFIXES: [&str; 2] = ["_id", "_no"];

/// Infer virtual foreign keys for every column of the snapshot that is
/// neither a declared foreign key nor a primary key of its own table.
///
/// At most one relationship is emitted per column. Iteration covers tables
/// and columns in snapshot order, so the result is deterministic for a
/// fixed snapshot.
pub fn virtual_foreign_keys(snapshot: &SchemaSnapshot) -> Vec<Relationship> {
    let mut inferred = Vec::new();

    for table in &snapshot.tables {
        for column in &table.columns {
            // A declared foreign key already links this column; a primary
            // key only ever acts as the referenced side of a match.
            if column.foreign_key || column.primary_key {
                continue;
            }

            let matched = match_by_suffix(snapshot, &table.name, &column.name)
                .or_else(|| match_by_primary_key(snapshot, &table.name, &column.name));

            if let Some((to_table, to_column)) = matched {
                inferred.push(Relationship {
                    from_table: table.name.clone(),
                    from_column: column.name.clone(),
                    to_table,
                    to_column,
                });
            }
        }
    }

    inferred
}

/// Pattern family 1: strip a reference suffix and test singular/plural
/// variants of the stem against the snapshot's table names.
fn match_by_suffix(
    snapshot: &SchemaSnapshot,
    own_table: &str,
    column_name: &str,
) -> Option<(String, String)> {
    REFERENCE_SUFFIXES.iter().find_map(|suffix| {
        let stem = column_name.strip_suffix(suffix)?;
        target_candidates(stem)
            .find(|candidate| candidate != own_table && snapshot.contains_table(candidate))
            .map(|target| {
                let to_column = referenced_column(snapshot.table(&target));
                (target, to_column)
            })
    })
}

/// Candidate target-table names for a stem, in trial order: the bare stem,
/// then `s`/`es` plurals, then the `y` -> `ies` form for `y`-stems.
fn target_candidates(stem: &str) -> impl Iterator<Item = String> + '_ {
    let ies = stem
        .strip_suffix('y')
        .map(|base| format!("{base}ies"));

    [stem.to_string(), format!("{stem}s"), format!("{stem}es")]
        .into_iter()
        .chain(ies)
}

/// Choose the referenced column of a matched target table: a primary key
/// named `id`, else one named `no`, else the first primary-key column in
/// catalog order, else the literal `id` when the table has no primary key.
fn referenced_column(target: Option<&Table>) -> String {
    let Some(target) = target else {
        return "id".to_string();
    };

    let primary_keys: Vec<&str> = target.primary_key_columns().collect();
    if primary_keys.contains(&"id") {
        "id".to_string()
    } else if primary_keys.contains(&"no") {
        "no".to_string()
    } else if let Some(first) = primary_keys.first() {
        (*first).to_string()
    } else {
        "id".to_string()
    }
}

/// Pattern family 2: the first other table whose primary-key column set
/// contains a column with exactly this name.
fn match_by_primary_key(
    snapshot: &SchemaSnapshot,
    own_table: &str,
    column_name: &str,
) -> Option<(String, String)> {
    snapshot
        .tables
        .iter()
        .filter(|table| table.name != own_table)
        .find(|table| table.primary_key_columns().any(|pk| pk == column_name))
        .map(|table| (table.name.clone(), column_name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Column;

    fn column(name: &str, primary_key: bool, foreign_key: bool) -> Column {
        Column {
            name: name.to_string(),
            data_type: "integer".to_string(),
            primary_key,
            foreign_key,
            comment: None,
        }
    }

    fn table(name: &str, columns: Vec<Column>) -> Table {
        Table {
            name: name.to_string(),
            columns,
        }
    }

    #[test]
    fn target_candidates_order() {
        let candidates: Vec<String> = target_candidates("category").collect();
        assert_eq!(candidates, ["category", "categorys", "categoryes", "categories"]);

        let candidates: Vec<String> = target_candidates("user").collect();
        assert_eq!(candidates, ["user", "users", "useres"]);
    }

    #[test]
    fn bare_stem_beats_plural() {
        let snapshot = SchemaSnapshot {
            tables: vec![
                table("user", vec![column("id", true, false)]),
                table("users", vec![column("id", true, false)]),
                table("orders", vec![column("user_id", false, false)]),
            ],
        };

        let inferred = virtual_foreign_keys(&snapshot);
        assert_eq!(inferred.len(), 1);
        assert_eq!(inferred[0].to_table, "user");
    }

    #[test]
    fn suffix_no_matches_after_id() {
        let snapshot = SchemaSnapshot {
            tables: vec![
                table("invoices", vec![column("no", true, false)]),
                table("payments", vec![column("invoice_no", false, false)]),
            ],
        };

        let inferred = virtual_foreign_keys(&snapshot);
        assert_eq!(inferred.len(), 1);
        assert_eq!(inferred[0].to_table, "invoices");
        assert_eq!(inferred[0].to_column, "no");
    }

    #[test]
    fn referenced_column_prefers_id_then_no_then_first_pk() {
        let both = table("t", vec![column("no", true, false), column("id", true, false)]);
        assert_eq!(referenced_column(Some(&both)), "id");

        let only_no = table("t", vec![column("no", true, false)]);
        assert_eq!(referenced_column(Some(&only_no)), "no");

        let composite = table(
            "t",
            vec![column("tenant", true, false), column("code", true, false)],
        );
        assert_eq!(referenced_column(Some(&composite)), "tenant");

        let keyless = table("t", vec![column("value", false, false)]);
        assert_eq!(referenced_column(Some(&keyless)), "id");
    }

    #[test]
    fn declared_foreign_key_columns_are_skipped() {
        let snapshot = SchemaSnapshot {
            tables: vec![
                table("users", vec![column("id", true, false)]),
                table("orders", vec![column("user_id", false, true)]),
            ],
        };

        assert!(virtual_foreign_keys(&snapshot).is_empty());
    }

    #[test]
    fn own_primary_key_is_never_a_referencing_column() {
        // orders.id would match users.id by the same-name rule if it were
        // not a primary key of its own table
        let snapshot = SchemaSnapshot {
            tables: vec![
                table("users", vec![column("id", true, false)]),
                table("orders", vec![column("id", true, false)]),
            ],
        };

        assert!(virtual_foreign_keys(&snapshot).is_empty());
    }

    #[test]
    fn self_match_is_excluded() {
        let snapshot = SchemaSnapshot {
            tables: vec![table(
                "categories",
                vec![
                    column("id", true, false),
                    column("category_id", false, false),
                ],
            )],
        };

        assert!(virtual_foreign_keys(&snapshot).is_empty());
    }

    #[test]
    fn same_name_primary_key_fallback() {
        let snapshot = SchemaSnapshot {
            tables: vec![
                table("tenants", vec![column("tenant_code", true, false)]),
                table(
                    "projects",
                    vec![column("id", true, false), column("tenant_code", false, false)],
                ),
            ],
        };

        let inferred = virtual_foreign_keys(&snapshot);
        assert_eq!(
            inferred,
            vec![Relationship {
                from_table: "projects".to_string(),
                from_column: "tenant_code".to_string(),
                to_table: "tenants".to_string(),
                to_column: "tenant_code".to_string(),
            }]
        );
    }

    #[test]
    fn suffix_family_wins_over_primary_key_family() {
        // supplier_id matches suppliers by suffix; suppliers also has a PK
        // named supplier_id, so the same-name rule would match too
        let snapshot = SchemaSnapshot {
            tables: vec![
                table("suppliers", vec![column("supplier_id", true, false)]),
                table("parts", vec![column("supplier_id", false, false)]),
            ],
        };

        let inferred = virtual_foreign_keys(&snapshot);
        assert_eq!(inferred.len(), 1);
        assert_eq!(inferred[0].to_table, "suppliers");
        // chosen by the suffix family's referenced-column rule: no id/no
        // PK, so the first primary key in column order
        assert_eq!(inferred[0].to_column, "supplier_id");
    }

    #[test]
    fn one_relationship_per_column() {
        let snapshot = SchemaSnapshot {
            tables: vec![
                table("category", vec![column("id", true, false)]),
                table("categories", vec![column("id", true, false)]),
                table(
                    "products",
                    vec![column("id", true, false), column("category_id", false, false)],
                ),
            ],
        };

        let inferred = virtual_foreign_keys(&snapshot);
        assert_eq!(inferred.len(), 1);
        assert_eq!(inferred[0].to_table, "category");
    }

    #[test]
    fn keyless_target_defaults_to_id() {
        let snapshot = SchemaSnapshot {
            tables: vec![
                table("regions", vec![column("name", false, false)]),
                table("stores", vec![column("region_id", false, false)]),
            ],
        };

        let inferred = virtual_foreign_keys(&snapshot);
        assert_eq!(inferred.len(), 1);
        assert_eq!(inferred[0].to_table, "regions");
        assert_eq!(inferred[0].to_column, "id");
    }
}
