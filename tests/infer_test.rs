use pgscope::infer::virtual_foreign_keys;
use pgscope::types::{Column, SchemaSnapshot, Table};

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
fn test_suffix_match_with_plural_s() {
    let snapshot = SchemaSnapshot {
        tables: vec![
            table("users", vec![column("id", true, false)]),
            table(
                "orders",
                vec![column("id", true, false), column("user_id", false, false)],
            ),
        ],
    };

    let inferred = virtual_foreign_keys(&snapshot);
    assert_eq!(inferred.len(), 1);
    assert_eq!(inferred[0].from_table, "orders");
    assert_eq!(inferred[0].from_column, "user_id");
    assert_eq!(inferred[0].to_table, "users");
    assert_eq!(inferred[0].to_column, "id");
}

#[test]
fn test_suffix_match_with_plural_es() {
    let snapshot = SchemaSnapshot {
        tables: vec![
            table("boxes", vec![column("id", true, false)]),
            table(
                "shipments",
                vec![column("id", true, false), column("box_id", false, false)],
            ),
        ],
    };

    let inferred = virtual_foreign_keys(&snapshot);
    assert_eq!(inferred.len(), 1);
    assert_eq!(inferred[0].to_table, "boxes");
}

#[test]
fn test_suffix_match_with_y_to_ies() {
    let snapshot = SchemaSnapshot {
        tables: vec![
            table("categories", vec![column("id", true, false)]),
            table(
                "products",
                vec![column("id", true, false), column("category_id", false, false)],
            ),
        ],
    };

    let inferred = virtual_foreign_keys(&snapshot);
    assert_eq!(inferred.len(), 1);
    assert_eq!(inferred[0].to_table, "categories");
    assert_eq!(inferred[0].to_column, "id");
}

#[test]
fn test_exact_table_name_beats_pluralizations() {
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
fn test_declared_foreign_key_produces_no_virtual_relationship() {
    // user_id matches the users table by name, but it is already covered
    // by a declared constraint
    let snapshot = SchemaSnapshot {
        tables: vec![
            table("users", vec![column("id", true, false)]),
            table(
                "orders",
                vec![column("id", true, false), column("user_id", false, true)],
            ),
        ],
    };

    assert!(virtual_foreign_keys(&snapshot).is_empty());
}

#[test]
fn test_primary_key_column_is_not_a_referencing_candidate() {
    let snapshot = SchemaSnapshot {
        tables: vec![
            table("users", vec![column("id", true, false)]),
            table("orders", vec![column("user_id", true, false)]),
        ],
    };

    assert!(virtual_foreign_keys(&snapshot).is_empty());
}

#[test]
fn test_missing_target_table_yields_nothing() {
    let snapshot = SchemaSnapshot {
        tables: vec![table(
            "orders",
            vec![column("id", true, false), column("warehouse_id", false, false)],
        )],
    };

    assert!(virtual_foreign_keys(&snapshot).is_empty());
}

#[test]
fn test_same_name_primary_key_family() {
    let snapshot = SchemaSnapshot {
        tables: vec![
            table("countries", vec![column("country_code", true, false)]),
            table(
                "addresses",
                vec![
                    column("id", true, false),
                    column("country_code", false, false),
                ],
            ),
        ],
    };

    let inferred = virtual_foreign_keys(&snapshot);
    assert_eq!(inferred.len(), 1);
    assert_eq!(inferred[0].from_table, "addresses");
    assert_eq!(inferred[0].to_table, "countries");
    assert_eq!(inferred[0].to_column, "country_code");
}

#[test]
fn test_every_qualifying_column_is_covered_exactly_once() {
    let snapshot = SchemaSnapshot {
        tables: vec![
            table("users", vec![column("id", true, false)]),
            table("teams", vec![column("id", true, false)]),
            table(
                "memberships",
                vec![
                    column("id", true, false),
                    column("user_id", false, false),
                    column("team_id", false, false),
                    column("joined_at", false, false),
                ],
            ),
        ],
    };

    let inferred = virtual_foreign_keys(&snapshot);
    assert_eq!(inferred.len(), 2);

    let targets: Vec<(&str, &str)> = inferred
        .iter()
        .map(|r| (r.from_column.as_str(), r.to_table.as_str()))
        .collect();
    assert_eq!(targets, [("user_id", "users"), ("team_id", "teams")]);
}

#[test]
fn test_composite_primary_keys_on_referencing_table() {
    // Both halves of the composite key are primary keys, so neither may
    // become a referencing column
    let snapshot = SchemaSnapshot {
        tables: vec![
            table("users", vec![column("id", true, false)]),
            table("roles", vec![column("id", true, false)]),
            table(
                "user_roles",
                vec![column("user_id", true, false), column("role_id", true, false)],
            ),
        ],
    };

    assert!(virtual_foreign_keys(&snapshot).is_empty());
}
