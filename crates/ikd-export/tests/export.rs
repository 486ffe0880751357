//! Export grouping, precondition, and policy tests.

use ikd_export::{ExportError, collect_issues, export, group_index_sets, missing_fields};
use ikd_model::{IndexKitInfo, IndexSet, KitType, ResourceSettings, SessionInfo, Table};

fn cell(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
    Table::new(
        columns.iter().map(|c| (*c).to_string()).collect(),
        rows.iter()
            .map(|row| row.iter().map(|v| cell(v)).collect())
            .collect(),
    )
    .unwrap()
}

fn dual_kit() -> KitType {
    KitType {
        name: "dual_kit".to_string(),
        index_sets: vec![IndexSet {
            name: "dual".to_string(),
            fields: vec![
                "name7".to_string(),
                "seq7".to_string(),
                "name5".to_string(),
                "seq5".to_string(),
            ],
        }],
    }
}

#[test]
fn grouping_drops_fully_blank_rows() {
    let table = table(
        &["name7", "seq7", "name5", "seq5"],
        &[
            &["Idx1", "ACGT", "Idx1_5", "TTGG"],
            &["Idx2", "ACGG", "Idx2_5", "TTCC"],
            &["", "", "", ""],
        ],
    );
    let indexes = group_index_sets(&table, &dual_kit()).unwrap();
    let rows = indexes["dual"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name7"], "Idx1");
    assert_eq!(rows[1]["seq5"], "TTCC");
}

#[test]
fn missing_field_is_named() {
    let table = table(&["name7", "seq7", "name5"], &[&["a", "ACGT", "b"]]);
    let error = group_index_sets(&table, &dual_kit()).unwrap_err();
    assert_eq!(
        error,
        ExportError::MissingFields {
            fields: vec!["seq5".to_string()]
        }
    );
    assert_eq!(missing_fields(&table, &dual_kit()), vec!["seq5"]);
}

#[test]
fn partially_blank_row_fails_the_set() {
    let table = table(
        &["name7", "seq7", "name5", "seq5"],
        &[&["Idx1", "ACGT", "", "TTGG"]],
    );
    let error = group_index_sets(&table, &dual_kit()).unwrap_err();
    assert_eq!(error, ExportError::IncompleteIndexSet("dual".to_string()));
}

#[test]
fn issues_are_collected_per_set() {
    let kit = KitType {
        name: "two_sets".to_string(),
        index_sets: vec![
            IndexSet {
                name: "indices_i7".to_string(),
                fields: vec!["index_i7_name".to_string(), "index_i7".to_string()],
            },
            IndexSet {
                name: "indices_i5".to_string(),
                fields: vec!["index_i5_name".to_string(), "index_i5".to_string()],
            },
        ],
    };
    // The i7 set is complete, the i5 set has a hole: only i5 is reported.
    let complete = table(
        &["index_i7_name", "index_i7", "index_i5_name", "index_i5"],
        &[&["Idx1", "ACGT", "Idx1_5", ""]],
    );
    let issues = collect_issues(&complete, &kit);
    assert_eq!(
        issues,
        vec![ExportError::IncompleteIndexSet("indices_i5".to_string())]
    );

    // Both sets broken: both reported, in definition order.
    let broken = table(
        &["index_i7_name", "index_i7", "index_i5_name", "index_i5"],
        &[&["Idx1", "", "Idx1_5", ""], &["Idx2", "ACGT", "Idx2_5", "TTGG"]],
    );
    let issues = collect_issues(&broken, &kit);
    assert_eq!(issues.len(), 2);
    assert_eq!(
        issues[0],
        ExportError::IncompleteIndexSet("indices_i7".to_string())
    );
}

#[test]
fn empty_table_is_an_error() {
    let table = Table::default();
    assert_eq!(collect_issues(&table, &dual_kit()), vec![ExportError::EmptyTable]);
}

#[test]
fn sets_emit_in_definition_order() {
    let kit = KitType {
        name: "ordered".to_string(),
        index_sets: vec![
            IndexSet {
                name: "zulu".to_string(),
                fields: vec!["z".to_string()],
            },
            IndexSet {
                name: "alpha".to_string(),
                fields: vec!["a".to_string()],
            },
        ],
    };
    let table = table(&["z", "a"], &[&["1", "2"]]);
    let indexes = group_index_sets(&table, &kit).unwrap();
    let names: Vec<&String> = indexes.keys().collect();
    assert_eq!(names, ["zulu", "alpha"]);
}

#[test]
fn full_document_shape() {
    let table = table(
        &["pos", "name7", "seq7"],
        &[
            &["1", "Idx1", "ACGT"],
            &["2", "Idx2", "ACGG"],
            &["", "", ""],
        ],
    );
    let kit = KitType {
        name: "positional".to_string(),
        index_sets: vec![IndexSet {
            name: "indices_i7".to_string(),
            fields: vec!["pos".to_string(), "name7".to_string(), "seq7".to_string()],
        }],
    };
    let session = SessionInfo {
        user: "tech".to_string(),
        ad_user: "tech".to_string(),
        source_file: "indexes.csv".to_string(),
        timestamp: "08/06/2026, 10:00:00".to_string(),
    };
    let kit_info = IndexKitInfo {
        name: "GMS560_Index_Kit".to_string(),
        display_name: "GMS560 Index Kit".to_string(),
        version: "1.0".to_string(),
        description: "dual index plate".to_string(),
    };
    let record = export(&table, &kit, &session, &ResourceSettings::default(), &kit_info).unwrap();

    let json = serde_json::to_value(&record).unwrap();
    assert_eq!(json["user_info"]["file_path"], "indexes.csv");
    assert_eq!(json["index_kit"]["name"], "GMS560_Index_Kit");
    let rows = json["indexes"]["indices_i7"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["pos"], "1");
    assert_eq!(rows[1]["pos"], "2");
    assert!(json["resource"].get("override_cycles_pattern_r1").is_some());
}
