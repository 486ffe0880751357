//! Unit tests for column and metadata validation rules.

use ikd_model::{CycleSlot, IndexKitInfo, ResourceSettings};
use ikd_validate::{
    Violation, derive_cycle_length, non_empty, unique, unique_with_rows, uniform_length,
    valid_adapter, valid_alphabet, valid_index_slot, valid_kit_name, valid_read_slot,
    valid_version, validate_kit_info, validate_resource_settings,
};

fn column(values: &[&str]) -> Vec<Option<String>> {
    values
        .iter()
        .map(|v| if v.is_empty() { None } else { Some((*v).to_string()) })
        .collect()
}

fn refs(column: &[Option<String>]) -> Vec<Option<&str>> {
    column.iter().map(|c| c.as_deref()).collect()
}

#[test]
fn alphabet_skips_blanks_and_reports_one_based_rows() {
    let col = column(&["ACGT", "acgt", "", "ACGX"]);
    let diagnostic = valid_alphabet("index_i7", &refs(&col)).unwrap_err();
    assert_eq!(diagnostic.violation, Violation::InvalidAlphabet);
    assert_eq!(diagnostic.rows, vec![4]);
    assert_eq!(diagnostic.field, "index_i7");
}

#[test]
fn alphabet_accepts_mixed_case() {
    let col = column(&["ACGT", "acgt", "AcGt", ""]);
    assert!(valid_alphabet("index_i5", &refs(&col)).is_ok());
}

#[test]
fn alphabet_rejects_digits_and_ambiguity_codes() {
    let col = column(&["ACGT", "ACGN", "1234"]);
    let diagnostic = valid_alphabet("index_i7", &refs(&col)).unwrap_err();
    assert_eq!(diagnostic.rows, vec![2, 3]);
}

#[test]
fn uniform_length_requires_exactly_one_length() {
    let mixed = column(&["ACGT", "ACG", ""]);
    assert!(!uniform_length(&refs(&mixed)));

    let same = column(&["ACGT", "ACGT", ""]);
    assert!(uniform_length(&refs(&same)));

    let all_blank = column(&["", "", ""]);
    assert!(!uniform_length(&refs(&all_blank)));
}

#[test]
fn derive_cycle_length_needs_uniform_column() {
    let same = column(&["ACGTACGT", "TTTTAAAA"]);
    assert_eq!(derive_cycle_length(&refs(&same)).unwrap(), 8);

    let mixed = column(&["ACGT", "ACGTA"]);
    let error = derive_cycle_length(&refs(&mixed)).unwrap_err();
    assert_eq!(error.lengths, vec![4, 5]);
}

#[test]
fn unique_ignores_blanks() {
    let dup = column(&["A", "B", "A"]);
    assert!(!unique(&refs(&dup)));

    let with_blank = column(&["A", "B", ""]);
    assert!(unique(&refs(&with_blank)));
}

#[test]
fn unique_with_rows_lists_repeats() {
    let dup = column(&["ACGT", "TTGG", "ACGT", "ACGT"]);
    let diagnostic = unique_with_rows("index_i7", &refs(&dup)).unwrap_err();
    assert_eq!(diagnostic.violation, Violation::DuplicateValues);
    assert_eq!(diagnostic.rows, vec![3, 4]);
}

#[test]
fn non_empty_excludes_fully_blank_rows() {
    let name = column(&["Idx1", "Idx2", ""]);
    let seq = column(&["ACGT", "ACGG", ""]);
    assert!(non_empty(&[refs(&name), refs(&seq)]));

    // A partially filled row is a failure.
    let ragged_seq = column(&["ACGT", "", ""]);
    assert!(!non_empty(&[refs(&name), refs(&ragged_seq)]));
}

#[test]
fn kit_name_rules() {
    assert!(valid_kit_name("GMS560_Index_Kit"));
    assert!(!valid_kit_name("GMS560 Index Kit"));
    assert!(!valid_kit_name(""));
}

#[test]
fn version_rules() {
    assert!(valid_version("1"));
    assert!(valid_version("1.2"));
    assert!(valid_version("1.2.3"));
    assert!(!valid_version("1.2.3.4"));
    assert!(!valid_version("1.."));
    assert!(!valid_version("1.1000"));
    assert!(!valid_version("v1"));
}

#[test]
fn adapter_rules() {
    assert!(valid_adapter(""));
    assert!(valid_adapter("ACGTacgt"));
    assert!(valid_adapter("ACGT+ACGT"));
    assert!(!valid_adapter("ACGU"));
}

#[test]
fn override_cycle_slot_rules() {
    assert!(valid_read_slot("Y151"));
    assert!(valid_read_slot("U8N2"));
    assert!(valid_read_slot("Yx"));
    assert!(!valid_read_slot("YxNx"));
    assert!(!valid_read_slot(""));
    assert!(!valid_read_slot("I8"));

    assert!(valid_index_slot("I8"));
    assert!(valid_index_slot("I8N2"));
    assert!(valid_index_slot("Ix"));
    assert!(!valid_index_slot("IxUx"));
    assert!(!valid_index_slot("Y151"));
}

#[test]
fn kit_info_issues_accumulate() {
    let info = IndexKitInfo {
        name: "bad name".to_string(),
        version: "1.2.3.4".to_string(),
        ..IndexKitInfo::default()
    };
    let issues = validate_kit_info(&info);
    assert_eq!(issues.len(), 2);
}

#[test]
fn resource_settings_report_every_incomplete_slot() {
    let mut resource = ResourceSettings::default();
    resource.override_cycles.set(CycleSlot::Read1, "Y151".to_string());
    let issues = validate_resource_settings(&resource);
    // r2, i1, i2 are empty; adapters are empty but valid.
    assert_eq!(issues.len(), 3);
    assert!(issues.iter().any(|m| m.contains("override_cycles_pattern_i2")));
}
