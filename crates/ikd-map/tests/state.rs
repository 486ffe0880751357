//! Relabeling state unit tests.

use ikd_map::{HeaderState, MappingError};
use ikd_model::Table;

fn table(columns: &[&str]) -> Table {
    let labels: Vec<String> = columns.iter().map(|c| (*c).to_string()).collect();
    let row = vec![Some("x".to_string()); columns.len()];
    Table::new(labels, vec![row]).unwrap()
}

#[test]
fn relabel_is_idempotent() {
    let mut state = HeaderState::new(table(&["a", "b"]));
    state.relabel(0, "index_i7").unwrap();
    let labels_after_first: Vec<String> = state.current_labels().to_vec();
    assert_eq!(state.original_label(0), Some("a"));

    // Second application: same labels, no new remembered original.
    state.relabel(0, "index_i7").unwrap();
    assert_eq!(state.current_labels(), labels_after_first.as_slice());
    assert_eq!(state.original_label(0), Some("a"));
}

#[test]
fn label_exclusivity_moves_label_between_columns() {
    let mut state = HeaderState::new(table(&["a", "b"]));
    state.relabel(0, "index_i7").unwrap();
    state.relabel(1, "index_i7").unwrap();

    // The label moved off column 0, which reverted to its original.
    assert_eq!(state.current_labels(), ["a", "index_i7"]);
    assert_eq!(state.original_label(0), None);
    assert_eq!(state.original_label(1), Some("b"));
}

#[test]
fn wearer_without_record_is_left_untouched() {
    // Column 0 loaded as "index_i7"; nothing recorded for it.
    let mut state = HeaderState::new(table(&["index_i7", "b"]));
    state.relabel(1, "index_i7").unwrap();
    assert_eq!(state.current_labels(), ["index_i7", "index_i7"]);
    assert_eq!(state.original_label(0), None);
}

#[test]
fn restore_round_trips_to_loaded_label() {
    let mut state = HeaderState::new(table(&["well", "b"]));
    state.relabel(0, "fixed_pos").unwrap();
    let restored = state.restore_original(0).unwrap();
    assert_eq!(restored.as_deref(), Some("well"));
    assert_eq!(state.current_labels(), ["well", "b"]);

    // Idempotent: nothing remembered any more.
    assert_eq!(state.restore_original(0).unwrap(), None);
}

#[test]
fn first_original_survives_repeated_relabels() {
    let mut state = HeaderState::new(table(&["well", "b"]));
    state.relabel(0, "fixed_pos").unwrap();
    state.relabel(0, "pos_i7").unwrap();
    assert_eq!(state.original_label(0), Some("well"));

    state.restore_original(0).unwrap();
    assert_eq!(state.current_labels(), ["well", "b"]);
}

#[test]
fn restore_all_originals() {
    let mut state = HeaderState::new(table(&["a", "b", "c"]));
    state.relabel(0, "index_i7_name").unwrap();
    state.relabel(2, "index_i7").unwrap();
    state.restore_all_originals();
    assert_eq!(state.current_labels(), ["a", "b", "c"]);
    assert_eq!(state.original_label(0), None);
    assert_eq!(state.original_label(2), None);
}

#[test]
fn replace_clears_history() {
    let mut state = HeaderState::new(table(&["a", "b"]));
    state.relabel(0, "index_i7").unwrap();
    state.replace(table(&["c", "d"]));
    assert_eq!(state.current_labels(), ["c", "d"]);
    assert_eq!(state.original_label(0), None);
}

#[test]
fn out_of_range_is_a_contract_violation() {
    let mut state = HeaderState::new(table(&["a"]));
    assert!(matches!(
        state.relabel(3, "index_i7"),
        Err(MappingError::ColumnOutOfRange { index: 3, count: 1 })
    ));
    assert!(matches!(
        state.restore_original(3),
        Err(MappingError::ColumnOutOfRange { .. })
    ));
}

#[test]
fn relabel_returns_previous_label() {
    let mut state = HeaderState::new(table(&["well", "b"]));
    assert_eq!(state.relabel(0, "fixed_pos").unwrap(), "well");
    assert_eq!(state.relabel(0, "pos_i7").unwrap(), "fixed_pos");
}
