//! Partitioning of a validated table into index sets and assembly of the
//! export document.
//!
//! Export works per index set, in kit-type definition order: the set's
//! columns are selected by field name, rows blank across the whole subset
//! are dropped (unset trailing rows), and any remaining blank cell fails
//! that set. [`collect_issues`] evaluates every set independently so the
//! caller can show the complete error picture before refusing to export;
//! [`export`] is the fail-fast primitive underneath.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use ikd_model::{IndexKitInfo, IndexSet, KitType, ResourceSettings, SessionInfo, Table, is_blank};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExportError {
    #[error("Table is empty")]
    EmptyTable,
    #[error("Required header labels are not set in the table: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },
    #[error("Empty values in the index table for {0}")]
    IncompleteIndexSet(String),
}

/// The exported document: kit identification, resource settings, session
/// provenance, and the per-index-set row records. Built fresh on every
/// export, never mutated afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct ExportRecord {
    pub user_info: SessionInfo,
    pub resource: ResourceSettings,
    pub index_kit: IndexKitInfo,
    /// Index-set name → row records, in kit-type definition order.
    pub indexes: Map<String, Value>,
}

/// Kit-type fields absent from the table's current labels, in field order.
pub fn missing_fields(table: &Table, kit_type: &KitType) -> Vec<String> {
    kit_type
        .all_fields()
        .into_iter()
        .filter(|field| table.column_index(field).is_none())
        .map(ToString::to_string)
        .collect()
}

/// Row records for one index set. Rows blank across the whole subset are
/// dropped; a partially blank row fails the set.
pub fn index_set_rows(table: &Table, set: &IndexSet) -> Result<Vec<Value>, ExportError> {
    let columns: Vec<usize> = set
        .fields
        .iter()
        .map(|field| {
            table
                .column_index(field)
                .ok_or_else(|| ExportError::MissingFields {
                    fields: vec![field.clone()],
                })
        })
        .collect::<Result<_, _>>()?;

    let mut records = Vec::new();
    for row in 0..table.row_count() {
        let cells: Vec<Option<&str>> = columns
            .iter()
            .map(|&column| table.cell(row, column))
            .collect();
        if cells.iter().all(|cell| is_blank(*cell)) {
            continue;
        }
        if cells.iter().any(|cell| is_blank(*cell)) {
            return Err(ExportError::IncompleteIndexSet(set.name.clone()));
        }
        let mut record = Map::new();
        for (field, cell) in set.fields.iter().zip(&cells) {
            record.insert(
                field.clone(),
                Value::String(cell.unwrap_or_default().to_string()),
            );
        }
        records.push(Value::Object(record));
    }
    Ok(records)
}

/// Group the table into the kit type's index sets, in definition order.
/// Fails fast on the first incomplete set.
pub fn group_index_sets(table: &Table, kit_type: &KitType) -> Result<Map<String, Value>, ExportError> {
    if table.is_empty() {
        return Err(ExportError::EmptyTable);
    }
    let missing = missing_fields(table, kit_type);
    if !missing.is_empty() {
        return Err(ExportError::MissingFields { fields: missing });
    }
    let mut indexes = Map::new();
    for set in &kit_type.index_sets {
        indexes.insert(set.name.clone(), Value::Array(index_set_rows(table, set)?));
    }
    Ok(indexes)
}

/// Every export problem with the current table, evaluated per set so one
/// bad index set does not hide findings about the others.
pub fn collect_issues(table: &Table, kit_type: &KitType) -> Vec<ExportError> {
    if table.is_empty() {
        return vec![ExportError::EmptyTable];
    }
    let missing = missing_fields(table, kit_type);
    if !missing.is_empty() {
        return vec![ExportError::MissingFields { fields: missing }];
    }
    kit_type
        .index_sets
        .iter()
        .filter_map(|set| index_set_rows(table, set).err())
        .collect()
}

/// Assemble the full export document.
pub fn export(
    table: &Table,
    kit_type: &KitType,
    session: &SessionInfo,
    resource: &ResourceSettings,
    kit_info: &IndexKitInfo,
) -> Result<ExportRecord, ExportError> {
    let indexes = group_index_sets(table, kit_type)?;
    Ok(ExportRecord {
        user_info: session.clone(),
        resource: resource.clone(),
        index_kit: kit_info.clone(),
        indexes,
    })
}
