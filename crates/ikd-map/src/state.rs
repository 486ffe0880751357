//! Relabeling state over the working table.
//!
//! Column labels are freely mutable, but the pre-change label of each column
//! is remembered the first time it changes, giving a one-level restore
//! history keyed by column position. Entries are independent per column;
//! there is no global undo stack.

use std::collections::BTreeMap;

use ikd_model::{Table, TableError};

use crate::error::MappingError;

#[derive(Debug, Clone, Default)]
pub struct HeaderState {
    table: Table,
    original_labels: BTreeMap<usize, String>,
}

impl HeaderState {
    pub fn new(table: Table) -> Self {
        Self {
            table,
            original_labels: BTreeMap::new(),
        }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn current_labels(&self) -> &[String] {
        self.table.columns()
    }

    /// The remembered pre-relabel label of a column, if it ever changed.
    pub fn original_label(&self, index: usize) -> Option<&str> {
        self.original_labels.get(&index).map(String::as_str)
    }

    /// Bulk-load a fresh table, discarding all relabel history.
    pub fn replace(&mut self, table: Table) {
        self.table = table;
        self.original_labels.clear();
    }

    /// Set the label at `index`, returning the previous label.
    ///
    /// A label is worn by at most one column: if another column currently
    /// wears `new_label`, that column first reverts to its own recorded
    /// original (and forgets it). A column whose loaded header already
    /// matched has nothing recorded and is left untouched.
    ///
    /// The first relabel of a column records its pre-change label as the
    /// original; later relabels keep that record. Relabeling to the current
    /// label is a complete no-op.
    pub fn relabel(&mut self, index: usize, new_label: &str) -> Result<String, MappingError> {
        let current = self
            .table
            .label(index)
            .map_err(table_to_mapping_error)?
            .to_string();
        if current == new_label {
            return Ok(current);
        }

        if let Some(other) = self.table.column_index(new_label)
            && other != index
            && let Some(original) = self.original_labels.remove(&other)
        {
            self.table
                .set_label(other, original)
                .map_err(table_to_mapping_error)?;
        }

        self.original_labels
            .entry(index)
            .or_insert_with(|| current.clone());
        self.table
            .set_label(index, new_label.to_string())
            .map_err(table_to_mapping_error)?;
        Ok(current)
    }

    /// Reset a column to its remembered original and forget the record.
    /// Returns the restored label, or `None` when nothing was remembered.
    pub fn restore_original(&mut self, index: usize) -> Result<Option<String>, MappingError> {
        if index >= self.table.column_count() {
            return Err(MappingError::ColumnOutOfRange {
                index,
                count: self.table.column_count(),
            });
        }
        let Some(original) = self.original_labels.remove(&index) else {
            return Ok(None);
        };
        self.table
            .set_label(index, original.clone())
            .map_err(table_to_mapping_error)?;
        Ok(Some(original))
    }

    /// Restore the column currently wearing `label`, if any.
    pub fn restore_original_for_label(
        &mut self,
        label: &str,
    ) -> Result<Option<String>, MappingError> {
        match self.table.column_index(label) {
            Some(index) => self.restore_original(index),
            None => Ok(None),
        }
    }

    /// Apply [`Self::restore_original`] to every column with a record.
    pub fn restore_all_originals(&mut self) {
        let restorable: Vec<usize> = self.original_labels.keys().copied().collect();
        for index in restorable {
            // Indices with records are always in range; replace() clears them.
            let _ = self.restore_original(index);
        }
    }
}

fn table_to_mapping_error(error: TableError) -> MappingError {
    match error {
        TableError::ColumnOutOfRange { index, count } => {
            MappingError::ColumnOutOfRange { index, count }
        }
        // Shape errors cannot arise from label mutation on a valid table.
        TableError::Shape { row, expected, found } => {
            unreachable!("label edit produced shape error: row {row}, {found}/{expected}")
        }
    }
}
