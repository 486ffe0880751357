//! Canonical-field remapping over the header state.
//!
//! This is the policy layer between the kit-layout vocabulary and the raw
//! relabeling mechanics: applying a field to a column relabels it, and for
//! the two sequence fields additionally re-derives the observed cycle
//! length. Invalid sequence data triggers a corrective action: the derived
//! slot is cleared (alphabet failures), the column label reverts to its
//! recorded original, and a warning is surfaced through the notification
//! sink. The relabel itself is not transactional; the revert is a second,
//! visible header change.

use tracing::debug;

use ikd_model::{
    CycleSlot, KitType, NotificationSink, OverrideCycles, SEQUENCE_FIELD_I5, SEQUENCE_FIELD_I7,
    Severity, Table, TableObserver,
};
use ikd_validate::{ColumnDiagnostic, Violation, derive_cycle_length, valid_alphabet};

use crate::error::MappingError;
use crate::state::HeaderState;

/// Result of applying a canonical field to a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemapOutcome {
    /// The column already wore this field; nothing happened.
    Unchanged,
    /// Label applied; the field carries no derived state.
    Applied { previous: String },
    /// Label applied and the cycle slot updated from the column data.
    AppliedWithCycles {
        previous: String,
        cycle_length: usize,
    },
    /// Validation of the newly labeled column failed; the label was
    /// reverted and a diagnostic surfaced.
    Reverted { diagnostic: ColumnDiagnostic },
}

pub struct RemapEngine {
    header: HeaderState,
    override_cycles: OverrideCycles,
    sink: Box<dyn NotificationSink>,
    observers: Vec<Box<dyn TableObserver>>,
}

impl RemapEngine {
    pub fn new(header: HeaderState, sink: Box<dyn NotificationSink>) -> Self {
        Self {
            header,
            override_cycles: OverrideCycles::default(),
            sink,
            observers: Vec::new(),
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn TableObserver>) {
        self.observers.push(observer);
    }

    pub fn header(&self) -> &HeaderState {
        &self.header
    }

    pub fn override_cycles(&self) -> &OverrideCycles {
        &self.override_cycles
    }

    pub fn override_cycles_mut(&mut self) -> &mut OverrideCycles {
        &mut self.override_cycles
    }

    /// Bulk-load a fresh table and notify renderers.
    pub fn replace_table(&mut self, table: Table) {
        self.header.replace(table);
        for observer in &self.observers {
            observer.table_replaced();
        }
    }

    /// Restore every relabeled column to its loaded header.
    pub fn restore_all_originals(&mut self) {
        self.header.restore_all_originals();
        for observer in &self.observers {
            observer.table_replaced();
        }
    }

    /// Map a canonical field name onto a table column.
    ///
    /// Sequence fields (`index_i7`, `index_i5`) synchronously re-derive the
    /// observed cycle length into the matching override-cycles slot. On
    /// validation failure the slot is cleared (alphabet) or left alone
    /// (length), the column reverts to its recorded original, and the sink
    /// receives a warning.
    pub fn apply_field_to_column(
        &mut self,
        kit_type: &KitType,
        column: usize,
        field: &str,
    ) -> Result<RemapOutcome, MappingError> {
        if !kit_type.has_field(field) {
            return Err(MappingError::UnknownField {
                field: field.to_string(),
                kit_type: kit_type.name.clone(),
            });
        }

        let previous = self.header.relabel(column, field)?;
        if previous == field {
            return Ok(RemapOutcome::Unchanged);
        }
        debug!(column, field, %previous, "column relabeled");
        self.notify_relabeled(column, field);

        let Some(slot) = cycle_slot_for_field(field) else {
            return Ok(RemapOutcome::Applied { previous });
        };

        let table = self.header.table();
        let values: Vec<Option<String>> = table
            .column_values(column)
            .map_err(|_| MappingError::ColumnOutOfRange {
                index: column,
                count: table.column_count(),
            })?
            .into_iter()
            .map(|cell| cell.map(ToString::to_string))
            .collect();
        let values: Vec<Option<&str>> = values.iter().map(Option::as_deref).collect();

        if let Err(diagnostic) = valid_alphabet(field, &values) {
            self.override_cycles.clear(slot);
            return self.revert_column(column, diagnostic);
        }

        match derive_cycle_length(&values) {
            Ok(cycle_length) => {
                self.override_cycles.set(slot, format!("I{cycle_length}"));
                Ok(RemapOutcome::AppliedWithCycles {
                    previous,
                    cycle_length,
                })
            }
            Err(_) => {
                let diagnostic = ColumnDiagnostic {
                    field: field.to_string(),
                    violation: Violation::MixedLengths,
                    rows: Vec::new(),
                };
                self.revert_column(column, diagnostic)
            }
        }
    }

    fn revert_column(
        &mut self,
        column: usize,
        diagnostic: ColumnDiagnostic,
    ) -> Result<RemapOutcome, MappingError> {
        if let Some(restored) = self.header.restore_original(column)? {
            self.notify_relabeled(column, &restored);
        }
        self.sink.notify(&diagnostic.to_string(), Severity::Warning);
        Ok(RemapOutcome::Reverted { diagnostic })
    }

    fn notify_relabeled(&self, column: usize, label: &str) {
        for observer in &self.observers {
            observer.column_relabeled(column, label);
        }
    }
}

fn cycle_slot_for_field(field: &str) -> Option<CycleSlot> {
    match field {
        SEQUENCE_FIELD_I7 => Some(CycleSlot::Index1),
        SEQUENCE_FIELD_I5 => Some(CycleSlot::Index2),
        _ => None,
    }
}
