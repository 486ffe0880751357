//! Column-level validation rules for barcode sequence tables.
//!
//! Every function here is a pure, stateless check over a column snapshot
//! (`&[Option<&str>]`, one entry per table row, top to bottom). Blank cells
//! (`None`, empty, or whitespace-only) are skipped by the per-value rules;
//! only [`non_empty`] treats blanks as a finding. Row numbers in diagnostics
//! are 1-based positions in the original, unfiltered table.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use ikd_model::is_blank;

/// Case-insensitive DNA alphabet: the four bases only.
pub static DNA_SEQUENCE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ACGTacgt]+$").expect("valid DNA pattern"));

/// What a column check found wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Violation {
    InvalidAlphabet,
    MixedLengths,
    DuplicateValues,
}

/// Structured result of a failed column check. Consumed immediately by the
/// notification sink, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDiagnostic {
    pub field: String,
    pub violation: Violation,
    /// 1-based row numbers in the original table.
    pub rows: Vec<usize>,
}

impl fmt::Display for ColumnDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.violation {
            Violation::InvalidAlphabet => write!(
                f,
                "{} data contains {} invalid non-empty sequences. Invalid rows: {:?}",
                self.field,
                self.rows.len(),
                self.rows
            ),
            Violation::MixedLengths => {
                write!(f, "{} column contains indexes of different lengths", self.field)
            }
            Violation::DuplicateValues => write!(
                f,
                "{} column contains duplicate values. Rows: {:?}",
                self.field, self.rows
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("sequence lengths are not uniform: {lengths:?}")]
pub struct AmbiguousLengthError {
    pub lengths: Vec<usize>,
}

/// Every non-empty cell must be drawn from the DNA alphabet. Blank cells are
/// skipped, not counted as violations.
pub fn valid_alphabet(field: &str, column: &[Option<&str>]) -> Result<(), ColumnDiagnostic> {
    let rows: Vec<usize> = column
        .iter()
        .enumerate()
        .filter(|(_, cell)| !is_blank(**cell) && !DNA_SEQUENCE_REGEX.is_match(cell.unwrap().trim()))
        .map(|(idx, _)| idx + 1)
        .collect();
    if rows.is_empty() {
        Ok(())
    } else {
        Err(ColumnDiagnostic {
            field: field.to_string(),
            violation: Violation::InvalidAlphabet,
            rows,
        })
    }
}

/// True iff the non-empty cells share exactly one length. Zero non-empty
/// cells is also false; callers check emptiness separately.
pub fn uniform_length(column: &[Option<&str>]) -> bool {
    distinct_lengths(column).len() == 1
}

/// True iff no cell in the given column set is blank, after dropping rows
/// that are blank across every column (unset trailing rows, not failures).
pub fn non_empty(columns: &[Vec<Option<&str>>]) -> bool {
    let Some(row_count) = columns.iter().map(Vec::len).max() else {
        return true;
    };
    for row in 0..row_count {
        let cells: Vec<Option<&str>> = columns
            .iter()
            .map(|col| col.get(row).copied().flatten())
            .collect();
        if cells.iter().all(|cell| is_blank(*cell)) {
            continue;
        }
        if cells.iter().any(|cell| is_blank(*cell)) {
            return false;
        }
    }
    true
}

/// True iff no two non-empty cells are textually identical.
pub fn unique(column: &[Option<&str>]) -> bool {
    let mut seen = HashSet::new();
    for cell in column {
        if is_blank(*cell) {
            continue;
        }
        if !seen.insert(cell.unwrap().trim()) {
            return false;
        }
    }
    true
}

/// Diagnostic-producing form of [`unique`]: lists the 1-based rows of
/// every repeated occurrence.
pub fn unique_with_rows(field: &str, column: &[Option<&str>]) -> Result<(), ColumnDiagnostic> {
    let mut seen = HashSet::new();
    let mut rows = Vec::new();
    for (idx, cell) in column.iter().enumerate() {
        if is_blank(*cell) {
            continue;
        }
        if !seen.insert(cell.unwrap().trim()) {
            rows.push(idx + 1);
        }
    }
    if rows.is_empty() {
        Ok(())
    } else {
        Err(ColumnDiagnostic {
            field: field.to_string(),
            violation: Violation::DuplicateValues,
            rows,
        })
    }
}

/// The common length of all non-empty cells. Requires [`uniform_length`] to
/// hold.
pub fn derive_cycle_length(column: &[Option<&str>]) -> Result<usize, AmbiguousLengthError> {
    let lengths = distinct_lengths(column);
    if lengths.len() == 1 {
        Ok(*lengths.iter().next().expect("one length"))
    } else {
        Err(AmbiguousLengthError {
            lengths: lengths.into_iter().collect(),
        })
    }
}

fn distinct_lengths(column: &[Option<&str>]) -> BTreeSet<usize> {
    column
        .iter()
        .filter(|cell| !is_blank(**cell))
        .map(|cell| cell.unwrap().trim().chars().count())
        .collect()
}
