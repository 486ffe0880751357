//! Error types for remapping operations.

use std::fmt;

/// Errors from remapping operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    /// Column index outside the current table. Contract violation from the
    /// caller, not a user-data problem.
    ColumnOutOfRange { index: usize, count: usize },
    /// Field does not belong to the active kit type.
    UnknownField { field: String, kit_type: String },
}

impl fmt::Display for MappingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColumnOutOfRange { index, count } => {
                write!(f, "column index {index} out of range ({count} columns)")
            }
            Self::UnknownField { field, kit_type } => {
                write!(f, "field '{field}' is not part of kit type '{kit_type}'")
            }
        }
    }
}

impl std::error::Error for MappingError {}
