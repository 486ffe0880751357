pub mod metadata;
pub mod sequence;

pub use metadata::{
    valid_adapter, valid_index_slot, valid_kit_name, valid_read_slot, valid_version,
    validate_kit_info, validate_resource_settings,
};
pub use sequence::{
    AmbiguousLengthError, ColumnDiagnostic, DNA_SEQUENCE_REGEX, Violation, derive_cycle_length,
    non_empty, unique, unique_with_rows, uniform_length, valid_alphabet,
};
