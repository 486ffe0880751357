pub mod delimited;
pub mod error;
pub mod illumina;
pub mod raw;
pub mod spreadsheet;

pub use delimited::{read_delimited, read_delimited_str, sniff_delimiter};
pub use error::IngestError;
pub use illumina::{IlluminaIndexKit, IndexEntry, OVERRIDE_CYCLES_TEMPLATE, Resource};
pub use raw::RawTable;
pub use spreadsheet::read_spreadsheet;
