use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("csv parse error: {0}")]
    Csv(#[from] csv::Error),
    #[error("spreadsheet error in {path}: {message}")]
    Spreadsheet { path: PathBuf, message: String },
    #[error("spreadsheet {0} has no worksheets")]
    NoWorksheet(PathBuf),
    #[error("line {line}: data before any [Section] header")]
    OrphanLine { line: usize },
    #[error("section [{section}] is malformed: {reason}")]
    Section { section: String, reason: String },
}
