//! Spreadsheet adapter: first worksheet of an xlsx workbook, first row as
//! the header.

use std::path::Path;

use calamine::{Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::error::IngestError;
use crate::raw::RawTable;

pub fn read_spreadsheet(path: &Path) -> Result<RawTable, IngestError> {
    let mut workbook: Xlsx<std::io::BufReader<std::fs::File>> =
        open_workbook(path).map_err(|e: calamine::XlsxError| IngestError::Spreadsheet {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let sheet_names = workbook.sheet_names();
    let Some(sheet_name) = sheet_names.first().cloned() else {
        return Err(IngestError::NoWorksheet(path.to_path_buf()));
    };
    debug!(sheet = %sheet_name, "reading worksheet");

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| IngestError::Spreadsheet {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let records: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    Ok(RawTable::from_records(records))
}
