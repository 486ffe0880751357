//! Common tabular shape produced by every adapter.

use ikd_model::{Table, TableError};

/// Normalized headers and string rows, before conversion into the working
/// table. Rows are already padded to header width and fully blank rows
/// dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build a raw table from unpadded records: the first record is the
    /// header row, the rest are data. Short rows are padded, long rows
    /// truncated to header width.
    pub fn from_records(records: Vec<Vec<String>>) -> Self {
        let mut records = records.into_iter();
        let Some(header_row) = records.next() else {
            return Self::default();
        };
        let headers: Vec<String> = header_row.iter().map(|h| normalize_header(h)).collect();
        let rows = records
            .map(|record| {
                (0..headers.len())
                    .map(|idx| normalize_cell(record.get(idx).map(String::as_str).unwrap_or("")))
                    .collect::<Vec<String>>()
            })
            .filter(|row| !row.iter().all(String::is_empty))
            .collect();
        Self { headers, rows }
    }

    /// Convert into the working table; blank cells become unset.
    pub fn into_table(self) -> Result<Table, TableError> {
        let rows = self
            .rows
            .into_iter()
            .map(|row| {
                row.into_iter()
                    .map(|cell| if cell.is_empty() { None } else { Some(cell) })
                    .collect()
            })
            .collect();
        Table::new(self.headers, rows)
    }
}

/// Collapse internal whitespace runs and strip BOM markers from a header.
pub fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

pub fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_are_padded_and_blank_rows_dropped() {
        let raw = RawTable::from_records(vec![
            vec!["  Pos ".to_string(), "Name\u{feff}".to_string(), "Sequence".to_string()],
            vec!["1".to_string(), "Idx1".to_string()],
            vec![String::new(), String::new(), String::new()],
        ]);
        assert_eq!(raw.headers, ["Pos", "Name", "Sequence"]);
        assert_eq!(raw.rows, [["1", "Idx1", ""]]);
    }

    #[test]
    fn into_table_maps_empty_to_unset() {
        let raw = RawTable {
            headers: vec!["a".to_string(), "b".to_string()],
            rows: vec![vec!["1".to_string(), String::new()]],
        };
        let table = raw.into_table().unwrap();
        assert_eq!(table.cell(0, 0), Some("1"));
        assert_eq!(table.cell(0, 1), None);
    }

    #[test]
    fn header_whitespace_is_collapsed() {
        assert_eq!(normalize_header("  index   i7  name "), "index i7 name");
    }
}
