//! Delimited-text adapter with delimiter auto-detection.

use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::IngestError;
use crate::raw::RawTable;

/// Delimiters considered by the sniffer, in preference order on ties.
const CANDIDATE_DELIMITERS: [u8; 4] = [b'\t', b',', b';', b'|'];

/// Pick the delimiter occurring most often in the first non-empty line.
/// Falls back to comma when nothing matches.
pub fn sniff_delimiter(content: &str) -> u8 {
    let Some(line) = content.lines().find(|line| !line.trim().is_empty()) else {
        return b',';
    };
    let mut best = b',';
    let mut best_count = 0usize;
    for candidate in CANDIDATE_DELIMITERS {
        let count = line.bytes().filter(|b| *b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

/// Parse delimited text into the common tabular shape. The first record is
/// the header row.
pub fn read_delimited_str(content: &str) -> Result<RawTable, IngestError> {
    let delimiter = sniff_delimiter(content);
    debug!(delimiter = %(delimiter as char), "sniffed delimiter");
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());
    let mut records = Vec::new();
    for record in reader.records() {
        let record = record?;
        records.push(record.iter().map(ToString::to_string).collect());
    }
    Ok(RawTable::from_records(records))
}

pub fn read_delimited(path: &Path) -> Result<RawTable, IngestError> {
    let content = std::fs::read_to_string(path).map_err(|source| IngestError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    read_delimited_str(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_common_delimiters() {
        assert_eq!(sniff_delimiter("a,b,c\n1,2,3"), b',');
        assert_eq!(sniff_delimiter("a;b;c\n1;2;3"), b';');
        assert_eq!(sniff_delimiter("a\tb\tc"), b'\t');
        assert_eq!(sniff_delimiter("a|b|c"), b'|');
        assert_eq!(sniff_delimiter("single_column"), b',');
    }

    #[test]
    fn reads_semicolon_table() {
        let raw = read_delimited_str("pos;name;seq\n1;Idx1;ACGT\n2;Idx2;ACGG\n").unwrap();
        assert_eq!(raw.headers, ["pos", "name", "seq"]);
        assert_eq!(raw.rows.len(), 2);
        assert_eq!(raw.rows[1], ["2", "Idx2", "ACGG"]);
    }

    #[test]
    fn short_rows_are_padded() {
        let raw = read_delimited_str("a,b,c\n1,2\n").unwrap();
        assert_eq!(raw.rows, [["1", "2", ""]]);
    }
}
