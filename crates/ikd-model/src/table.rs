use std::collections::BTreeMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("row {row} has {found} cells, expected {expected}")]
    Shape {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("column index {index} out of range (table has {count} columns)")]
    ColumnOutOfRange { index: usize, count: usize },
}

/// True when a cell should be treated as unset: absent, empty, or
/// whitespace-only.
pub fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

/// The live working table: ordered column labels over rows of optional
/// string cells. Labels are freely mutable; cell values only change on a
/// bulk replace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl Table {
    /// Build a table, enforcing that every row is exactly as wide as the
    /// column list.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Result<Self, TableError> {
        let expected = columns.len();
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != expected {
                return Err(TableError::Shape {
                    row: idx,
                    expected,
                    found: row.len(),
                });
            }
        }
        Ok(Self { columns, rows })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.columns.is_empty()
    }

    pub fn label(&self, index: usize) -> Result<&str, TableError> {
        self.columns
            .get(index)
            .map(String::as_str)
            .ok_or(TableError::ColumnOutOfRange {
                index,
                count: self.columns.len(),
            })
    }

    /// Replace the label at `index`, returning the previous one.
    pub fn set_label(&mut self, index: usize, label: String) -> Result<String, TableError> {
        let count = self.columns.len();
        let slot = self
            .columns
            .get_mut(index)
            .ok_or(TableError::ColumnOutOfRange { index, count })?;
        Ok(std::mem::replace(slot, label))
    }

    /// Position of the first column wearing `label`.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == label)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|cell| cell.as_deref())
    }

    /// All cells of one column, top to bottom. Absent cells yield `None`.
    pub fn column_values(&self, index: usize) -> Result<Vec<Option<&str>>, TableError> {
        if index >= self.columns.len() {
            return Err(TableError::ColumnOutOfRange {
                index,
                count: self.columns.len(),
            });
        }
        Ok(self
            .rows
            .iter()
            .map(|row| row[index].as_deref())
            .collect())
    }

    /// Cells of the column currently labeled `label`, if such a column
    /// exists.
    pub fn column_by_label(&self, label: &str) -> Option<Vec<Option<&str>>> {
        let index = self.column_index(label)?;
        self.column_values(index).ok()
    }

    /// Materialize the table as label→value mappings, one per row. With
    /// duplicate labels the later column wins; meaningful export requires
    /// canonical labels to be unique, which the remap layer guarantees.
    pub fn as_rows(&self) -> Vec<BTreeMap<String, Option<String>>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().cloned())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(value: &str) -> Option<String> {
        Some(value.to_string())
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let result = Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![cell("1"), cell("2")], vec![cell("3")]],
        );
        assert!(matches!(
            result,
            Err(TableError::Shape {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
    }

    #[test]
    fn set_label_returns_previous() {
        let mut table = Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![cell("1"), cell("2")]],
        )
        .unwrap();
        let previous = table.set_label(1, "index_i7".to_string()).unwrap();
        assert_eq!(previous, "b");
        assert_eq!(table.columns(), ["a", "index_i7"]);
        assert!(table.set_label(5, "x".to_string()).is_err());
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(None));
        assert!(is_blank(Some("")));
        assert!(is_blank(Some("   ")));
        assert!(!is_blank(Some("ACGT")));
    }

    #[test]
    fn as_rows_keeps_unset_cells() {
        let table = Table::new(
            vec!["a".to_string(), "b".to_string()],
            vec![vec![cell("1"), None]],
        )
        .unwrap();
        let rows = table.as_rows();
        assert_eq!(rows[0]["a"], Some("1".to_string()));
        assert_eq!(rows[0]["b"], None);
    }
}
