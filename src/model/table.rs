//! Table, Row, and Cell data structures

use std::ops::Index;

use serde::{Deserialize, Serialize};

/// A single text field, already unescaped
pub type Cell = String;

/// A row in the table
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Create a row from its cells
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Get a cell by column index
    pub fn get(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(String::as_str)
    }

    /// Cells in column order
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cell> {
        self.cells.iter()
    }

    /// True for a row whose only cell is empty, i.e. a blank source line
    pub(crate) fn is_blank(&self) -> bool {
        matches!(self.cells.as_slice(), [only] if only.is_empty())
    }
}

impl Index<usize> for Row {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.cells[index]
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Row::new(cells)
    }
}

impl From<Vec<&str>> for Row {
    fn from(cells: Vec<&str>) -> Self {
        Row::new(cells.into_iter().map(str::to_string).collect())
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = &'a Cell;
    type IntoIter = std::slice::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

/// An ordered, read-only snapshot of parsed rows.
///
/// Rows keep source order and may have different lengths. The first row is
/// usually a header, but nothing here depends on that.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from already-split rows
    pub fn from_rows<R: Into<Row>>(rows: impl IntoIterator<Item = R>) -> Self {
        Self {
            rows: rows.into_iter().map(Into::into).collect(),
        }
    }

    /// All rows in source order
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Get a row by index
    pub fn get(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Number of rows, header included
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Length of the longest row
    pub fn max_width(&self) -> usize {
        self.rows.iter().map(Row::len).max().unwrap_or(0)
    }

    /// True when rows differ in length
    pub fn is_ragged(&self) -> bool {
        let mut widths = self.rows.iter().map(Row::len);
        match widths.next() {
            Some(first) => widths.any(|w| w != first),
            None => false,
        }
    }

    /// First row, by convention the header
    pub fn header(&self) -> Option<&Row> {
        self.rows.first()
    }

    /// Every row after the header
    pub fn data_rows(&self) -> &[Row] {
        self.rows.get(1..).unwrap_or(&[])
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_data_rows() {
        let table = Table::from_rows(vec![vec!["name", "qty"], vec!["bolt", "4"], vec!["nut", "9"]]);

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.header().unwrap().cells(), ["name", "qty"]);
        assert_eq!(table.data_rows().len(), 2);
        assert_eq!(&table.data_rows()[1][0], "nut");
    }

    #[test]
    fn test_empty_table() {
        let table = Table::new();

        assert!(table.is_empty());
        assert!(table.header().is_none());
        assert!(table.data_rows().is_empty());
        assert_eq!(table.max_width(), 0);
        assert!(!table.is_ragged());
    }

    #[test]
    fn test_ragged_rows_are_kept() {
        let table = Table::from_rows(vec![vec!["a", "b", "c"], vec!["1"], vec!["x", "y"]]);

        assert!(table.is_ragged());
        assert_eq!(table.max_width(), 3);
        assert_eq!(table.get(1).unwrap().len(), 1);
    }

    #[test]
    fn test_blank_row() {
        assert!(Row::from(vec![""]).is_blank());
        assert!(!Row::from(vec!["", ""]).is_blank());
        assert!(!Row::from(vec![" "]).is_blank());
        assert!(!Row::default().is_blank());
    }

    #[test]
    fn test_serializes_as_nested_arrays() {
        let table = Table::from_rows(vec![vec!["a", "b"], vec!["1"]]);
        let json = serde_json::to_string(&table).unwrap();

        assert_eq!(json, r#"[["a","b"],["1"]]"#);
    }
}
