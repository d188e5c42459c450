//! Dense 2-D store for the table being processed.
//!
//! Every row holds the same number of cells once [`Table::normalize`] has
//! run, and all mutations preserve that shape: column operations fan out to
//! every row, and row insertion produces a row of the current column count.

pub mod io;

use crate::format::parse_number;

/// A single cell: raw text, quotes and escapes preserved verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    content: String,
}

impl Cell {
    pub fn new() -> Self {
        Cell::default()
    }

    pub fn from_text(text: &str) -> Self {
        Cell {
            content: text.to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.content
    }

    /// Replace the content with a copy of `text`.
    pub fn set(&mut self, text: &str) {
        self.content.clear();
        self.content.push_str(text);
    }

    pub fn clear(&mut self) {
        self.content.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Content length in bytes.
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Numeric value when the whole content parses as one.
    pub fn as_number(&self) -> Option<f64> {
        parse_number(&self.content)
    }
}

/// One table row.
#[derive(Debug, Clone, Default)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// A row of `width` empty cells.
    pub fn empty(width: usize) -> Self {
        Row {
            cells: vec![Cell::new(); width],
        }
    }

    pub fn from_cells(cells: Vec<Cell>) -> Self {
        Row { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn push_empty(&mut self) {
        self.cells.push(Cell::new());
    }
}

/// The whole table plus the delimiter byte used on output.
#[derive(Debug, Clone)]
pub struct Table {
    rows: Vec<Row>,
    delim: u8,
}

impl Table {
    pub fn new(delim: u8) -> Self {
        Table {
            rows: Vec::new(),
            delim,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    /// Column count. Zero for a table with no rows.
    pub fn cols(&self) -> usize {
        self.rows.first().map_or(0, Row::len)
    }

    pub fn delim(&self) -> u8 {
        self.delim
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|r| r.cells.get(col))
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row).and_then(|r| r.cells.get_mut(col))
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &Row> {
        self.rows.iter()
    }

    pub(crate) fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// All rows currently share one width.
    pub fn is_rectangular(&self) -> bool {
        let width = self.cols();
        self.rows.iter().all(|r| r.len() == width)
    }

    /// Insert an empty row at `at` (clamped to the end), shifting later rows
    /// down. The new row gets the current column count.
    pub fn insert_row(&mut self, at: usize) {
        let width = self.cols();
        let at = at.min(self.rows.len());
        self.rows.insert(at, Row::empty(width));
    }

    /// Delete rows `from..=to`, clamped to the last row. No-op when `from`
    /// is past the end.
    pub fn delete_rows(&mut self, from: usize, to: usize) {
        if from >= self.rows.len() {
            return;
        }
        let to = to.min(self.rows.len() - 1);
        self.rows.drain(from..=to);
    }

    /// Insert an empty column at `at` (clamped) in every row.
    pub fn insert_column(&mut self, at: usize) {
        let at = at.min(self.cols());
        for row in &mut self.rows {
            row.cells.insert(at, Cell::new());
        }
    }

    /// Delete columns `from..=to` in every row, clamped to the last column.
    /// No-op when `from` is past the end.
    pub fn delete_columns(&mut self, from: usize, to: usize) {
        let cols = self.cols();
        if from >= cols {
            return;
        }
        let to = to.min(cols - 1);
        for row in &mut self.rows {
            row.cells.drain(from..=to);
        }
    }

    /// Exchange the contents of two cells. Identical or out-of-range
    /// coordinates are no-ops.
    pub fn swap_cells(&mut self, a: (usize, usize), b: (usize, usize)) {
        if a == b || self.cell(a.0, a.1).is_none() || self.cell(b.0, b.1).is_none() {
            return;
        }
        let first = std::mem::take(&mut self.rows[a.0].cells[a.1].content);
        let second = std::mem::replace(&mut self.rows[b.0].cells[b.1].content, first);
        self.rows[a.0].cells[a.1].content = second;
    }

    /// Pad every row to the widest row, then trim trailing all-empty columns
    /// down to (but never including) column 0.
    pub fn normalize(&mut self) {
        let width = self.rows.iter().map(Row::len).max().unwrap_or(0);
        for row in &mut self.rows {
            while row.len() < width {
                row.push_empty();
            }
        }

        for col in (1..width).rev() {
            if self.rows.iter().any(|r| !r.cells[col].is_empty()) {
                break;
            }
            for row in &mut self.rows {
                row.cells.remove(col);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_from(rows: &[&[&str]]) -> Table {
        let mut table = Table::new(b',');
        for cells in rows {
            table.push_row(Row::from_cells(cells.iter().map(|c| Cell::from_text(c)).collect()));
        }
        table
    }

    #[test]
    fn test_dimensions() {
        let table = table_from(&[&["a", "b"], &["c", "d"]]);
        assert_eq!(table.rows(), 2);
        assert_eq!(table.cols(), 2);
        assert!(table.is_rectangular());
    }

    #[test]
    fn test_insert_row_gets_current_width() {
        let mut table = table_from(&[&["a", "b"], &["c", "d"]]);
        table.insert_row(1);
        assert_eq!(table.rows(), 3);
        assert!(table.is_rectangular());
        assert_eq!(table.cell(1, 0).unwrap().as_str(), "");
        assert_eq!(table.cell(2, 0).unwrap().as_str(), "c");
    }

    #[test]
    fn test_insert_row_clamps_to_end() {
        let mut table = table_from(&[&["a"]]);
        table.insert_row(99);
        assert_eq!(table.rows(), 2);
        assert_eq!(table.cell(0, 0).unwrap().as_str(), "a");
    }

    #[test]
    fn test_delete_rows_clamps() {
        let mut table = table_from(&[&["a"], &["b"], &["c"]]);
        table.delete_rows(1, 99);
        assert_eq!(table.rows(), 1);
        assert_eq!(table.cell(0, 0).unwrap().as_str(), "a");

        table.delete_rows(5, 9);
        assert_eq!(table.rows(), 1);
    }

    #[test]
    fn test_insert_column_fans_out() {
        let mut table = table_from(&[&["a", "b"], &["c", "d"]]);
        table.insert_column(0);
        assert!(table.is_rectangular());
        assert_eq!(table.cols(), 3);
        assert_eq!(table.cell(0, 0).unwrap().as_str(), "");
        assert_eq!(table.cell(0, 1).unwrap().as_str(), "a");
        assert_eq!(table.cell(1, 1).unwrap().as_str(), "c");
    }

    #[test]
    fn test_delete_columns_fans_out() {
        let mut table = table_from(&[&["a", "b", "c"], &["d", "e", "f"]]);
        table.delete_columns(1, 1);
        assert!(table.is_rectangular());
        assert_eq!(table.cols(), 2);
        assert_eq!(table.cell(0, 1).unwrap().as_str(), "c");
        assert_eq!(table.cell(1, 1).unwrap().as_str(), "f");
    }

    #[test]
    fn test_swap_cells() {
        let mut table = table_from(&[&["a", "b"]]);
        table.swap_cells((0, 0), (0, 1));
        assert_eq!(table.cell(0, 0).unwrap().as_str(), "b");
        assert_eq!(table.cell(0, 1).unwrap().as_str(), "a");

        // Out of range is a no-op.
        table.swap_cells((0, 0), (5, 5));
        assert_eq!(table.cell(0, 0).unwrap().as_str(), "b");
    }

    #[test]
    fn test_normalize_pads_short_rows() {
        let mut table = table_from(&[&["a", "b", "c"], &["d"]]);
        table.normalize();
        assert!(table.is_rectangular());
        assert_eq!(table.cols(), 3);
        assert_eq!(table.cell(1, 2).unwrap().as_str(), "");
    }

    #[test]
    fn test_normalize_trims_trailing_empty_columns() {
        let mut table = table_from(&[&["a", "", ""], &["b", "", ""]]);
        table.normalize();
        assert_eq!(table.cols(), 1);
    }

    #[test]
    fn test_normalize_stops_at_first_non_empty_column() {
        let mut table = table_from(&[&["a", "", "x", ""], &["b", "", "", ""]]);
        table.normalize();
        assert_eq!(table.cols(), 3);
    }

    #[test]
    fn test_normalize_never_trims_column_zero() {
        let mut table = table_from(&[&[""], &[""]]);
        table.normalize();
        assert_eq!(table.cols(), 1);
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let mut table = table_from(&[&["a", "b", ""], &["c"]]);
        table.normalize();
        let once: Vec<Vec<String>> = table
            .iter_rows()
            .map(|r| r.cells().map(|c| c.as_str().to_string()).collect())
            .collect();
        table.normalize();
        let twice: Vec<Vec<String>> = table
            .iter_rows()
            .map(|r| r.cells().map(|c| c.as_str().to_string()).collect())
            .collect();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_cell_numeric_view() {
        let cell = Cell::from_text("4.25");
        assert_eq!(cell.as_number(), Some(4.25));
        assert_eq!(Cell::from_text("4x").as_number(), None);
        assert_eq!(Cell::new().as_number(), None);
    }
}
