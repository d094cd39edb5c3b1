use crate::error::{Result, TableError};

/// Zero-based cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for CellPos {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// The cell matrix of one open document.
///
/// Rows are not required to share a length: whatever shape the file had on
/// load is kept, and `insert_col` extends every row by one regardless.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<String>>,
    /// Marks row 0 as a header when rendering; never touches the data
    header: bool,
}

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows, header: false }
    }

    pub fn with_header(mut self, header: bool) -> Self {
        self.header = header;
        self
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Iterator over all rows
    pub fn rows_iter(&self) -> impl Iterator<Item = &Vec<String>> {
        self.rows.iter()
    }

    pub fn get_row(&self, idx: usize) -> Option<&[String]> {
        self.rows.get(idx).map(Vec::as_slice)
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Option<&String> {
        self.rows.get(row)?.get(col)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of cells in a single row (0 for rows that don't exist)
    pub fn row_len(&self, row: usize) -> usize {
        self.rows.get(row).map_or(0, Vec::len)
    }

    /// Width of the widest row
    pub fn col_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// True if `pos` addresses an existing cell
    pub fn contains(&self, pos: CellPos) -> bool {
        pos.col < self.row_len(pos.row)
    }

    pub fn has_header(&self) -> bool {
        self.header
    }

    pub fn is_header_row(&self, row: usize) -> bool {
        self.header && row == 0
    }

    pub fn toggle_header(&mut self) {
        self.header = !self.header;
    }

    /// Append an empty row as wide as the first row (or a single cell if the
    /// table has no rows yet or the first row is empty)
    pub fn insert_row(&mut self) {
        let width = self.rows.first().map_or(1, Vec::len).max(1);
        self.rows.push(vec![String::new(); width]);
    }

    /// Append one empty cell to every row
    pub fn insert_col(&mut self) {
        for row in self.rows.iter_mut() {
            row.push(String::new());
        }
    }

    pub fn set_cell(&mut self, row: usize, col: usize, value: String) -> Result<()> {
        let cell = self
            .rows
            .get_mut(row)
            .and_then(|r| r.get_mut(col))
            .ok_or(TableError::OutOfBounds { row, col })?;
        *cell = value;
        Ok(())
    }

    /// Clone all rows for a history snapshot
    pub fn clone_all_rows(&self) -> Vec<Vec<String>> {
        self.rows.clone()
    }

    /// Swap in a previously captured set of rows, returning the current ones
    pub fn replace_rows(&mut self, rows: Vec<Vec<String>>) -> Vec<Vec<String>> {
        std::mem::replace(&mut self.rows, rows)
    }
}
