use rayon::prelude::*;
use unicode_width::UnicodeWidthStr;

use super::table::Table;

/// Threshold for using parallel processing (rows * cols)
const PARALLEL_THRESHOLD: usize = 10_000;

/// Narrowest column the renderer will draw
pub const MIN_COL_WIDTH: usize = 3;

/// Terminal display width of a cell
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

fn column_width(rows: &[Vec<String>], col: usize, max_width: usize) -> usize {
    rows.iter()
        .filter_map(|row| row.get(col))
        .map(|s| display_width(s))
        .max()
        .unwrap_or(MIN_COL_WIDTH)
        .max(MIN_COL_WIDTH)
        .min(max_width)
}

impl Table {
    /// Display width of every column, clamped to `[MIN_COL_WIDTH, max_width]`.
    /// Short rows simply don't contribute to the columns they lack.
    pub fn column_widths(&self, max_width: usize) -> Vec<usize> {
        let rows = self.rows();
        let col_count = self.col_count();
        let max_width = max_width.max(MIN_COL_WIDTH);

        if rows.len() * col_count >= PARALLEL_THRESHOLD && col_count > 1 {
            (0..col_count)
                .into_par_iter()
                .map(|col| column_width(rows, col, max_width))
                .collect()
        } else {
            (0..col_count)
                .map(|col| column_width(rows, col, max_width))
                .collect()
        }
    }
}
