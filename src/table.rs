pub mod column_widths;
pub mod table;

pub use column_widths::{display_width, MIN_COL_WIDTH};
pub use table::{CellPos, Table};

#[cfg(test)]
mod test;
