//! Key-driven cell navigation.

use crate::table::{CellPos, Table};

/// Keys the grid reacts to. Everything else is carried as `Other` so the
/// host can tell the key went unhandled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    ArrowRight,
    ArrowLeft,
    ArrowDown,
    ArrowUp,
    /// Confirm (Enter)
    Enter,
    Other(String),
}

impl Key {
    /// Map a key name (`"ArrowDown"`, `"Enter"`, ...) to a `Key`
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowRight" => Key::ArrowRight,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowDown" => Key::ArrowDown,
            "ArrowUp" => Key::ArrowUp,
            "Enter" => Key::Enter,
            other => Key::Other(other.to_string()),
        }
    }

    /// Row and column offset for navigation keys
    fn delta(&self) -> Option<(isize, isize)> {
        match self {
            Key::ArrowRight => Some((0, 1)),
            Key::ArrowLeft => Some((0, -1)),
            Key::ArrowDown | Key::Enter => Some((1, 0)),
            Key::ArrowUp => Some((-1, 0)),
            Key::Other(_) => None,
        }
    }
}

/// Outcome of a key press on a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Motion {
    /// Not a navigation key; the host should keep its default behavior
    Unhandled,
    /// Navigation key, but the target is outside the grid
    Blocked,
    To(CellPos),
}

impl Motion {
    /// Whether the host should suppress its default key handling
    pub fn is_handled(&self) -> bool {
        !matches!(self, Motion::Unhandled)
    }
}

fn offset(pos: CellPos, (dr, dc): (isize, isize)) -> Option<CellPos> {
    Some(CellPos::new(
        pos.row.checked_add_signed(dr)?,
        pos.col.checked_add_signed(dc)?,
    ))
}

/// Coordinate-only navigation: the adjacent position for a navigation key,
/// or the input unchanged for other keys and for moves past row/column 0
pub fn next_position(key: &Key, row: usize, col: usize) -> (usize, usize) {
    let pos = CellPos::new(row, col);
    key.delta()
        .and_then(|d| offset(pos, d))
        .map_or((row, col), |p| (p.row, p.col))
}

/// Navigation checked against the table's shape. Ragged rows count: moving
/// down into a shorter row is blocked if that row has no cell in this column.
pub fn navigate(key: &Key, pos: CellPos, table: &Table) -> Motion {
    let Some(delta) = key.delta() else {
        return Motion::Unhandled;
    };
    match offset(pos, delta) {
        Some(target) if table.contains(target) => Motion::To(target),
        _ => Motion::Blocked,
    }
}
