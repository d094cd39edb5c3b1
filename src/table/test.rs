use super::table::*;

use crate::error::TableError;

fn make_table(data: Vec<Vec<&str>>) -> Table {
    Table::new(
        data.into_iter()
            .map(|row| row.into_iter().map(|s| s.to_string()).collect())
            .collect()
    )
}

/// Helper to get a row as Vec<String> for assertion comparisons
fn row(table: &Table, idx: usize) -> Vec<String> {
    table.get_row(idx).unwrap().to_vec()
}

fn cell(table: &Table, r: usize, c: usize) -> String {
    table.get_cell(r, c).unwrap().clone()
}

// === insert_row ===

#[test]
fn insert_row_matches_first_row_width() {
    let mut table = make_table(vec![
        vec!["a", "b", "c"],
        vec!["d", "e", "f"],
    ]);
    table.insert_row();

    assert_eq!(table.row_count(), 3);
    assert_eq!(row(&table, 2), vec!["", "", ""]);
}

#[test]
fn insert_row_uses_first_row_even_when_ragged() {
    let mut table = make_table(vec![
        vec!["a", "b"],
        vec!["c", "d", "e", "f"],
    ]);
    table.insert_row();

    assert_eq!(table.row_len(2), 2);
}

#[test]
fn insert_row_into_empty_table_has_one_cell() {
    let mut table = Table::default();
    table.insert_row();

    assert_eq!(table.row_count(), 1);
    assert_eq!(row(&table, 0), vec![""]);
}

#[test]
fn insert_row_after_empty_first_row_has_one_cell() {
    let mut table = Table::new(vec![vec![], vec!["a".to_string(), "b".to_string()]]);
    table.insert_row();

    assert_eq!(table.row_count(), 3);
    assert_eq!(row(&table, 2), vec![""]);
    assert!(table.contains(CellPos::new(2, 0)));
}

#[test]
fn insert_row_always_appends() {
    let mut table = make_table(vec![vec!["a"], vec!["b"]]);
    table.insert_row();

    assert_eq!(cell(&table, 0, 0), "a");
    assert_eq!(cell(&table, 1, 0), "b");
    assert_eq!(cell(&table, 2, 0), "");
}

// === insert_col ===

#[test]
fn insert_col_extends_each_row_by_one() {
    let mut table = make_table(vec![
        vec!["a"],
        vec!["b", "c", "d"],
        vec!["e", "f"],
    ]);
    table.insert_col();

    assert_eq!(table.row_len(0), 2);
    assert_eq!(table.row_len(1), 4);
    assert_eq!(table.row_len(2), 3);
    assert_eq!(row(&table, 0), vec!["a", ""]);
    assert_eq!(row(&table, 1), vec!["b", "c", "d", ""]);
}

#[test]
fn insert_col_on_empty_table_is_noop() {
    let mut table = Table::default();
    table.insert_col();
    assert!(table.is_empty());
}

// === set_cell ===

#[test]
fn set_cell_in_bounds() {
    let mut table = make_table(vec![vec!["a", "b"], vec!["c", "d"]]);
    table.set_cell(1, 0, "x".to_string()).unwrap();
    assert_eq!(cell(&table, 1, 0), "x");
}

#[test]
fn set_cell_out_of_bounds_row() {
    let mut table = make_table(vec![vec!["a", "b"]]);
    let before = table.clone();

    let err = table.set_cell(5, 0, "x".to_string()).unwrap_err();
    assert!(matches!(err, TableError::OutOfBounds { row: 5, col: 0 }));
    assert_eq!(table, before);
}

#[test]
fn set_cell_past_short_row_does_not_grow_it() {
    let mut table = make_table(vec![vec!["a", "b", "c"], vec!["d"]]);

    assert!(table.set_cell(1, 2, "x".to_string()).is_err());
    assert_eq!(table.row_len(1), 1);
}

// === shape ===

#[test]
fn col_count_is_widest_row() {
    let table = make_table(vec![vec!["a"], vec!["b", "c", "d"]]);
    assert_eq!(table.col_count(), 3);
    assert_eq!(table.row_len(0), 1);
    assert_eq!(table.row_len(9), 0);
}

#[test]
fn contains_respects_ragged_rows() {
    let table = make_table(vec![vec!["a", "b"], vec!["c"]]);
    assert!(table.contains(CellPos::new(0, 1)));
    assert!(!table.contains(CellPos::new(1, 1)));
    assert!(!table.contains(CellPos::new(2, 0)));
}

// === header ===

#[test]
fn toggle_header_does_not_touch_data() {
    let mut table = make_table(vec![vec!["name", "age"], vec!["ann", "4"]]);
    let rows = table.clone_all_rows();

    assert!(!table.is_header_row(0));
    table.toggle_header();
    assert!(table.has_header());
    assert!(table.is_header_row(0));
    assert!(!table.is_header_row(1));
    assert_eq!(table.clone_all_rows(), rows);

    table.toggle_header();
    assert!(!table.has_header());
}

// === snapshot helpers ===

#[test]
fn replace_rows_returns_previous() {
    let mut table = make_table(vec![vec!["a"]]);
    let old = table.replace_rows(vec![vec!["z".to_string()]]);

    assert_eq!(old, vec![vec!["a".to_string()]]);
    assert_eq!(cell(&table, 0, 0), "z");
}

// === column widths ===

#[test]
fn column_widths_clamped() {
    let table = make_table(vec![
        vec!["a", "a much longer cell than allowed"],
        vec!["bb"],
    ]);
    assert_eq!(table.column_widths(10), vec![3, 10]);
}

#[test]
fn column_widths_count_wide_chars() {
    let table = make_table(vec![vec!["日本語"]]);
    assert_eq!(table.column_widths(30), vec![6]);
}

#[test]
fn column_widths_parallel_path_matches() {
    let rows: Vec<Vec<String>> = (0..5_000)
        .map(|i| vec![i.to_string(), "xx".to_string(), "yyyyy".to_string()])
        .collect();
    let table = Table::new(rows);

    assert_eq!(table.column_widths(30), vec![4, 3, 5]);
}
