use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table as RatatuiTable},
    Frame,
};

use crate::app::App;
use crate::mode::Mode;

/// Convert a column index to Excel-style letters (0 -> A, 25 -> Z, 26 -> AA, etc.)
fn col_to_letters(mut col: usize) -> String {
    let mut result = String::new();
    loop {
        result.insert(0, (b'A' + (col % 26) as u8) as char);
        if col < 26 {
            break;
        }
        col = col / 26 - 1;
    }
    result
}

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.size());

    render_table(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
    render_command_line(frame, app, chunks[2]);
}

/// Columns from `app.left_col` that fit in the viewport (at least one)
fn visible_columns(widths: &[usize], left: usize, available: usize) -> std::ops::Range<usize> {
    let mut used = 0;
    let mut end = left;
    while end < widths.len() {
        let w = widths[end] + 1;
        if end > left && used + w > available {
            break;
        }
        used += w;
        end += 1;
    }
    left..end
}

fn render_table(frame: &mut Frame, app: &App, area: Rect) {
    let table = app.editor.table();
    let widths = table.column_widths(app.max_col_width);
    let cols = visible_columns(&widths, app.left_col, app.viewport_width());
    let window = app.editor.render_window(app.top_row);
    let row_num_width = table.row_count().to_string().len().max(3);

    let mut constraints: Vec<Constraint> = Vec::with_capacity(cols.len() + 1);
    constraints.push(Constraint::Length(row_num_width as u16));
    constraints.extend(cols.clone().map(|c| Constraint::Length(widths[c] as u16)));

    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut header_cells: Vec<Cell> = Vec::with_capacity(cols.len() + 1);
    header_cells.push(Cell::from(""));
    for col in cols.clone() {
        let style = if col == app.cursor.col {
            header_style.bg(Color::DarkGray)
        } else {
            header_style
        };
        header_cells.push(Cell::from(col_to_letters(col)).style(style));
    }

    let rows: Vec<Row> = window
        .rows
        .iter()
        .take(app.viewport_rows())
        .enumerate()
        .map(|(offset, row)| {
            let row_idx = window.start + offset;
            let is_header_row = table.is_header_row(row_idx);

            let row_num_style = if row_idx == app.cursor.row {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let mut cells: Vec<Cell> = Vec::with_capacity(cols.len() + 1);
            cells.push(Cell::from((row_idx + 1).to_string()).style(row_num_style));

            for col in cols.clone() {
                // short rows leave trailing columns blank
                let Some(content) = row.get(col) else {
                    cells.push(Cell::from(""));
                    continue;
                };
                let is_cursor = row_idx == app.cursor.row && col == app.cursor.col;

                let style = if is_cursor {
                    Style::default()
                        .bg(Color::Blue)
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD)
                } else if is_header_row {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                let display_content = if is_cursor && app.mode == Mode::Insert {
                    format!("{}_", app.edit_buffer)
                } else {
                    content.clone()
                };

                cells.push(Cell::from(display_content).style(style));
            }

            Row::new(cells)
        })
        .collect();

    let title = match &window.notice {
        Some(notice) => format!(" {} ({}) ", app.editor.title(), notice),
        None => format!(" {} ", app.editor.title()),
    };

    let widget = RatatuiTable::new(rows, constraints)
        .header(Row::new(header_cells))
        .block(Block::default().borders(Borders::ALL).title(title));

    frame.render_widget(widget, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mode_style = match app.mode {
        Mode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        Mode::Insert => Style::default().bg(Color::Green).fg(Color::Black),
        Mode::Command => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let dirty_indicator = if app.editor.is_modified() { "[+]" } else { "" };
    let header_indicator = if app.editor.table().has_header() { " [header]" } else { "" };

    let position = format!(
        "{}{} ",
        col_to_letters(app.cursor.col),
        app.cursor.row + 1
    );

    let status = Line::from(vec![
        Span::styled(
            format!(" {} ", app.mode.display_name()),
            mode_style.add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(app.editor.uri().display().to_string()),
        Span::raw(" "),
        Span::styled(dirty_indicator, Style::default().fg(Color::Red)),
        Span::raw(header_indicator),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(40)
                .saturating_sub(position.len() as u16) as usize,
        )),
        Span::raw(position),
    ]);

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}

fn render_command_line(frame: &mut Frame, app: &App, area: Rect) {
    let content = match app.mode {
        Mode::Command => format!(":{}", app.command_buffer),
        _ => app.message.clone().unwrap_or_default(),
    };

    frame.render_widget(Paragraph::new(content), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_to_letters() {
        assert_eq!(col_to_letters(0), "A");
        assert_eq!(col_to_letters(25), "Z");
        assert_eq!(col_to_letters(26), "AA");
        assert_eq!(col_to_letters(701), "ZZ");
        assert_eq!(col_to_letters(702), "AAA");
    }

    #[test]
    fn test_visible_columns() {
        let widths = [5, 5, 5, 5];
        assert_eq!(visible_columns(&widths, 0, 12), 0..2);
        assert_eq!(visible_columns(&widths, 2, 100), 2..4);
        // a single over-wide column is still shown
        assert_eq!(visible_columns(&widths, 1, 3), 1..2);
        assert_eq!(visible_columns(&[], 0, 10), 0..0);
    }
}
