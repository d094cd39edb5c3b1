use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, warn};

use tabedit::{CellPos, Key, LocalFs, Motion, TableEditor};

use crate::command::Command;
use crate::mode::Mode;
use crate::ui;

/// Rows taken by borders, column header, status bar and command line
const CHROME_ROWS: u16 = 5;
/// Columns taken by the row-number gutter and borders
const GUTTER_COLS: u16 = 8;

pub struct App {
    pub editor: TableEditor,
    pub cursor: CellPos,
    pub mode: Mode,
    pub edit_buffer: String,
    pub command_buffer: String,
    pub message: Option<String>,
    pub should_quit: bool,
    /// First table row in the viewport
    pub top_row: usize,
    /// First table column in the viewport
    pub left_col: usize,
    pub max_col_width: usize,
    viewport_rows: usize,
    viewport_width: usize,
}

/// Translate a terminal key into the editor's navigation keys
fn nav_key(key: KeyEvent) -> Key {
    match key.code {
        KeyCode::Right | KeyCode::Char('l') => Key::ArrowRight,
        KeyCode::Left | KeyCode::Char('h') => Key::ArrowLeft,
        KeyCode::Down | KeyCode::Char('j') => Key::ArrowDown,
        KeyCode::Up | KeyCode::Char('k') => Key::ArrowUp,
        KeyCode::Enter => Key::Enter,
        other => Key::Other(format!("{:?}", other)),
    }
}

impl App {
    pub fn new(editor: TableEditor, max_col_width: usize) -> Self {
        Self {
            editor,
            cursor: CellPos::default(),
            mode: Mode::Normal,
            edit_buffer: String::new(),
            command_buffer: String::new(),
            message: None,
            should_quit: false,
            top_row: 0,
            left_col: 0,
            max_col_width,
            viewport_rows: 1,
            viewport_width: 80,
        }
    }

    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> anyhow::Result<()> {
        while !self.should_quit {
            let size = terminal.size()?;
            self.set_viewport(
                size.height.saturating_sub(CHROME_ROWS) as usize,
                size.width.saturating_sub(GUTTER_COLS) as usize,
            );
            self.scroll_to_cursor();

            terminal.draw(|frame| ui::render(frame, self))?;

            if event::poll(Duration::from_millis(250))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn set_viewport(&mut self, rows: usize, width: usize) {
        self.viewport_rows = rows.max(1);
        self.viewport_width = width.max(1);
    }

    pub fn viewport_rows(&self) -> usize {
        self.viewport_rows
    }

    pub fn viewport_width(&self) -> usize {
        self.viewport_width
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Normal => self.handle_normal(key),
            Mode::Insert => self.handle_insert(key),
            Mode::Command => self.handle_command(key),
        }
    }

    fn handle_normal(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.quit(false),
            KeyCode::Char('r') if ctrl => self.redo(),
            KeyCode::Char('s') if ctrl => {
                self.write();
            }
            KeyCode::Char('i') | KeyCode::F(2) => self.start_editing(),
            KeyCode::Char('u') => self.undo(),
            KeyCode::Char('o') => {
                self.editor.insert_row();
                self.cursor = CellPos::new(self.editor.table().row_count() - 1, 0);
            }
            KeyCode::Char(':') => {
                self.command_buffer.clear();
                self.mode = Mode::Command;
            }
            _ => self.navigate(key),
        }
    }

    fn handle_insert(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit_buffer.push(c);
                self.commit_edit();
            }
            KeyCode::Backspace => {
                if self.edit_buffer.pop().is_some() {
                    self.commit_edit();
                }
            }
            _ => {
                // Enter and arrows finish editing and move on
                self.mode = Mode::Normal;
                self.navigate(key);
            }
        }
    }

    fn handle_command(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.mode = Mode::Normal,
            KeyCode::Enter => {
                self.mode = Mode::Normal;
                let command = Command::parse(&self.command_buffer);
                self.execute(command);
            }
            KeyCode::Backspace => {
                if self.command_buffer.pop().is_none() {
                    self.mode = Mode::Normal;
                }
            }
            KeyCode::Char(c) => self.command_buffer.push(c),
            _ => {}
        }
    }

    fn navigate(&mut self, key: KeyEvent) {
        match self.editor.on_key_pressed(&nav_key(key), self.cursor) {
            Motion::To(pos) => self.cursor = pos,
            Motion::Blocked => {}
            Motion::Unhandled => debug!(?key, "unhandled key"),
        }
    }

    fn start_editing(&mut self) {
        let Some(value) = self.editor.table().get_cell(self.cursor.row, self.cursor.col) else {
            self.message = Some("No cell here; add a row with 'o'".to_string());
            return;
        };
        self.edit_buffer = value.clone();
        self.editor.on_cell_focused(self.cursor);
        self.mode = Mode::Insert;
    }

    fn commit_edit(&mut self) {
        if let Err(e) = self.editor.on_cell_edited(self.cursor, self.edit_buffer.clone()) {
            warn!(error = %e, "edit rejected");
            self.message = Some(e.to_string());
            self.mode = Mode::Normal;
        }
    }

    fn undo(&mut self) {
        self.message = Some(if self.editor.undo() { "Undo" } else { "Nothing to undo" }.to_string());
        self.clamp_cursor();
    }

    fn redo(&mut self) {
        self.message = Some(if self.editor.redo() { "Redo" } else { "Nothing to redo" }.to_string());
        self.clamp_cursor();
    }

    fn write(&mut self) -> bool {
        match self.editor.save(&LocalFs) {
            Ok(()) => {
                self.message = Some(format!(
                    "Wrote {} rows to {}",
                    self.editor.table().row_count(),
                    self.editor.title()
                ));
                true
            }
            Err(e) => {
                self.message = Some(e.to_string());
                false
            }
        }
    }

    fn quit(&mut self, force: bool) {
        if !force && self.editor.should_prompt_to_save() {
            self.message = Some("Unsaved changes (use :q! to discard or :wq to save)".to_string());
            return;
        }
        self.should_quit = true;
    }

    pub fn execute(&mut self, command: Command) {
        debug!(?command, "executing command");
        match command {
            Command::Write => {
                self.write();
            }
            Command::WriteAs(path) => match self.editor.save_as(&LocalFs, &path) {
                Ok(()) => self.message = Some(format!("Wrote {}", path.display())),
                Err(e) => self.message = Some(e.to_string()),
            },
            Command::Quit => self.quit(false),
            Command::ForceQuit => self.quit(true),
            Command::WriteQuit => {
                if self.write() {
                    self.quit(true);
                }
            }
            Command::AddRow => self.editor.insert_row(),
            Command::AddColumn => self.editor.insert_column(),
            Command::ToggleHeader => self.editor.toggle_header(),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::NavigateRow(row) => {
                if row < self.editor.table().row_count() {
                    self.cursor.row = row;
                    self.clamp_cursor();
                } else {
                    self.message = Some(format!("No row {}", row + 1));
                }
            }
            Command::Unknown(s) => {
                self.message = Some(format!("Unknown command: {}", s));
            }
        }
    }

    /// Keep the cursor on an existing cell after the table changed shape
    pub fn clamp_cursor(&mut self) {
        let table = self.editor.table();
        self.cursor.row = self.cursor.row.min(table.row_count().saturating_sub(1));
        self.cursor.col = self.cursor.col.min(table.row_len(self.cursor.row).saturating_sub(1));
    }

    pub fn scroll_to_cursor(&mut self) {
        if self.cursor.row < self.top_row {
            self.top_row = self.cursor.row;
        } else if self.cursor.row >= self.top_row + self.viewport_rows {
            self.top_row = self.cursor.row + 1 - self.viewport_rows;
        }

        if self.cursor.col < self.left_col {
            self.left_col = self.cursor.col;
            return;
        }
        let widths = self.editor.table().column_widths(self.max_col_width);
        let span = |from: usize, to: usize| -> usize {
            widths.iter().skip(from).take(to + 1 - from).map(|w| w + 1).sum()
        };
        while self.left_col < self.cursor.col && span(self.left_col, self.cursor.col) > self.viewport_width {
            self.left_col += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    use tabedit::EditorConfig;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn make_app(text: &str) -> App {
        let editor = TableEditor::from_text(Path::new("t.csv"), text, &EditorConfig::default()).unwrap();
        App::new(editor, 30)
    }

    fn type_str(app: &mut App, s: &str) {
        for c in s.chars() {
            app.handle_key(press(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_arrow_navigation() {
        let mut app = make_app("a,b\nc,d");
        app.handle_key(press(KeyCode::Right));
        assert_eq!(app.cursor, CellPos::new(0, 1));
        app.handle_key(press(KeyCode::Enter));
        assert_eq!(app.cursor, CellPos::new(1, 1));
        app.handle_key(press(KeyCode::Down));
        assert_eq!(app.cursor, CellPos::new(1, 1));
    }

    #[test]
    fn test_edit_cell_then_undo() {
        let mut app = make_app("a,b");
        app.handle_key(press(KeyCode::Char('i')));
        assert_eq!(app.mode, Mode::Insert);
        assert_eq!(app.edit_buffer, "a");

        app.handle_key(press(KeyCode::Backspace));
        type_str(&mut app, "xyz");
        app.handle_key(press(KeyCode::Esc));
        assert_eq!(app.editor.table().get_cell(0, 0).unwrap(), "xyz");
        assert!(app.editor.is_modified());

        app.handle_key(press(KeyCode::Char('u')));
        assert_eq!(app.editor.table().get_cell(0, 0).unwrap(), "a");
    }

    #[test]
    fn test_insert_row_moves_cursor() {
        let mut app = make_app("a,b");
        app.handle_key(press(KeyCode::Char('o')));
        assert_eq!(app.editor.table().row_count(), 2);
        assert_eq!(app.cursor, CellPos::new(1, 0));
    }

    #[test]
    fn test_quit_blocked_by_unsaved_changes() {
        let mut app = make_app("a");
        app.execute(Command::AddColumn);
        app.execute(Command::Quit);
        assert!(!app.should_quit);
        assert!(app.message.is_some());

        app.execute(Command::ForceQuit);
        assert!(app.should_quit);
    }

    #[test]
    fn test_command_mode_round_trip() {
        let mut app = make_app("a");
        app.handle_key(press(KeyCode::Char(':')));
        assert_eq!(app.mode, Mode::Command);
        type_str(&mut app, "addcol");
        app.handle_key(press(KeyCode::Enter));

        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(app.editor.table().row_len(0), 2);
    }

    #[test]
    fn test_undo_clamps_cursor() {
        let mut app = make_app("a");
        app.handle_key(press(KeyCode::Char('o')));
        assert_eq!(app.cursor.row, 1);
        app.handle_key(press(KeyCode::Char('u')));
        assert_eq!(app.cursor, CellPos::new(0, 0));
    }

    #[test]
    fn test_editing_empty_table_is_refused() {
        let mut app = make_app("");
        app.handle_key(press(KeyCode::Char('i')));
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.message.is_some());
    }

    #[test]
    fn test_scroll_follows_cursor() {
        let text: String = (0..50).map(|i| format!("{}\n", i)).collect();
        let mut app = make_app(&text);
        app.set_viewport(10, 80);
        app.execute(Command::NavigateRow(30));
        app.scroll_to_cursor();
        assert_eq!(app.top_row, 21);

        app.execute(Command::NavigateRow(0));
        app.scroll_to_cursor();
        assert_eq!(app.top_row, 0);
    }
}
