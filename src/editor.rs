//! One open delimited file: the table, its history and the document-level
//! state a host needs (title, uri, modified flag, save).
//!
//! Input is routed through three plain methods instead of UI events:
//! `on_cell_focused` takes a snapshot, `on_cell_edited` writes a cell and
//! `on_key_pressed` resolves navigation. Whatever renders the grid binds
//! those to its own input handling.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::EditorConfig;
use crate::error::{Result, TableError};
use crate::fileio::{self, FileFormat, FileHost, QuoteMode};
use crate::history::History;
use crate::navigation::{self, Key, Motion};
use crate::table::{CellPos, Table};

/// What a host gets back from opening a path
#[derive(Debug)]
pub enum OpenOutcome {
    Table(TableEditor),
    /// Too large for the grid model; show it as plain text instead
    Fallback(PathBuf),
}

/// Enough to reopen a document after a restart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub file_path: PathBuf,
}

/// A slice of rows to draw, for tables too tall to render in one go
#[derive(Debug)]
pub struct RenderWindow<'a> {
    pub start: usize,
    pub rows: &'a [Vec<String>],
    pub notice: Option<String>,
}

#[derive(Debug)]
pub struct TableEditor {
    path: PathBuf,
    format: FileFormat,
    quote_mode: QuoteMode,
    table: Table,
    history: History,
    modified: bool,
    max_render_rows: usize,
}

impl TableEditor {
    /// Open `path` through `host`, or report that it should fall back to a
    /// plain-text view because it exceeds `config.max_file_size`
    pub fn open(path: &Path, host: &dyn FileHost, config: &EditorConfig) -> Result<OpenOutcome> {
        if !fileio::is_editable(path, host, config.max_file_size)? {
            warn!(path = %path.display(), limit = config.max_file_size, "file too large for table view");
            return Ok(OpenOutcome::Fallback(path.to_path_buf()));
        }

        let text = host
            .read_to_string(path)
            .map_err(|e| TableError::io(path, e))?;
        let editor = Self::from_text(path, &text, config)?;
        info!(
            path = %path.display(),
            rows = editor.table.row_count(),
            delimiter = editor.format.name(),
            "opened table"
        );
        Ok(OpenOutcome::Table(editor))
    }

    /// Build an editor from already loaded text
    pub fn from_text(path: &Path, text: &str, config: &EditorConfig) -> Result<Self> {
        let format = FileFormat::from_path(path);
        let table = config
            .quote_mode
            .parse(text, format.delimiter())?
            .with_header(config.header);

        Ok(Self {
            path: path.to_path_buf(),
            format,
            quote_mode: config.quote_mode,
            table,
            history: History::with_limit(config.history_limit),
            modified: false,
            max_render_rows: config.max_render_rows,
        })
    }

    /// Reopen a document from a saved session
    pub fn deserialize(state: &SessionState, host: &dyn FileHost, config: &EditorConfig) -> Result<OpenOutcome> {
        Self::open(&state.file_path, host, config)
    }

    // === document ===

    pub fn title(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn uri(&self) -> &Path {
        &self.path
    }

    pub fn delimiter(&self) -> char {
        self.format.delimiter()
    }

    pub fn format(&self) -> FileFormat {
        self.format
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn should_prompt_to_save(&self) -> bool {
        self.is_modified()
    }

    pub fn serialize(&self) -> SessionState {
        SessionState { file_path: self.path.clone() }
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    fn mark_modified(&mut self) {
        self.modified = true;
    }

    // === saving ===

    pub fn serialize_data(&self) -> Result<String> {
        self.quote_mode.serialize(&self.table, self.delimiter())
    }

    /// Write the table back to its file. History is kept.
    pub fn save(&mut self, host: &dyn FileHost) -> Result<()> {
        let text = self.serialize_data()?;
        host.write(&self.path, &text)
            .map_err(|e| TableError::io(&self.path, e))?;
        self.modified = false;
        info!(path = %self.path.display(), rows = self.table.row_count(), "saved table");
        Ok(())
    }

    /// Save under a new path. The delimiter stays the one chosen at open.
    pub fn save_as(&mut self, host: &dyn FileHost, path: &Path) -> Result<()> {
        let text = self.serialize_data()?;
        host.write(path, &text)
            .map_err(|e| TableError::io(path, e))?;
        self.path = path.to_path_buf();
        self.modified = false;
        info!(path = %path.display(), "saved table as");
        Ok(())
    }

    // === editing ===

    pub fn insert_row(&mut self) {
        self.history.snapshot(&self.table);
        self.table.insert_row();
        self.mark_modified();
        debug!(rows = self.table.row_count(), "inserted row");
    }

    pub fn insert_column(&mut self) {
        self.history.snapshot(&self.table);
        self.table.insert_col();
        self.mark_modified();
        debug!(cols = self.table.col_count(), "inserted column");
    }

    pub fn toggle_header(&mut self) {
        self.table.toggle_header();
    }

    pub fn undo(&mut self) -> bool {
        let changed = self.history.undo(&mut self.table);
        if changed {
            self.mark_modified();
        }
        changed
    }

    pub fn redo(&mut self) -> bool {
        let changed = self.history.redo(&mut self.table);
        if changed {
            self.mark_modified();
        }
        changed
    }

    // === input ===

    /// A cell gained focus: record an undo point before it gets edited
    pub fn on_cell_focused(&mut self, pos: CellPos) {
        self.history.snapshot(&self.table);
        debug!(row = pos.row, col = pos.col, "cell focused");
    }

    /// Replace a cell's content with what the user typed
    pub fn on_cell_edited(&mut self, pos: CellPos, value: impl Into<String>) -> Result<()> {
        self.table.set_cell(pos.row, pos.col, value.into())?;
        self.mark_modified();
        Ok(())
    }

    pub fn on_key_pressed(&self, key: &Key, pos: CellPos) -> Motion {
        navigation::navigate(key, pos, &self.table)
    }

    // === rendering ===

    pub fn is_large(&self) -> bool {
        self.table.row_count() > self.max_render_rows
    }

    pub fn max_render_rows(&self) -> usize {
        self.max_render_rows
    }

    /// Up to `max_render_rows` rows starting at `start` (clamped to the table)
    pub fn render_window(&self, start: usize) -> RenderWindow<'_> {
        let rows = self.table.rows();
        let start = start.min(rows.len());
        let end = start.saturating_add(self.max_render_rows).min(rows.len());
        let notice = self.is_large().then(|| {
            format!("Large file: showing {} rows at a time", self.max_render_rows)
        });

        RenderWindow { start, rows: &rows[start..end], notice }
    }
}
