use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, TableError};
use crate::fileio::{QuoteMode, MAX_FILE_SIZE};

/// Rows shown at once before the renderer switches to a windowed view
pub const MAX_RENDER_ROWS: usize = 1000;

/// Editor settings, loadable from TOML. Every field has a default, so an
/// empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Larger files are handed back to the host as plain text
    pub max_file_size: u64,
    pub max_render_rows: usize,
    /// Undo depth; unbounded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_limit: Option<usize>,
    pub quote_mode: QuoteMode,
    /// Initial header flag for newly opened tables
    pub header: bool,
    /// Column width cap used by the terminal renderer
    pub max_col_width: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            max_render_rows: MAX_RENDER_ROWS,
            history_limit: None,
            quote_mode: QuoteMode::Literal,
            header: false,
            max_col_width: 30,
        }
    }
}

impl EditorConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| TableError::Config(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| TableError::io(path, e))?;
        Self::from_toml(&content)
    }

    fn validate(&self) -> Result<()> {
        if self.max_render_rows == 0 {
            return Err(TableError::Config("max_render_rows must be at least 1".to_string()));
        }
        if self.history_limit == Some(0) {
            return Err(TableError::Config("history_limit must be at least 1".to_string()));
        }
        Ok(())
    }
}
