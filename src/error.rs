use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the table core
#[derive(Debug, Error)]
pub enum TableError {
    /// Reading or writing the backing file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A cell write addressed a position outside the grid
    #[error("cell ({row}, {col}) is out of bounds")]
    OutOfBounds { row: usize, col: usize },

    /// Quote-aware parsing rejected the input
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Quote-aware serialization could not produce text
    #[error("failed to encode table: {0}")]
    Encode(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl TableError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TableError::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, TableError>;
