//! Table editing for delimiter-separated text files.
//!
//! `fileio` turns text into a [`Table`] and back, [`History`] keeps whole-table
//! snapshots for undo/redo, `navigation` maps keys to cell moves and
//! [`TableEditor`] ties them together for one open file. Hosts register the
//! editor for `.csv`/`.tsv` through [`opener::activate`].

pub mod config;
pub mod editor;
pub mod error;
pub mod fileio;
pub mod history;
pub mod navigation;
pub mod opener;
pub mod table;

pub use config::EditorConfig;
pub use editor::{OpenOutcome, SessionState, TableEditor};
pub use error::{Result, TableError};
pub use fileio::{FileFormat, FileHost, LocalFs, QuoteMode};
pub use history::History;
pub use navigation::{next_position, Key, Motion};
pub use table::{CellPos, Table};
