pub mod codec;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

pub use codec::{parse, serialize, QuoteMode};

use crate::error::{Result, TableError};

/// Files above this size are not loaded into the grid model
pub const MAX_FILE_SIZE: u64 = 5 * 1024 * 1024;

/// Detected file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Tsv,
}

impl FileFormat {
    /// Detect format from file extension; anything that isn't `.tsv` is
    /// treated as comma separated
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") => FileFormat::Tsv,
            _ => FileFormat::Csv,
        }
    }

    pub fn delimiter(&self) -> char {
        match self {
            FileFormat::Csv => ',',
            FileFormat::Tsv => '\t',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FileFormat::Csv => "comma",
            FileFormat::Tsv => "tab",
        }
    }
}

/// Byte-level file access, supplied by whoever embeds the editor
pub trait FileHost {
    fn file_size(&self, path: &Path) -> io::Result<u64>;
    fn read_to_string(&self, path: &Path) -> io::Result<String>;
    fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// `FileHost` backed by the local filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl FileHost for LocalFs {
    fn file_size(&self, path: &Path) -> io::Result<u64> {
        Ok(fs::metadata(path)?.len())
    }

    fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        writer.write_all(contents.as_bytes())?;
        writer.flush()
    }
}

pub fn fits_in_memory(size: u64, limit: u64) -> bool {
    size <= limit
}

/// Whether `path` is small enough to be opened as a table rather than
/// handed to a plain-text fallback
pub fn is_editable(path: &Path, host: &dyn FileHost, limit: u64) -> Result<bool> {
    let size = host
        .file_size(path)
        .map_err(|e| TableError::io(path, e))?;
    Ok(fits_in_memory(size, limit))
}
