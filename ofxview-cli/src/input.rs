//! Reads a statement file fully into memory before it reaches the parser.

use anyhow::{Context, Result};
use ofxview_report::ErrorKind;
use std::fs;
use std::path::Path;

/// Why a file never made it to the parser.
#[derive(Debug)]
pub enum ReadFailure {
    Missing,
    TooLarge { size: u64, limit: u64 },
    Io(anyhow::Error),
}

impl ReadFailure {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ReadFailure::Missing => ErrorKind::NoFile,
            ReadFailure::TooLarge { .. } => ErrorKind::TooLarge,
            ReadFailure::Io(_) => ErrorKind::Internal,
        }
    }

    /// Safe to show to the caller; I/O details stay in the log.
    pub fn details(&self, path: &Path) -> String {
        match self {
            ReadFailure::Missing => format!("{} does not exist", path.display()),
            ReadFailure::TooLarge { size, limit } => {
                format!("{size} bytes exceeds the {limit} byte limit")
            }
            ReadFailure::Io(_) => "Unexpected internal error".to_string(),
        }
    }
}

/// Whole file as text. Invalid UTF-8 is replaced rather than rejected.
pub fn read_statement(path: &Path, limit: u64) -> std::result::Result<String, ReadFailure> {
    if !path.is_file() {
        return Err(ReadFailure::Missing);
    }
    let size = file_size(path).map_err(ReadFailure::Io)?;
    if size > limit {
        return Err(ReadFailure::TooLarge { size, limit });
    }
    let bytes = fs::read(path)
        .with_context(|| format!("read {}", path.display()))
        .map_err(ReadFailure::Io)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn file_size(path: &Path) -> Result<u64> {
    Ok(fs::metadata(path)
        .with_context(|| format!("stat {}", path.display()))?
        .len())
}
