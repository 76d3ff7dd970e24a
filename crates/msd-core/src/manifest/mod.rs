//! Manifest loading.
//!
//! A manifest is a headerless tab-separated file with two columns, a byte
//! size and a relative audio path, e.g.
//!
//! ```text
//! 8834	A/A/A/TRAAAAW128F429D538.mp3
//! 9123	A/A/A/TRAAABD128F429CF47.mp3
//! ```
//!
//! The whole file is parsed before any download starts; one bad row fails the
//! entire load.

mod parse;

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

pub use parse::parse_row;

/// One manifest entry. `size` is carried for logging only; it is never
/// compared against the file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestRow {
    pub size: u64,
    pub audio_path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("reading manifest: {0}")]
    Io(#[from] io::Error),
    #[error("line {line}: expected 2 tab-separated columns, found {found}")]
    ColumnCount { line: usize, found: usize },
    #[error("line {line}: size {value:?} is not a non-negative integer")]
    InvalidSize { line: usize, value: String },
    #[error("line {line}: empty audio path")]
    EmptyPath { line: usize },
    #[error("line {line}: audio path {path:?} must be relative and stay under the output root")]
    UnsafePath { line: usize, path: String },
}

/// Parses every row from `reader`. Blank lines are skipped; line numbers in
/// errors are 1-based.
pub fn parse_manifest<R: BufRead>(reader: R) -> Result<Vec<ManifestRow>, ManifestError> {
    let mut rows = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse_row(index + 1, line)?);
    }
    Ok(rows)
}

/// Opens and parses the manifest at `path`.
pub fn load_manifest(path: &Path) -> Result<Vec<ManifestRow>, ManifestError> {
    let file = File::open(path)?;
    parse_manifest(BufReader::new(file))
}
