//! Single-row parsing.

use std::path::{Component, Path};

use super::{ManifestError, ManifestRow};

/// Parses one non-blank manifest line (`<size>\t<audio_path>`).
pub fn parse_row(line_no: usize, line: &str) -> Result<ManifestRow, ManifestError> {
    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() != 2 {
        return Err(ManifestError::ColumnCount {
            line: line_no,
            found: columns.len(),
        });
    }

    let raw_size = columns[0].trim();
    let size = raw_size
        .parse::<u64>()
        .map_err(|_| ManifestError::InvalidSize {
            line: line_no,
            value: raw_size.to_string(),
        })?;

    let audio_path = columns[1];
    if audio_path.trim().is_empty() {
        return Err(ManifestError::EmptyPath { line: line_no });
    }
    if !is_contained(audio_path) {
        return Err(ManifestError::UnsafePath {
            line: line_no,
            path: audio_path.to_string(),
        });
    }

    Ok(ManifestRow {
        size,
        audio_path: audio_path.to_string(),
    })
}

/// True if joining `audio_path` under a root can never escape that root.
fn is_contained(audio_path: &str) -> bool {
    Path::new(audio_path.trim_start_matches('/'))
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
