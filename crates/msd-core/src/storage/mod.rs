//! Local file lifecycle for single-file fetches.
//!
//! Bodies are streamed into `<target>.part` and renamed onto the final name
//! only after a successful transfer, so a file existing under its final name
//! always means a complete download.

mod part;

pub use part::PartFile;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `x.mp3` → `x.mp3.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// What currently sits at a local target path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Missing,
    File,
    Directory,
}

impl PathState {
    /// Follows symlinks, so a link to a directory reports `Directory`.
    pub fn probe(path: &Path) -> io::Result<Self> {
        match fs::metadata(path) {
            Ok(meta) if meta.is_dir() => Ok(PathState::Directory),
            Ok(_) => Ok(PathState::File),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(PathState::Missing),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temp_path_appends_part() {
        let p = temp_path(Path::new("c.mp3"));
        assert_eq!(p.to_string_lossy(), "c.mp3.part");
        let p2 = temp_path(Path::new("/out/a/b.mp3"));
        assert_eq!(p2.to_string_lossy(), "/out/a/b.mp3.part");
    }

    #[test]
    fn probe_reports_each_state() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("b.mp3");
        fs::write(&file, b"x").unwrap();
        assert_eq!(PathState::probe(&file).unwrap(), PathState::File);
        assert_eq!(PathState::probe(dir.path()).unwrap(), PathState::Directory);
        assert_eq!(
            PathState::probe(&dir.path().join("missing.mp3")).unwrap(),
            PathState::Missing
        );
    }
}
