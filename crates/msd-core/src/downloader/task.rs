//! One unit of single-file work.

use std::path::{Path, PathBuf};

use crate::url_model::{join_url, local_target};

/// A relative path paired with where it comes from and where it goes.
/// Built per manifest row and dropped once the row is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub relative_path: String,
    pub remote_base_url: String,
    pub local_root: PathBuf,
}

impl DownloadTask {
    pub fn new(relative_path: &str, remote_base_url: &str, local_root: &Path) -> Self {
        Self {
            relative_path: relative_path.to_string(),
            remote_base_url: remote_base_url.to_string(),
            local_root: local_root.to_path_buf(),
        }
    }

    pub fn remote_url(&self) -> String {
        join_url(&self.remote_base_url, &self.relative_path)
    }

    pub fn local_path(&self) -> PathBuf {
        local_target(&self.local_root, &self.relative_path)
    }
}
