//! Manifest mode: fetch each row in order, skipping what is already on disk.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use super::task::DownloadTask;
use crate::fetch::Fetcher;
use crate::manifest::ManifestRow;
use crate::storage::PathState;

/// What to do when a row fails to download.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop at the first failed row and return its error.
    #[default]
    Abort,
    /// Log the failure, record it in the report and move on.
    Continue,
}

/// What happened to a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Downloaded { bytes: u64 },
    AlreadyPresent,
    /// The target path is a directory; nothing was touched.
    DirectoryInTheWay,
}

/// Totals for one manifest run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchReport {
    pub downloaded: usize,
    pub bytes: u64,
    pub already_present: usize,
    pub directory_skips: usize,
    /// `(audio_path, error)` for rows that failed under [`FailurePolicy::Continue`].
    pub failed: Vec<(String, String)>,
}

impl FetchReport {
    fn record(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Downloaded { bytes } => {
                self.downloaded += 1;
                self.bytes += bytes;
            }
            RowOutcome::AlreadyPresent => self.already_present += 1,
            RowOutcome::DirectoryInTheWay => self.directory_skips += 1,
        }
    }
}

/// Processes one row: directory check, parent creation, skip-if-present, fetch.
pub fn fetch_row(task: &DownloadTask, size: u64, fetcher: &dyn Fetcher) -> Result<RowOutcome> {
    let local = task.local_path();

    if PathState::probe(&local).with_context(|| format!("inspect {}", local.display()))?
        == PathState::Directory
    {
        tracing::debug!(path = %local.display(), "target is a directory, skipping row");
        return Ok(RowOutcome::DirectoryInTheWay);
    }

    if let Some(parent) = local.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }

    if PathState::probe(&local).with_context(|| format!("inspect {}", local.display()))?
        != PathState::Missing
    {
        tracing::debug!(path = %local.display(), "already downloaded");
        return Ok(RowOutcome::AlreadyPresent);
    }

    let url = task.remote_url();
    tracing::info!("downloading {} -> {}", url, local.display());
    let bytes = fetcher.fetch(&url, &local)?;
    if bytes != size {
        tracing::debug!(
            path = %task.relative_path,
            manifest_size = size,
            bytes,
            "size differs from manifest"
        );
    }
    Ok(RowOutcome::Downloaded { bytes })
}

/// Fetches every row in manifest order, strictly one at a time.
///
/// With [`FailurePolicy::Abort`] the first failing row ends the run and later
/// rows are never attempted.
pub fn fetch_rows(
    rows: &[ManifestRow],
    base_url: &str,
    out_dir: &Path,
    fetcher: &dyn Fetcher,
    policy: FailurePolicy,
) -> Result<FetchReport> {
    let mut report = FetchReport::default();
    for (index, row) in rows.iter().enumerate() {
        let task = DownloadTask::new(&row.audio_path, base_url, out_dir);
        match fetch_row(&task, row.size, fetcher) {
            Ok(outcome) => report.record(outcome),
            Err(e) => match policy {
                FailurePolicy::Abort => {
                    return Err(e).with_context(|| {
                        format!("row {} ({}) failed", index + 1, row.audio_path)
                    });
                }
                FailurePolicy::Continue => {
                    tracing::warn!("row {} ({}) failed: {:#}", index + 1, row.audio_path, e);
                    report.failed.push((row.audio_path.clone(), format!("{:#}", e)));
                }
            },
        }
    }
    Ok(report)
}
