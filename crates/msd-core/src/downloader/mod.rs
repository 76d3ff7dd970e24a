//! Top-level downloader: picks bulk-mirror or manifest mode and runs it.
//!
//! Bulk-mirror mode fans 26 subfolder mirrors out over a worker pool and
//! isolates their failures. Manifest mode parses the whole manifest first
//! (so a malformed row aborts before any transfer), then fetches rows one
//! at a time; by default the first failed row aborts the run.

mod manifest;
mod task;

pub use manifest::{fetch_row, fetch_rows, FailurePolicy, FetchReport, RowOutcome};
pub use task::DownloadTask;

use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::JobCount;
use crate::fetch::Fetcher;
use crate::manifest::load_manifest;
use crate::mirror::{mirror_all, Mirror, MirrorReport};
use crate::url_model::validate_base_url;

/// How a run obtains its files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Mirror all 26 letter subfolders into `local_root`.
    BulkMirror { local_root: PathBuf },
    /// Fetch the rows listed in `manifest_path` into `out_dir`.
    Manifest {
        manifest_path: PathBuf,
        out_dir: PathBuf,
        on_failure: FailurePolicy,
    },
}

/// Result of a completed run.
#[derive(Debug, Clone)]
pub enum RunSummary {
    Mirror(MirrorReport),
    Manifest(FetchReport),
}

#[derive(Debug, Clone)]
pub struct Downloader {
    base_url: String,
    jobs: JobCount,
    strategy: Strategy,
}

impl Downloader {
    /// Validates `base_url` up front so neither mode starts with a bad origin.
    pub fn new(base_url: &str, jobs: JobCount, strategy: Strategy) -> Result<Self> {
        validate_base_url(base_url)?;
        Ok(Self {
            base_url: base_url.to_string(),
            jobs,
            strategy,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn jobs(&self) -> JobCount {
        self.jobs
    }

    pub fn strategy(&self) -> &Strategy {
        &self.strategy
    }

    /// Runs the configured strategy to completion. `mirror` is only used in
    /// bulk-mirror mode and `fetcher` only in manifest mode.
    pub fn run(&self, mirror: &dyn Mirror, fetcher: &dyn Fetcher) -> Result<RunSummary> {
        match &self.strategy {
            Strategy::BulkMirror { local_root } => {
                tracing::info!(
                    "mirroring {} into {} with {} job(s)",
                    self.base_url,
                    local_root.display(),
                    self.jobs.get()
                );
                let report = mirror_all(&self.base_url, self.jobs, local_root, mirror);
                Ok(RunSummary::Mirror(report))
            }
            Strategy::Manifest {
                manifest_path,
                out_dir,
                on_failure,
            } => {
                let rows = load_manifest(manifest_path)
                    .with_context(|| format!("load manifest {}", manifest_path.display()))?;
                if self.jobs.get() > 1 {
                    tracing::debug!("manifest mode is sequential; job count ignored");
                }
                tracing::info!(
                    "fetching {} manifest row(s) from {} into {}",
                    rows.len(),
                    self.base_url,
                    out_dir.display()
                );
                let report = fetch_rows(&rows, &self.base_url, out_dir, fetcher, *on_failure)?;
                Ok(RunSummary::Manifest(report))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchError;
    use crate::mirror::MirrorOutcome;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingMirror(AtomicUsize);

    impl Mirror for CountingMirror {
        fn mirror(&self, _url: &str, _local_root: &Path) -> MirrorOutcome {
            self.0.fetch_add(1, Ordering::SeqCst);
            MirrorOutcome::Completed
        }
    }

    #[derive(Default)]
    struct CountingFetcher(AtomicUsize);

    impl Fetcher for CountingFetcher {
        fn fetch(&self, _url: &str, dest: &Path) -> Result<u64, FetchError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            std::fs::write(dest, b"mp3").unwrap();
            Ok(3)
        }
    }

    #[test]
    fn rejects_bad_base_url() {
        let strategy = Strategy::BulkMirror {
            local_root: PathBuf::from("."),
        };
        assert!(Downloader::new("msd previews", JobCount::default(), strategy).is_err());
    }

    #[test]
    fn bulk_mode_uses_mirror_only() {
        let root = tempfile::tempdir().unwrap();
        let d = Downloader::new(
            "http://h/msd/",
            JobCount::new(8).unwrap(),
            Strategy::BulkMirror {
                local_root: root.path().to_path_buf(),
            },
        )
        .unwrap();
        assert_eq!(d.base_url(), "http://h/msd/");
        let mirror = CountingMirror::default();
        let fetcher = CountingFetcher::default();
        match d.run(&mirror, &fetcher).unwrap() {
            RunSummary::Mirror(report) => assert_eq!(report.len(), 26),
            other => panic!("expected mirror summary, got {other:?}"),
        }
        assert_eq!(mirror.0.load(Ordering::SeqCst), 26);
        assert_eq!(fetcher.0.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn malformed_manifest_aborts_before_any_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("msd.tsv");
        std::fs::write(&manifest_path, "1\ta.mp3\nNaN\tb.mp3\n2\tc.mp3\n").unwrap();
        let out_dir = dir.path().join("out");
        let d = Downloader::new(
            "http://h/",
            JobCount::default(),
            Strategy::Manifest {
                manifest_path,
                out_dir: out_dir.clone(),
                on_failure: FailurePolicy::Continue,
            },
        )
        .unwrap();
        let mirror = CountingMirror::default();
        let fetcher = CountingFetcher::default();
        assert!(d.run(&mirror, &fetcher).is_err());
        assert_eq!(fetcher.0.load(Ordering::SeqCst), 0);
        assert_eq!(mirror.0.load(Ordering::SeqCst), 0);
        assert!(!out_dir.exists());
    }

    #[test]
    fn manifest_mode_uses_fetcher_only() {
        let dir = tempfile::tempdir().unwrap();
        let manifest_path = dir.path().join("msd.tsv");
        std::fs::write(&manifest_path, "123\ta/b.mp3\n45\tc.mp3\n").unwrap();
        let out_dir = dir.path().join("out");
        let d = Downloader::new(
            "http://h/",
            JobCount::default(),
            Strategy::Manifest {
                manifest_path,
                out_dir: out_dir.clone(),
                on_failure: FailurePolicy::Abort,
            },
        )
        .unwrap();
        let mirror = CountingMirror::default();
        let fetcher = CountingFetcher::default();
        match d.run(&mirror, &fetcher).unwrap() {
            RunSummary::Manifest(report) => assert_eq!(report.downloaded, 2),
            other => panic!("expected manifest summary, got {other:?}"),
        }
        assert_eq!(mirror.0.load(Ordering::SeqCst), 0);
        assert!(out_dir.join("a/b.mp3").is_file());
        assert!(out_dir.join("c.mp3").is_file());
    }
}
