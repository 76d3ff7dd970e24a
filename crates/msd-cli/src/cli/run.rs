//! Merge CLI flags over config, run the selected mode and report.

use anyhow::{Context, Result};
use msd_core::config::{self, JobCount, MsdConfig};
use msd_core::downloader::{Downloader, FailurePolicy, RunSummary, Strategy};
use msd_core::fetch::CurlFetcher;
use msd_core::mirror::CommandMirror;
use std::path::{Path, PathBuf};
use std::time::Instant;

use super::Cli;

pub fn run(cli: Cli) -> Result<()> {
    let started = Instant::now();

    let cfg = load_config(cli.config.as_deref())?;
    tracing::debug!("loaded config: {:?}", cfg);

    let cwd = std::env::current_dir().context("current directory")?;
    let downloader = build_downloader(&cli, &cfg, cwd)?;
    let mirror = CommandMirror::from_config(&cfg.mirror_config());
    let fetcher = CurlFetcher::new(cfg.fetch_options());

    let summary = downloader.run(&mirror, &fetcher)?;
    log_summary(&downloader, &summary);

    tracing::info!("Done! Took {:.2} seconds.", started.elapsed().as_secs_f64());
    Ok(())
}

fn load_config(explicit: Option<&Path>) -> Result<MsdConfig> {
    load_config_from(explicit, config::config_path())
}

/// An explicit file must exist and parse. Otherwise the XDG file is loaded
/// (or created); only an unresolvable XDG location falls back to defaults.
pub(super) fn load_config_from(
    explicit: Option<&Path>,
    default_path: Result<PathBuf>,
) -> Result<MsdConfig> {
    if let Some(path) = explicit {
        return config::load_from_path(path);
    }
    match default_path {
        Ok(path) => config::load_or_init_at(&path).context("load config"),
        Err(e) => {
            tracing::warn!("no config directory ({:#}), using defaults", e);
            Ok(MsdConfig::default())
        }
    }
}

/// Builds the downloader from CLI flags, falling back to `cfg` for anything
/// not given on the command line. Bulk mode mirrors into `cwd`.
pub fn build_downloader(cli: &Cli, cfg: &MsdConfig, cwd: PathBuf) -> Result<Downloader> {
    let requested = cli.n_jobs.unwrap_or(cfg.n_jobs);
    let jobs = JobCount::new(requested).context("invalid -j/--n_jobs")?;

    let strategy = match &cli.data_file {
        Some(manifest_path) => Strategy::Manifest {
            manifest_path: manifest_path.clone(),
            out_dir: cli.out_dir.clone().unwrap_or_else(|| cfg.out_dir.clone()),
            on_failure: if cli.continue_on_error || cfg.continue_on_error {
                FailurePolicy::Continue
            } else {
                FailurePolicy::Abort
            },
        },
        None => {
            if cli.out_dir.is_some() {
                tracing::debug!("--out_dir only applies with --data_file; ignoring");
            }
            Strategy::BulkMirror { local_root: cwd }
        }
    };

    Downloader::new(&cli.url, jobs, strategy)
}

fn log_summary(downloader: &Downloader, summary: &RunSummary) {
    match summary {
        RunSummary::Mirror(report) => {
            tracing::info!(
                "mirrored {}/{} subfolder(s) from {}",
                report.completed(),
                report.len(),
                downloader.base_url()
            );
            let failed = report.failed();
            if !failed.is_empty() {
                let letters: String = failed.into_iter().collect();
                tracing::warn!("mirror tool reported failures for: {}", letters);
            }
        }
        RunSummary::Manifest(report) => {
            tracing::info!(
                "downloaded {} file(s) ({} bytes) from {}, {} already present, \
                 {} skipped (directory in the way)",
                report.downloaded,
                report.bytes,
                downloader.base_url(),
                report.already_present,
                report.directory_skips
            );
            if !report.failed.is_empty() {
                tracing::warn!("{} row(s) failed", report.failed.len());
            }
        }
    }
}
