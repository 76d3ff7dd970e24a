//! CLI for the MSD preview downloader.

mod run;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

/// Downloads the Million Song Dataset preview tracks.
///
/// Without `--data_file`, mirrors the 26 letter subfolders under URL into the
/// current directory in parallel (via wget). With a manifest, fetches each
/// listed file into the output directory, skipping files already present.
#[derive(Debug, Parser)]
#[command(name = "msd-dl", version)]
#[command(about = "Downloads the MSD preview tracks in parallel", long_about = None)]
pub struct Cli {
    /// URL where the MSD preview tracks are.
    pub url: String,

    /// Number of parallel mirror jobs (1-26; larger values are clamped). [default: 26]
    #[arg(short = 'j', long = "n_jobs", visible_alias = "n-jobs", value_name = "N")]
    pub n_jobs: Option<usize>,

    /// Tab-separated manifest of `<size> <audio_path>` rows; selects manifest mode.
    #[arg(
        short = 'd',
        long = "data_file",
        visible_alias = "data-file",
        value_name = "FILE"
    )]
    pub data_file: Option<PathBuf>,

    /// Output root for manifest mode. [default: ./msd/mp3/]
    #[arg(short = 'o', long = "out_dir", visible_alias = "out-dir", value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// In manifest mode, log failed rows and keep going instead of aborting.
    #[arg(long)]
    pub continue_on_error: bool,

    /// Read settings from this file instead of ~/.config/msd-dl/config.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

pub fn run_from_args() -> Result<()> {
    run::run(Cli::parse())
}
