use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::fetch::FetchOptions;

/// Number of first-letter subfolders on the preview server (A–Z).
pub const MAX_JOBS: usize = 26;

/// Default output root for manifest mode.
pub const DEFAULT_OUT_DIR: &str = "./msd/mp3/";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("job count must be at least 1")]
    ZeroJobs,
}

/// Size of the bulk-mirror worker pool, always within 1..=26.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobCount(usize);

impl JobCount {
    /// Validates a requested job count. Zero is rejected; anything above
    /// [`MAX_JOBS`] is clamped since there are only 26 subfolders to hand out.
    pub fn new(requested: usize) -> Result<Self, ConfigError> {
        if requested == 0 {
            return Err(ConfigError::ZeroJobs);
        }
        if requested > MAX_JOBS {
            tracing::warn!(
                requested,
                max = MAX_JOBS,
                "job count above subfolder count, clamping"
            );
            return Ok(Self(MAX_JOBS));
        }
        Ok(Self(requested))
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for JobCount {
    fn default() -> Self {
        Self(MAX_JOBS)
    }
}

/// External recursive mirror tool (optional `[mirror]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Program to run, looked up on `PATH`.
    pub program: String,
    /// Arguments placed before the subfolder URL.
    pub args: Vec<String>,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            program: "wget".to_string(),
            args: vec!["-r".to_string(), "-nH".to_string()],
        }
    }
}

/// Single-file fetch settings (optional `[fetch]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Connect timeout in seconds. Unset means no timeout.
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
    #[serde(default = "default_follow_redirects")]
    pub follow_redirects: bool,
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_follow_redirects() -> bool {
    true
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: None,
            follow_redirects: true,
            user_agent: None,
        }
    }
}

impl FetchConfig {
    pub fn to_options(&self) -> FetchOptions {
        FetchOptions {
            connect_timeout: self.connect_timeout_secs.map(Duration::from_secs),
            follow_redirects: self.follow_redirects,
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Global configuration loaded from `~/.config/msd-dl/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MsdConfig {
    /// Bulk-mirror worker count. Validated through [`JobCount`] when used.
    pub n_jobs: usize,
    /// Output root for manifest mode.
    pub out_dir: PathBuf,
    /// Keep going after a failed manifest row instead of aborting the run.
    pub continue_on_error: bool,
    pub mirror: Option<MirrorConfig>,
    pub fetch: Option<FetchConfig>,
}

impl Default for MsdConfig {
    fn default() -> Self {
        Self {
            n_jobs: MAX_JOBS,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            continue_on_error: false,
            mirror: None,
            fetch: None,
        }
    }
}

impl MsdConfig {
    pub fn mirror_config(&self) -> MirrorConfig {
        self.mirror.clone().unwrap_or_default()
    }

    pub fn fetch_options(&self) -> FetchOptions {
        self.fetch.clone().unwrap_or_default().to_options()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("msd-dl")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<MsdConfig> {
    load_or_init_at(&config_path()?)
}

/// Like [`load_or_init`] but at an explicit path. A file that exists but does
/// not parse is an error, never silently replaced by defaults.
pub fn load_or_init_at(path: &Path) -> Result<MsdConfig> {
    if !path.exists() {
        let default_cfg = MsdConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(path)
}

/// Load configuration from an explicit file. A missing file is an error.
pub fn load_from_path(path: &Path) -> Result<MsdConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: MsdConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
