//! Bulk-mirror mode: one recursive mirror job per first-letter subfolder.
//!
//! The recursive crawl itself is delegated to a [`Mirror`] implementation
//! (by default an external `wget -r -nH`); this module only fans the 26
//! subfolder URLs out over a fixed-size worker pool and collects outcomes.

mod command;
mod dispatch;
mod report;

pub use command::CommandMirror;
pub use dispatch::mirror_all;
pub use report::MirrorReport;

use std::path::Path;

/// Result of mirroring one subfolder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorOutcome {
    /// Tool exited successfully.
    Completed,
    /// Tool exited non-zero (`None` if killed by a signal).
    Failed { code: Option<i32> },
    /// Tool could not be started at all.
    SpawnFailed(String),
}

impl MirrorOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MirrorOutcome::Completed)
    }
}

/// Recursively mirrors `url` into `local_root`, skipping files whose local
/// copy is already current. Implementations block until the mirror finishes
/// and must be callable from several worker threads at once.
pub trait Mirror: Send + Sync {
    fn mirror(&self, url: &str, local_root: &Path) -> MirrorOutcome;
}
