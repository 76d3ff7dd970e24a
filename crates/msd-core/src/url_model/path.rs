//! Local target paths for manifest rows.

use std::path::{Path, PathBuf};

/// Where a manifest `audio_path` lands under `out_dir`.
///
/// A leading `/` on `audio_path` is ignored so the result always stays under
/// `out_dir` (`Path::join` would otherwise replace the root).
pub fn local_target(out_dir: &Path, audio_path: &str) -> PathBuf {
    out_dir.join(audio_path.trim_start_matches('/'))
}
