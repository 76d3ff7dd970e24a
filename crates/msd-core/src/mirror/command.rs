//! Mirror via an external program (wget by default).

use std::path::Path;
use std::process::{Command, Stdio};

use super::{Mirror, MirrorOutcome};
use crate::config::MirrorConfig;

/// Runs `<program> <args...> <url>` with `local_root` as the working directory.
///
/// With the default `wget -r -nH`, files land at `<local_root>/<remote path>`
/// (host name stripped) and wget's own timestamp/size check decides what to skip.
#[derive(Debug, Clone)]
pub struct CommandMirror {
    program: String,
    args: Vec<String>,
}

impl CommandMirror {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn from_config(cfg: &MirrorConfig) -> Self {
        Self::new(cfg.program.clone(), cfg.args.clone())
    }

    /// Arguments passed for `url`, in order.
    pub fn command_args(&self, url: &str) -> Vec<String> {
        let mut args = self.args.clone();
        args.push(url.to_string());
        args
    }
}

impl Default for CommandMirror {
    fn default() -> Self {
        Self::from_config(&MirrorConfig::default())
    }
}

impl Mirror for CommandMirror {
    fn mirror(&self, url: &str, local_root: &Path) -> MirrorOutcome {
        let status = Command::new(&self.program)
            .args(self.command_args(url))
            .current_dir(local_root)
            .stdin(Stdio::null())
            .status();
        match status {
            Ok(status) if status.success() => MirrorOutcome::Completed,
            Ok(status) => MirrorOutcome::Failed {
                code: status.code(),
            },
            Err(e) => MirrorOutcome::SpawnFailed(format!("{}: {}", self.program, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_recursive_wget_without_host_dir() {
        let m = CommandMirror::default();
        assert_eq!(m.program, "wget");
        assert_eq!(
            m.command_args("http://h/msd/A/"),
            vec!["-r", "-nH", "http://h/msd/A/"]
        );
    }

    #[test]
    fn missing_program_is_spawn_failure() {
        let dir = tempfile::tempdir().unwrap();
        let m = CommandMirror::new("msd-dl-no-such-mirror-tool", vec![]);
        assert!(matches!(
            m.mirror("http://h/A/", dir.path()),
            MirrorOutcome::SpawnFailed(_)
        ));
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_maps_to_outcome() {
        let dir = tempfile::tempdir().unwrap();
        let ok = CommandMirror::new("sh", vec!["-c".into(), "exit 0".into()]);
        assert_eq!(ok.mirror("http://h/A/", dir.path()), MirrorOutcome::Completed);
        let bad = CommandMirror::new("sh", vec!["-c".into(), "exit 8".into()]);
        assert_eq!(
            bad.mirror("http://h/A/", dir.path()),
            MirrorOutcome::Failed { code: Some(8) }
        );
    }

    #[cfg(unix)]
    #[test]
    fn runs_in_local_root_with_url_last() {
        let dir = tempfile::tempdir().unwrap();
        // `sh -c script name` binds the trailing URL to $0.
        let m = CommandMirror::new(
            "sh",
            vec!["-c".into(), "printf '%s' \"$0\" > seen_url".into()],
        );
        assert!(m.mirror("http://h/msd/B/", dir.path()).is_success());
        let seen = std::fs::read_to_string(dir.path().join("seen_url")).unwrap();
        assert_eq!(seen, "http://h/msd/B/");
    }
}
