use std::path::{Path, PathBuf};

use tracing::{debug, error, info};

use crate::backup::tool::backup_invocation;
use crate::config::RuntimeConfig;
use crate::error::BackupError;
use crate::mount::MountedSnapshot;
use crate::util::command::CommandRunner;
use crate::util::paths::join_under;

pub mod tool;

/// Record of one backup tool run. Logged, never persisted.
#[derive(Debug, Clone)]
pub struct BackupRun {
    pub target: PathBuf,
    pub code: i32,
    pub output: String,
}

/// Directory inside the mount point that mirrors `source`.
pub fn snapshot_source_path(mountpoint: &Path, source: &Path) -> PathBuf {
    join_under(mountpoint, source)
}

/// Run the backup tool once against the source tree inside the mounted snapshot.
pub fn run_backup(
    runner: &dyn CommandRunner,
    cfg: &RuntimeConfig,
    mounted: &MountedSnapshot<'_>,
) -> Result<BackupRun, BackupError> {
    let target = snapshot_source_path(mounted.path(), &cfg.source);
    let invocation = backup_invocation(&cfg.backup, &target);
    info!(target = %target.display(), snapshot = mounted.snapshot(), "running backup tool");
    let output = runner
        .run(&invocation)
        .map_err(|e| BackupError::Launch(format!("{}: {}", invocation, e)))?;
    let run = BackupRun {
        target,
        code: output.code,
        output: output.combined(),
    };
    if run.code != 0 {
        error!(code = run.code, "backup tool failed, output:\n{}", run.output);
        return Err(BackupError::ToolFailed {
            code: run.code,
            output: run.output,
        });
    }
    info!(target = %run.target.display(), "backup tool finished without errors");
    debug!("backup tool output:\n{}", run.output);
    Ok(run)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mount::MountManager;
    use crate::testing::{runtime_config, snapshot};
    use crate::types::RunMode;
    use crate::util::command::fake::{failed, ok, FakeRunner};
    use crate::util::command::CommandOutput;
    use tempfile::TempDir;

    #[test]
    fn target_is_source_inside_mountpoint() {
        assert_eq!(
            snapshot_source_path(Path::new("/tmp/snapshot"), Path::new("/Users/alice")),
            PathBuf::from("/tmp/snapshot/Users/alice")
        );
    }

    #[test]
    fn backup_targets_mounted_source_and_captures_output() {
        let dir = TempDir::new().expect("tempdir");
        let cfg = runtime_config(dir.path().to_str().unwrap());
        let runner = FakeRunner::new(|inv| {
            if inv.program.ends_with("kopia") {
                Ok(CommandOutput {
                    code: 0,
                    stdout: b"Snapshotting\n".to_vec(),
                    stderr: b"done\n".to_vec(),
                })
            } else {
                Ok(ok(""))
            }
        });
        let manager = MountManager::new(&runner, &cfg, RunMode::default());
        let mounted = manager
            .mount(&snapshot("com.example.Snap.2023-06-01-120000.local"))
            .expect("mount");
        let run = run_backup(&runner, &cfg, &mounted).expect("backup");
        assert_eq!(run.target, dir.path().join("Users/alice"));
        assert_eq!(run.output, "Snapshotting\ndone\n");

        let last = runner.calls().pop().expect("call");
        assert_eq!(
            last.args,
            vec![
                "snapshot".to_string(),
                "create".to_string(),
                dir.path().join("Users/alice").to_string_lossy().to_string(),
            ]
        );
        mounted.unmount().expect("unmount");
    }

    #[test]
    fn nonzero_exit_is_tool_failure_with_output() {
        let dir = TempDir::new().expect("tempdir");
        let cfg = runtime_config(dir.path().to_str().unwrap());
        let runner = FakeRunner::new(|inv| {
            if inv.program.ends_with("kopia") {
                Ok(failed(1, "repository not connected"))
            } else {
                Ok(ok(""))
            }
        });
        let manager = MountManager::new(&runner, &cfg, RunMode::default());
        let mounted = manager
            .mount(&snapshot("com.example.Snap.2023-06-01-120000.local"))
            .expect("mount");
        match run_backup(&runner, &cfg, &mounted) {
            Err(BackupError::ToolFailed { code, output }) => {
                assert_eq!(code, 1);
                assert_eq!(output, "repository not connected");
            }
            other => panic!("unexpected {:?}", other),
        }
        mounted.unmount().expect("unmount");
    }
}
