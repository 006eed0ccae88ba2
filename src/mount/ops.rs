use std::path::Path;

use crate::config::Tool;
use crate::error::MountError;
use crate::util::command::{CommandRunner, Invocation};

/// Mount `snapshot` of `volume` read-only at `mountpoint`.
pub fn mount_snapshot(
    runner: &dyn CommandRunner,
    tool: &Tool,
    volume: &str,
    snapshot: &str,
    mountpoint: &Path,
) -> Result<(), MountError> {
    let invocation = Invocation::new(&tool.program)
        .args(tool.args.iter().cloned())
        .arg("-o")
        .arg(format!("-s={}", snapshot))
        .arg(volume)
        .arg(mountpoint.to_string_lossy());
    let output = runner
        .run(&invocation)
        .map_err(|e| MountError::MountFailed(format!("{}: {}", snapshot, e)))?;
    if !output.success() {
        return Err(MountError::MountFailed(format!(
            "{} at {} failed with exit code {}: {}",
            snapshot,
            mountpoint.display(),
            output.code,
            output.combined().trim()
        )));
    }
    Ok(())
}

pub fn unmount_path(
    runner: &dyn CommandRunner,
    tool: &Tool,
    mountpoint: &Path,
) -> Result<(), MountError> {
    let invocation = Invocation::new(&tool.program)
        .args(tool.args.iter().cloned())
        .arg(mountpoint.to_string_lossy());
    let output = runner
        .run(&invocation)
        .map_err(|e| MountError::UnmountFailed(format!("{}: {}", mountpoint.display(), e)))?;
    if !output.success() {
        return Err(MountError::UnmountFailed(format!(
            "{} failed with exit code {}",
            mountpoint.display(),
            output.code
        )));
    }
    Ok(())
}
