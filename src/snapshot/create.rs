use tracing::info;

use crate::config::RuntimeConfig;
use crate::error::SnapshotError;
use crate::util::command::{CommandRunner, Invocation};

/// Ask the platform for a new local snapshot. Called unconditionally, once.
pub fn create_snapshot(
    runner: &dyn CommandRunner,
    cfg: &RuntimeConfig,
) -> Result<(), SnapshotError> {
    let invocation = Invocation::new(&cfg.snapshot_tool).args(cfg.create_args.iter().cloned());
    let output = runner
        .run(&invocation)
        .map_err(|e| SnapshotError::CreateFailed(format!("{}: {}", invocation, e)))?;
    if !output.success() {
        return Err(SnapshotError::CreateFailed(format!(
            "{} failed with exit code {}",
            invocation, output.code
        )));
    }
    info!(volume = %cfg.volume, "local snapshot requested");
    Ok(())
}
