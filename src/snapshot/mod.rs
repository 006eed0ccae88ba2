use tracing::debug;

use crate::config::RuntimeConfig;
use crate::error::SnapshotError;
use crate::util::command::{CommandRunner, Invocation};

pub mod create;
pub mod select;

pub use create::create_snapshot;
pub use select::{parse_entry, select_latest, SelectedSnapshot, SnapshotEntry};

/// Fetch the raw snapshot listing for the configured volume.
pub fn list_snapshots(
    runner: &dyn CommandRunner,
    cfg: &RuntimeConfig,
) -> Result<String, SnapshotError> {
    let invocation = Invocation::new(&cfg.snapshot_tool)
        .args(cfg.list_args.iter().cloned())
        .arg(cfg.volume.as_str())
        .read_only();
    let output = runner
        .run(&invocation)
        .map_err(|e| SnapshotError::ListingUnavailable(format!("{}: {}", invocation, e)))?;
    if !output.success() {
        return Err(SnapshotError::ListingUnavailable(format!(
            "{} failed with exit code {}; output: {}",
            invocation,
            output.code,
            output.combined().trim()
        )));
    }
    let listing = output.stdout_text();
    debug!(rows = listing.lines().count(), "snapshot listing");
    Ok(listing)
}

/// List snapshots and pick the newest one following the naming convention.
pub fn find_latest(
    runner: &dyn CommandRunner,
    cfg: &RuntimeConfig,
) -> Result<SelectedSnapshot, SnapshotError> {
    let listing = list_snapshots(runner, cfg)?;
    select_latest(&listing, &cfg.naming)
}
