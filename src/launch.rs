//! The fixed run sequence: credential check, snapshot, select, mount, backup, unmount.

use tracing::{error, info};

use crate::backup::{run_backup, BackupRun};
use crate::config::RuntimeConfig;
use crate::credential;
use crate::error::Result;
use crate::mount::MountManager;
use crate::snapshot::{create_snapshot, find_latest};
use crate::types::RunMode;
use crate::util::command::CommandRunner;

/// Perform one backup attempt.
///
/// Stops at the first failing step. Once a snapshot is mounted the unmount is
/// attempted exactly once, whether or not the backup tool succeeded; if both
/// fail the backup failure is the one reported.
pub fn run_once(
    cfg: &RuntimeConfig,
    runner: &dyn CommandRunner,
    run_mode: RunMode,
) -> Result<BackupRun> {
    let credential = credential::check(&cfg.credential_env, cfg.credential.as_deref())?;
    info!(credential = %credential.display(), "credential file present");

    create_snapshot(runner, cfg)?;

    let selected = find_latest(runner, cfg)?;
    info!(snapshot = %selected, "last snapshot");

    let manager = MountManager::new(runner, cfg, run_mode);
    let mounted = manager.mount(&selected)?;

    let backup = run_backup(runner, cfg, &mounted);
    let unmounted = mounted.unmount();

    let run = match (backup, unmounted) {
        (Ok(run), Ok(())) => run,
        (Ok(_), Err(err)) => return Err(err.into()),
        (Err(err), Ok(())) => return Err(err.into()),
        (Err(err), Err(unmount_err)) => {
            error!("{}", unmount_err);
            return Err(err.into());
        }
    };
    info!("all done");
    Ok(run)
}
