use std::path::Path;

use tracing::{info, warn};

use crate::config::RuntimeConfig;
use crate::error::MountError;
use crate::snapshot::SelectedSnapshot;
use crate::types::RunMode;
use crate::util::command::CommandRunner;
use crate::util::paths::ensure_private_dir;

pub mod ops;

use ops::{mount_snapshot, unmount_path};

/// Owns the fixed mount point. At most one snapshot is bound to it at a time.
pub struct MountManager<'a> {
    runner: &'a dyn CommandRunner,
    cfg: &'a RuntimeConfig,
    run_mode: RunMode,
}

impl<'a> MountManager<'a> {
    pub fn new(runner: &'a dyn CommandRunner, cfg: &'a RuntimeConfig, run_mode: RunMode) -> Self {
        Self { runner, cfg, run_mode }
    }

    pub fn mountpoint(&self) -> &Path {
        &self.cfg.mount_path
    }

    /// Bind `snapshot` read-only at the mount point.
    ///
    /// Whatever a previous run left attached is unmounted first; that attempt
    /// is expected to fail when nothing is mounted and is only logged.
    pub fn mount(&self, snapshot: &SelectedSnapshot) -> Result<MountedSnapshot<'a>, MountError> {
        let mountpoint = self.mountpoint();
        match unmount_path(self.runner, &self.cfg.unmount, mountpoint) {
            Ok(()) => info!(mountpoint = %mountpoint.display(), "unmounted leftover snapshot"),
            Err(err) => info!("defensive unmount failed, probably nothing mounted: {}", err),
        }

        self.prepare_dir()?;

        mount_snapshot(self.runner, &self.cfg.mount, &self.cfg.volume, &snapshot.id, mountpoint)?;
        info!(
            snapshot = %snapshot,
            mountpoint = %mountpoint.display(),
            "snapshot mounted read-only"
        );
        Ok(MountedSnapshot {
            runner: self.runner,
            cfg: self.cfg,
            snapshot: snapshot.id.clone(),
        })
    }

    fn prepare_dir(&self) -> Result<(), MountError> {
        let mountpoint = self.mountpoint();
        if self.run_mode.dry_run {
            if !mountpoint.exists() {
                info!("dry-run: mkdir -p {}", mountpoint.display());
            }
            return Ok(());
        }
        if ensure_private_dir(mountpoint).map_err(MountError::Directory)? {
            info!(mountpoint = %mountpoint.display(), "created mount directory");
        }
        Ok(())
    }
}

/// A snapshot attached at the mount point. Consumed by [`MountedSnapshot::unmount`].
#[must_use = "a mounted snapshot stays attached until unmounted"]
pub struct MountedSnapshot<'a> {
    runner: &'a dyn CommandRunner,
    cfg: &'a RuntimeConfig,
    snapshot: String,
}

impl<'a> MountedSnapshot<'a> {
    pub fn path(&self) -> &Path {
        &self.cfg.mount_path
    }

    pub fn snapshot(&self) -> &str {
        &self.snapshot
    }

    /// Detach the snapshot. On failure the mount is left attached.
    pub fn unmount(self) -> Result<(), MountError> {
        match unmount_path(self.runner, &self.cfg.unmount, &self.cfg.mount_path) {
            Ok(()) => {
                info!(mountpoint = %self.cfg.mount_path.display(), "snapshot unmounted");
                Ok(())
            }
            Err(err) => {
                warn!(snapshot = %self.snapshot, "snapshot left mounted");
                Err(err)
            }
        }
    }
}
