use std::path::PathBuf;

use thiserror::Error;

use crate::types::ExitCode;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("logging: {0}")]
    Logging(String),
    #[error("{0}")]
    Credential(#[from] CredentialError),
    #[error("{0}")]
    Snapshot(#[from] SnapshotError),
    #[error("{0}")]
    Mount(#[from] MountError),
    #[error("{0}")]
    Backup(#[from] BackupError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config {0}: {1}")]
    Read(PathBuf, String),
    #[error("parse config: {0}")]
    Parse(String),
    #[error("{0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("{0} not defined")]
    Missing(String),
    #[error("{env} needs to point at an accessible credentials file ({path}: {reason})")]
    Invalid {
        env: String,
        path: PathBuf,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("create snapshot: {0}")]
    CreateFailed(String),
    #[error("list snapshots: {0}")]
    ListingUnavailable(String),
    #[error("no snapshot matching {prefix}<timestamp>{suffix} in listing")]
    NoMatchingSnapshot { prefix: String, suffix: String },
}

#[derive(Debug, Error)]
pub enum MountError {
    #[error("mount directory {0}")]
    Directory(String),
    #[error("mount {0}")]
    MountFailed(String),
    #[error("umount {0}")]
    UnmountFailed(String),
}

#[derive(Debug, Error)]
pub enum BackupError {
    #[error("backup tool {0}")]
    Launch(String),
    #[error("backup tool failed with exit code {code}")]
    ToolFailed { code: i32, output: String },
}

pub type Result<T> = std::result::Result<T, LaunchError>;

impl LaunchError {
    pub fn logging(msg: impl Into<String>) -> Self {
        LaunchError::Logging(msg.into())
    }

    pub fn exit_code(&self) -> ExitCode {
        match self {
            LaunchError::Config(_) => ExitCode::CredentialInvalid,
            LaunchError::Logging(_) => ExitCode::LoggingSetupFailed,
            LaunchError::Credential(_) => ExitCode::CredentialInvalid,
            LaunchError::Snapshot(err) => match err {
                SnapshotError::CreateFailed(_) => ExitCode::SnapshotCreationFailed,
                SnapshotError::ListingUnavailable(_) => ExitCode::ListingUnavailable,
                SnapshotError::NoMatchingSnapshot { .. } => ExitCode::NoMatchingSnapshot,
            },
            LaunchError::Mount(err) => match err {
                MountError::Directory(_) => ExitCode::MountDirectoryFailed,
                MountError::MountFailed(_) => ExitCode::MountFailed,
                MountError::UnmountFailed(_) => ExitCode::UnmountFailed,
            },
            LaunchError::Backup(_) => ExitCode::BackupToolFailed,
        }
    }
}
