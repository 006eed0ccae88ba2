use std::path::PathBuf;

use serde::Deserialize;

/// On-disk configuration. Every key is optional.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub volume: Option<String>,
    pub snapshot: SnapshotConfig,
    pub mount: MountConfig,
    pub backup: BackupConfig,
    pub credentials: CredentialConfig,
    pub logs: LogConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SnapshotConfig {
    pub program: String,
    #[serde(rename = "createArgs")]
    pub create_args: Vec<String>,
    #[serde(rename = "listArgs")]
    pub list_args: Vec<String>,
    pub prefix: String,
    pub suffix: String,
    #[serde(rename = "timestampFormat")]
    pub timestamp_format: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            program: "/usr/bin/tmutil".to_string(),
            create_args: vec!["localsnapshot".to_string()],
            list_args: vec!["listlocalsnapshots".to_string()],
            prefix: "com.apple.TimeMachine.".to_string(),
            suffix: ".local".to_string(),
            timestamp_format: "%Y-%m-%d-%H%M%S".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MountConfig {
    pub path: String,
    pub program: String,
    pub args: Vec<String>,
    #[serde(rename = "unmountProgram")]
    pub unmount_program: String,
    #[serde(rename = "unmountArgs")]
    pub unmount_args: Vec<String>,
}

impl Default for MountConfig {
    fn default() -> Self {
        Self {
            path: "/tmp/snapshot".to_string(),
            program: "/sbin/mount".to_string(),
            args: vec!["-t".to_string(), "apfs".to_string(), "-r".to_string()],
            unmount_program: "/usr/sbin/diskutil".to_string(),
            unmount_args: vec!["unmount".to_string()],
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackupConfig {
    pub program: String,
    pub args: Vec<String>,
    pub source: Option<String>,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            program: "/usr/local/bin/kopia".to_string(),
            args: vec!["snapshot".to_string(), "create".to_string()],
            source: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CredentialConfig {
    pub env: String,
}

impl Default for CredentialConfig {
    fn default() -> Self {
        Self {
            env: "GOOGLE_APPLICATION_CREDENTIALS".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LogConfig {
    pub dir: Option<String>,
    pub name: String,
    #[serde(rename = "retentionDays")]
    pub retention_days: u32,
    pub roll: Option<Vec<String>>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            dir: None,
            name: "snaplaunch".to_string(),
            retention_days: 7,
            roll: None,
        }
    }
}

/// Snapshot naming convention: `<prefix><timestamp><suffix>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotNaming {
    pub prefix: String,
    pub suffix: String,
    pub timestamp_format: String,
}

#[derive(Debug, Clone)]
pub struct Tool {
    pub program: PathBuf,
    pub args: Vec<String>,
}

/// Validated settings handed to every step of a run.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub volume: String,
    pub snapshot_tool: PathBuf,
    pub create_args: Vec<String>,
    pub list_args: Vec<String>,
    pub naming: SnapshotNaming,
    pub mount_path: PathBuf,
    pub mount: Tool,
    pub unmount: Tool,
    pub backup: Tool,
    pub source: PathBuf,
    pub credential_env: String,
    pub credential: Option<String>,
    /// Unresolved when `HOME` is unset and `logs.dir` is not configured.
    pub log_dir: Option<PathBuf>,
    pub log_name: String,
    pub log_retention_days: u32,
    pub log_roll: Vec<String>,
}
