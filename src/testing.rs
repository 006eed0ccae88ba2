use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::config::{RuntimeConfig, SnapshotNaming, Tool};
use crate::snapshot::SelectedSnapshot;

pub fn runtime_config(mount_path: &str) -> RuntimeConfig {
    RuntimeConfig {
        volume: "/System/Volumes/Data".to_string(),
        snapshot_tool: PathBuf::from("/usr/bin/tmutil"),
        create_args: vec!["localsnapshot".to_string()],
        list_args: vec!["listlocalsnapshots".to_string()],
        naming: SnapshotNaming {
            prefix: "com.example.Snap.".to_string(),
            suffix: ".local".to_string(),
            timestamp_format: "%Y-%m-%d-%H%M%S".to_string(),
        },
        mount_path: PathBuf::from(mount_path),
        mount: Tool {
            program: PathBuf::from("/sbin/mount"),
            args: vec!["-t".to_string(), "apfs".to_string(), "-r".to_string()],
        },
        unmount: Tool {
            program: PathBuf::from("/usr/sbin/diskutil"),
            args: vec!["unmount".to_string()],
        },
        backup: Tool {
            program: PathBuf::from("/usr/local/bin/kopia"),
            args: vec!["snapshot".to_string(), "create".to_string()],
        },
        source: PathBuf::from("/Users/alice"),
        credential_env: "GOOGLE_APPLICATION_CREDENTIALS".to_string(),
        credential: None,
        log_dir: Some(PathBuf::from("/Users/alice/Library/Logs")),
        log_name: "snaplaunch".to_string(),
        log_retention_days: 7,
        log_roll: vec!["kopia".to_string(), "snaplaunch".to_string()],
    }
}

pub fn snapshot(id: &str) -> SelectedSnapshot {
    let stamp = id
        .trim_start_matches("com.example.Snap.")
        .trim_end_matches(".local");
    SelectedSnapshot {
        id: id.to_string(),
        taken_at: NaiveDateTime::parse_from_str(stamp, "%Y-%m-%d-%H%M%S").expect("timestamp"),
    }
}
