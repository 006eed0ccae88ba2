use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use tracing::Dispatch;

pub mod roll;

pub use roll::roll_logs;

/// Where diagnostics for a run go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Console,
    /// `<dir>/<name>/<name>-<timestamp>-<pid>.log`
    File { dir: PathBuf, name: String },
}

/// A constructed log sink, installed by the caller for the duration of a run.
pub struct LogSink {
    pub dispatch: Dispatch,
    pub path: Option<PathBuf>,
}

pub fn build_sink(target: &LogTarget, verbose: bool) -> Result<LogSink> {
    let level = if verbose { "debug" } else { "info" };
    match target {
        LogTarget::Console => {
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(level)
                .with_writer(std::io::stderr)
                .finish();
            Ok(LogSink {
                dispatch: Dispatch::new(subscriber),
                path: None,
            })
        }
        LogTarget::File { dir, name } => {
            let path = create_log_file_path(dir, name, Local::now())?;
            let file = File::create(&path)
                .with_context(|| format!("can't create log file {}", path.display()))?;
            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .finish();
            Ok(LogSink {
                dispatch: Dispatch::new(subscriber),
                path: Some(path),
            })
        }
    }
}

fn create_log_file_path(dir: &Path, name: &str, now: DateTime<Local>) -> Result<PathBuf> {
    let log_dir = dir.join(name);
    fs::create_dir_all(&log_dir)
        .with_context(|| format!("can't make log directory {}", log_dir.display()))?;
    Ok(log_dir.join(log_file_name(name, now, std::process::id())))
}

pub fn log_file_name(name: &str, now: DateTime<Local>, pid: u32) -> String {
    format!("{}-{}-{}.log", name, now.format("%Y%m%d-%H%M%S"), pid)
}
