use std::fs;
use std::path::Path;
use std::time::{Duration, SystemTime};

use tracing::{info, warn};
use walkdir::WalkDir;

pub const DAY: Duration = Duration::from_secs(24 * 60 * 60);

/// Delete log files older than `retention` from `<base>/<prefix>` for each prefix.
///
/// Only regular files whose name starts with the prefix are touched. Problems
/// are logged and never fail the run. Returns the number of files removed
/// (or, under dry-run, that would have been removed).
pub fn roll_logs(
    base: &Path,
    prefixes: &[String],
    retention: Duration,
    now: SystemTime,
    dry_run: bool,
) -> usize {
    let mut removed = 0;
    for prefix in prefixes {
        match roll_one(&base.join(prefix), prefix, retention, now, dry_run) {
            Ok(count) => removed += count,
            Err(err) => warn!("failed to roll {} logs: {}", prefix, err),
        }
    }
    removed
}

fn roll_one(
    dir: &Path,
    prefix: &str,
    retention: Duration,
    now: SystemTime,
    dry_run: bool,
) -> Result<usize, String> {
    let mut removed = 0;
    for entry in WalkDir::new(dir).follow_links(false) {
        let entry = entry.map_err(|e| format!("walk {}: {}", dir.display(), e))?;
        let named = entry.file_name().to_string_lossy().starts_with(prefix);
        if !named || !entry.file_type().is_file() {
            continue;
        }
        let modified = entry
            .metadata()
            .map_err(|e| format!("stat {}: {}", entry.path().display(), e))?
            .modified()
            .map_err(|e| format!("mtime {}: {}", entry.path().display(), e))?;
        let age = now.duration_since(modified).unwrap_or(Duration::ZERO);
        if age <= retention {
            continue;
        }
        if dry_run {
            info!("dry-run: rm {}", entry.path().display());
            removed += 1;
            continue;
        }
        match fs::remove_file(entry.path()) {
            Ok(()) => removed += 1,
            Err(e) => warn!("can't delete old log {}: {}", entry.path().display(), e),
        }
    }
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        let dir = TempDir::new().expect("tempdir");
        let kopia = dir.path().join("kopia");
        fs::create_dir_all(kopia.join("cli-logs")).unwrap();
        fs::write(kopia.join("kopia-1.log"), b"old").unwrap();
        fs::write(kopia.join("cli-logs").join("kopia-2.log"), b"old").unwrap();
        fs::write(kopia.join("notes.txt"), b"keep").unwrap();
        dir
    }

    #[test]
    fn removes_only_old_prefixed_files() {
        let dir = setup();
        let later = SystemTime::now() + 8 * DAY;
        let removed = roll_logs(dir.path(), &["kopia".to_string()], 7 * DAY, later, false);
        assert_eq!(removed, 2);
        assert!(!dir.path().join("kopia/kopia-1.log").exists());
        assert!(!dir.path().join("kopia/cli-logs/kopia-2.log").exists());
        assert!(dir.path().join("kopia/notes.txt").exists());
    }

    #[test]
    fn keeps_recent_files() {
        let dir = setup();
        let prefixes = ["kopia".to_string()];
        let removed = roll_logs(dir.path(), &prefixes, 7 * DAY, SystemTime::now(), false);
        assert_eq!(removed, 0);
        assert!(dir.path().join("kopia/kopia-1.log").exists());
    }

    #[test]
    fn dry_run_keeps_files() {
        let dir = setup();
        let later = SystemTime::now() + 8 * DAY;
        let removed = roll_logs(dir.path(), &["kopia".to_string()], 7 * DAY, later, true);
        assert_eq!(removed, 2);
        assert!(dir.path().join("kopia/kopia-1.log").exists());
    }

    #[test]
    fn missing_directory_is_not_fatal() {
        let dir = setup();
        let later = SystemTime::now() + 8 * DAY;
        let removed = roll_logs(
            dir.path(),
            &["snaplaunch".to_string(), "kopia".to_string()],
            7 * DAY,
            later,
            false,
        );
        assert_eq!(removed, 2);
    }
}
