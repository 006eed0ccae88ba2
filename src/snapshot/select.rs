use std::fmt;

use chrono::NaiveDateTime;

use crate::config::SnapshotNaming;
use crate::error::SnapshotError;

/// A listing row that follows the naming convention and carries a valid timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub raw: String,
    pub taken_at: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedSnapshot {
    pub id: String,
    pub taken_at: NaiveDateTime,
}

impl fmt::Display for SelectedSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Parse one listing row. Rows outside the convention, or whose timestamp
/// does not survive a parse/format round trip unchanged, yield `None`.
pub fn parse_entry(line: &str, naming: &SnapshotNaming) -> Option<SnapshotEntry> {
    let line = line.trim();
    let stamp = line
        .strip_prefix(naming.prefix.as_str())?
        .strip_suffix(naming.suffix.as_str())?;
    let taken_at = NaiveDateTime::parse_from_str(stamp, &naming.timestamp_format).ok()?;
    if taken_at.format(&naming.timestamp_format).to_string() != stamp {
        return None;
    }
    Some(SnapshotEntry {
        raw: line.to_string(),
        taken_at,
    })
}

/// Pick the newest snapshot in `listing`. Row order is ignored.
pub fn select_latest(
    listing: &str,
    naming: &SnapshotNaming,
) -> Result<SelectedSnapshot, SnapshotError> {
    let latest = listing
        .lines()
        .filter_map(|line| parse_entry(line, naming))
        .map(|entry| entry.taken_at)
        .max();
    match latest {
        Some(taken_at) => Ok(SelectedSnapshot {
            id: format!(
                "{}{}{}",
                naming.prefix,
                taken_at.format(&naming.timestamp_format),
                naming.suffix
            ),
            taken_at,
        }),
        None => Err(SnapshotError::NoMatchingSnapshot {
            prefix: naming.prefix.clone(),
            suffix: naming.suffix.clone(),
        }),
    }
}
