use std::path::Path;

use crate::config::Tool;
use crate::util::command::Invocation;

/// Build the backup tool call for `target`, e.g. `kopia snapshot create <target>`.
pub fn backup_invocation(tool: &Tool, target: &Path) -> Invocation {
    Invocation::new(&tool.program)
        .args(tool.args.iter().cloned())
        .arg(target.to_string_lossy())
}
