use std::env;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Component, Path, PathBuf};

/// Create `path` (mode 0700) when absent; an existing directory is reused as is.
/// Returns whether the directory was created.
pub fn ensure_private_dir(path: &Path) -> Result<bool, String> {
    if path.exists() {
        let meta = fs::metadata(path).map_err(|e| format!("stat {}: {}", path.display(), e))?;
        if !meta.is_dir() {
            return Err(format!("{} is not a directory", path.display()));
        }
        return Ok(false);
    }
    fs::create_dir_all(path).map_err(|e| format!("create {}: {}", path.display(), e))?;
    let mut perms = fs::metadata(path)
        .map_err(|e| format!("stat {}: {}", path.display(), e))?
        .permissions();
    perms.set_mode(0o700);
    fs::set_permissions(path, perms).map_err(|e| format!("chmod {}: {}", path.display(), e))?;
    Ok(true)
}

/// Join `path` below `root` even when `path` is absolute. `..` components are
/// dropped so the result never leaves `root`.
pub fn join_under(root: &Path, path: &Path) -> PathBuf {
    let mut out = root.to_path_buf();
    for component in path.components() {
        if let Component::Normal(part) = component {
            out.push(part);
        }
    }
    out
}

pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Expand a leading `~/` using `home`.
pub fn expand_home(value: &str, home: Option<&Path>) -> Result<PathBuf, String> {
    if value == "~" || value.starts_with("~/") {
        let home = home.ok_or_else(|| format!("cannot expand {}: HOME is not set", value))?;
        let rest = value.trim_start_matches('~').trim_start_matches('/');
        if rest.is_empty() {
            return Ok(home.to_path_buf());
        }
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(value))
}
