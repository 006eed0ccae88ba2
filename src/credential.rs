use std::fs;
use std::path::PathBuf;

use crate::error::CredentialError;

/// Verify the credential reference names an existing regular file.
///
/// `env` is only used for reporting. Runs once, before anything is mutated.
pub fn check(env: &str, value: Option<&str>) -> Result<PathBuf, CredentialError> {
    let value = match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => return Err(CredentialError::Missing(env.to_string())),
    };
    let path = PathBuf::from(value);
    let invalid = |reason: String| CredentialError::Invalid {
        env: env.to_string(),
        path: path.clone(),
        reason,
    };
    let meta = fs::metadata(&path).map_err(|e| invalid(e.to_string()))?;
    if !meta.is_file() {
        return Err(invalid("not a regular file".to_string()));
    }
    Ok(path)
}
