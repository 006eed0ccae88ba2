use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::config::model::{Config, RuntimeConfig, SnapshotNaming, Tool};
use crate::error::{ConfigError, Result};
use crate::util::paths::{expand_home, home_dir};

const DEFAULT_CONFIG_FILE: &str = ".config/snaplaunch.yaml";
const DEFAULT_VOLUME: &str = "/System/Volumes/Data";
const DEFAULT_LOG_DIR: &str = "Library/Logs";

/// Load the configuration file and resolve it against the process environment.
///
/// An explicit `path` must exist; the default per-user file is optional.
pub fn load_config(path: Option<&Path>) -> Result<RuntimeConfig> {
    let home = home_dir();
    let cfg = match path {
        Some(path) => read_config(path)?,
        None => match home.as_ref().map(|h| h.join(DEFAULT_CONFIG_FILE)) {
            Some(default) if default.exists() => read_config(&default)?,
            _ => Config::default(),
        },
    };
    let credential = env::var(&cfg.credentials.env)
        .ok()
        .filter(|value| !value.is_empty());
    resolve(cfg, home.as_deref(), credential)
}

fn read_config(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .map_err(|e| ConfigError::Read(path.to_path_buf(), e.to_string()))?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<Config> {
    if contents.trim().is_empty() {
        return Ok(Config::default());
    }
    let cfg = serde_yaml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;
    Ok(cfg)
}

/// Validate `cfg` and fill in the values derived from the environment.
pub fn resolve(
    cfg: Config,
    home: Option<&Path>,
    credential: Option<String>,
) -> Result<RuntimeConfig> {
    let snapshot = cfg.snapshot;
    for (key, value) in [
        ("snapshot.program", &snapshot.program),
        ("snapshot.prefix", &snapshot.prefix),
        ("snapshot.suffix", &snapshot.suffix),
        ("snapshot.timestampFormat", &snapshot.timestamp_format),
        ("mount.path", &cfg.mount.path),
        ("mount.program", &cfg.mount.program),
        ("mount.unmountProgram", &cfg.mount.unmount_program),
        ("backup.program", &cfg.backup.program),
        ("credentials.env", &cfg.credentials.env),
        ("logs.name", &cfg.logs.name),
    ] {
        if value.trim().is_empty() {
            return Err(ConfigError::Invalid(format!("{} is empty", key)).into());
        }
    }
    if cfg.logs.retention_days == 0 {
        return Err(
            ConfigError::Invalid("logs.retentionDays must be at least 1".to_string()).into(),
        );
    }

    let mount_path = expand(&cfg.mount.path, home)?;
    if !mount_path.is_absolute() {
        return Err(ConfigError::Invalid(format!(
            "mount.path {} must be absolute",
            mount_path.display()
        ))
        .into());
    }

    let source = match cfg.backup.source.as_deref() {
        Some(source) if !source.trim().is_empty() => expand(source, home)?,
        _ => home.map(Path::to_path_buf).ok_or_else(|| {
            ConfigError::Invalid("HOME is not set; configure backup.source".to_string())
        })?,
    };

    if source.components().any(|c| matches!(c, Component::ParentDir)) {
        return Err(ConfigError::Invalid(format!(
            "backup.source {} must not contain '..'",
            source.display()
        ))
        .into());
    }

    // Only file logging needs this; a missing directory is reported when the sink is built.
    let log_dir = match cfg.logs.dir.as_deref() {
        Some(dir) if !dir.trim().is_empty() => expand_home(dir, home).ok(),
        _ => home.map(|h| h.join(DEFAULT_LOG_DIR)),
    };

    let log_roll = cfg
        .logs
        .roll
        .unwrap_or_else(|| vec!["kopia".to_string(), cfg.logs.name.clone()]);

    Ok(RuntimeConfig {
        volume: cfg.volume.unwrap_or_else(|| DEFAULT_VOLUME.to_string()),
        snapshot_tool: expand(&snapshot.program, home)?,
        create_args: snapshot.create_args,
        list_args: snapshot.list_args,
        naming: SnapshotNaming {
            prefix: snapshot.prefix,
            suffix: snapshot.suffix,
            timestamp_format: snapshot.timestamp_format,
        },
        mount_path,
        mount: Tool {
            program: expand(&cfg.mount.program, home)?,
            args: cfg.mount.args,
        },
        unmount: Tool {
            program: expand(&cfg.mount.unmount_program, home)?,
            args: cfg.mount.unmount_args,
        },
        backup: Tool {
            program: expand(&cfg.backup.program, home)?,
            args: cfg.backup.args,
        },
        source,
        credential_env: cfg.credentials.env,
        credential,
        log_dir,
        log_name: cfg.logs.name,
        log_retention_days: cfg.logs.retention_days,
        log_roll,
    })
}

fn expand(value: &str, home: Option<&Path>) -> Result<PathBuf> {
    Ok(expand_home(value, home).map_err(ConfigError::Invalid)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LaunchError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_follow_home() {
        let home = Some(Path::new("/Users/alice"));
        let cfg = resolve(Config::default(), home, None).expect("resolve");
        assert_eq!(cfg.volume, "/System/Volumes/Data");
        assert_eq!(cfg.source, PathBuf::from("/Users/alice"));
        assert_eq!(cfg.log_dir, Some(PathBuf::from("/Users/alice/Library/Logs")));
        assert_eq!(cfg.mount_path, PathBuf::from("/tmp/snapshot"));
        assert_eq!(cfg.naming.prefix, "com.apple.TimeMachine.");
        assert_eq!(cfg.log_roll, vec!["kopia".to_string(), "snaplaunch".to_string()]);
        assert!(cfg.credential.is_none());
    }

    #[test]
    fn load_config_from_yaml() {
        let mut file = NamedTempFile::new().expect("tempfile");
        let yaml = r#"
volume: "/data"
snapshot:
  prefix: "com.example.Snap."
mount:
  path: "/run/snaplaunch/mnt"
  unmountProgram: "/bin/umount"
  unmountArgs: []
backup:
  source: "/srv/home"
logs:
  dir: "/var/log"
  retentionDays: 3
"#;
        file.write_all(yaml.as_bytes()).expect("write");
        let cfg = load_config(Some(file.path())).expect("load");
        assert_eq!(cfg.volume, "/data");
        assert_eq!(cfg.naming.prefix, "com.example.Snap.");
        assert_eq!(cfg.naming.suffix, ".local");
        assert_eq!(cfg.mount_path, PathBuf::from("/run/snaplaunch/mnt"));
        assert_eq!(cfg.unmount.program, PathBuf::from("/bin/umount"));
        assert!(cfg.unmount.args.is_empty());
        assert_eq!(cfg.source, PathBuf::from("/srv/home"));
        assert_eq!(cfg.log_retention_days, 3);
    }

    #[test]
    fn example_config_matches_defaults() {
        let cfg = parse_config(include_str!("../../snaplaunch.example.yaml")).expect("parse");
        let home = Some(Path::new("/Users/alice"));
        let example = resolve(cfg, home, None).expect("resolve");
        let defaults = resolve(Config::default(), home, None).expect("resolve");
        assert_eq!(example.naming, defaults.naming);
        assert_eq!(example.mount_path, defaults.mount_path);
        assert_eq!(example.backup.args, defaults.backup.args);
        assert_eq!(example.log_roll, defaults.log_roll);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/snaplaunch.yaml"))).unwrap_err();
        assert!(matches!(err, LaunchError::Config(ConfigError::Read(_, _))));
    }

    #[test]
    fn rejects_relative_mount_path() {
        let cfg = parse_config("mount:\n  path: snapshot\n").expect("parse");
        let err = resolve(cfg, Some(Path::new("/home/a")), None).unwrap_err();
        assert!(matches!(err, LaunchError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn source_requires_home_or_config() {
        let err = resolve(Config::default(), None, None).unwrap_err();
        assert!(err.to_string().contains("HOME is not set"));
    }

    #[test]
    fn log_dir_is_optional_without_home() {
        let cfg = parse_config("backup:\n  source: \"/srv/data\"\n").expect("parse");
        let cfg = resolve(cfg, None, None).expect("resolve");
        assert_eq!(cfg.source, PathBuf::from("/srv/data"));
        assert!(cfg.log_dir.is_none());

        let cfg = parse_config("backup:\n  source: \"/srv/data\"\nlogs:\n  dir: \"~/logs\"\n")
            .expect("parse");
        assert!(resolve(cfg, None, None).expect("resolve").log_dir.is_none());
    }

    #[test]
    fn rejects_parent_dir_in_source() {
        let cfg = parse_config("backup:\n  source: \"/../etc\"\n").expect("parse");
        let err = resolve(cfg, Some(Path::new("/home/a")), None).unwrap_err();
        assert!(matches!(err, LaunchError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn rejects_empty_suffix() {
        let cfg = parse_config("snapshot:\n  suffix: \"\"\n").expect("parse");
        assert!(resolve(cfg, Some(Path::new("/home/a")), None).is_err());
    }
}
