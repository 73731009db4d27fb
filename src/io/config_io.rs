use std::fs;
use std::path::{Path, PathBuf};

use crate::model::Config;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "taskui.toml";

/// Default database file, next to wherever the tracker is run.
pub const DEFAULT_DB_FILE: &str = "taskui.db";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Load taskui.toml from `dir`. A missing file is not an error — it means
/// all defaults. A present but unreadable or invalid file is an error the
/// caller reports as a warning and then ignores; config is never fatal.
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(&path).map_err(|e| ConfigError::Read {
        path: path.clone(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::Parse { path, source: e })
}

/// Database path resolution: the --db flag beats the config file, the
/// config file beats the default.
pub fn resolve_db_path(flag: Option<&str>, config: &Config) -> PathBuf {
    match (flag, &config.db_path) {
        (Some(path), _) => PathBuf::from(path),
        (None, Some(path)) => PathBuf::from(path),
        (None, None) => PathBuf::from(DEFAULT_DB_FILE),
    }
}
