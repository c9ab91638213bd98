use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// Filename of the optional config file within the data directory.
pub const CONFIG_FILE: &str = "taskflow.toml";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: io::Error,
    },
    #[error("could not parse taskflow.toml: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Load taskflow.toml from `dir`. A missing file yields the defaults.
/// A malformed file is a hard error: the config is hand-written, and
/// silently ignoring it would mask typos.
pub fn load_config(dir: &Path) -> Result<Config, ConfigError> {
    let path = dir.join(CONFIG_FILE);
    let text = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Config::default()),
        Err(e) => return Err(ConfigError::Read { path, source: e }),
    };
    Ok(toml::from_str(&text)?)
}
