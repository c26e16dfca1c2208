use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::WatchError;

/// Overrides the config file location when set.
pub const CONFIG_ENV_VAR: &str = "STATUS_WATCH_CONFIG";

/// Default config file name, looked up in the home directory.
pub const DEFAULT_CONFIG_FILE: &str = ".status-watch.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WatchConfig {
    pub feed: FeedConfig,
    pub snapshot_file: PathBuf,
    pub log_file: PathBuf,
    /// Optional per-instance base URL overrides, mainly for pointing the
    /// watcher at staging deployments.
    #[serde(default)]
    pub instances: InstanceOverrides,
}

/// Where and as whom status updates get posted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FeedConfig {
    pub endpoint: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceOverrides {
    #[serde(default)]
    pub production: Option<String>,
    #[serde(default)]
    pub sandbox: Option<String>,
}

impl WatchConfig {
    /// Load the config from [`config_path`].
    pub fn load() -> Result<Self, WatchError> {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self, WatchError> {
        let contents = fs::read_to_string(path)
            .map_err(|source| WatchError::io("reading config file", path, source))?;
        serde_json::from_str(&contents).map_err(|source| WatchError::config_parse(path, source))
    }
}

/// The config file location: the environment override when present,
/// otherwise the default file in the home directory.
#[must_use]
pub fn config_path() -> PathBuf {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR) {
        return PathBuf::from(path);
    }
    match env::var_os("HOME") {
        Some(home) => Path::new(&home).join(DEFAULT_CONFIG_FILE),
        None => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}
