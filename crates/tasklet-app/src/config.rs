use std::{
    ffi::OsString,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::debug;

/// Environment variable overriding the task file location.
pub const DB_ENV_VAR: &str = "TASKLET_DB";

const CONFIG_DIR: &str = "tasklet";
const CONFIG_FILE: &str = "config.toml";
const DATA_DIR: &str = ".tasklet";
const DATA_FILE: &str = "tasks.json";

/// User configuration loaded from `<config dir>/tasklet/config.toml`.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// `[storage]` block.
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct StorageConfig {
    /// Task file to use when neither the flag nor the environment selects one.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl AppConfig {
    /// Platform location of the configuration file, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load the configuration from its platform location; absent means defaults.
    pub fn load() -> Result<Self> {
        Self::default_path().map_or_else(|| Ok(Self::default()), Self::from_file)
    }

    /// Load configuration from an explicit file. A missing file yields defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "no config file; using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let config: Self =
            toml::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))?;
        Ok(config)
    }
}

/// Default task file under the user's home directory.
pub fn default_storage_path(home: &Path) -> PathBuf {
    home.join(DATA_DIR).join(DATA_FILE)
}

/// Pick the task file: flag, then environment, then config file, then `~/.tasklet/tasks.json`.
///
/// Empty flag or environment values are treated as unset.
pub fn resolve_storage_path(
    flag: Option<PathBuf>,
    env: Option<OsString>,
    config: &AppConfig,
    home: Option<&Path>,
) -> Result<PathBuf> {
    if let Some(path) = flag.filter(|path| !path.as_os_str().is_empty()) {
        return Ok(path);
    }
    if let Some(value) = env.filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(value));
    }
    if let Some(path) = config.storage.path.clone() {
        return Ok(path);
    }
    home.map(default_storage_path).ok_or_else(|| {
        anyhow!("cannot determine a home directory; pass --database or set {DB_ENV_VAR}")
    })
}
