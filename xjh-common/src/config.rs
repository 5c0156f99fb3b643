//! Configuration loading and database path resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the database file
pub const DATABASE_ENV_VAR: &str = "XJH_DATABASE";

/// Database file name used by the compiled default
pub const DEFAULT_DATABASE_FILE: &str = "hub.db";

/// Contents of the optional TOML config file
///
/// Every field is optional; a missing file is equivalent to an empty one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TomlConfig {
    /// Database file location
    pub database_path: Option<PathBuf>,
    /// Default tracing filter (overridden by RUST_LOG)
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// Parse a config file, failing if it cannot be read or parsed
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Load the explicit config file, else the platform config file, else defaults
    ///
    /// Missing or malformed files never abort startup: they log a warning and
    /// fall back to an empty config.
    pub fn load_or_default(explicit: Option<&Path>) -> Self {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_config_path() {
                Some(path) => path,
                None => return Self::default(),
            },
        };

        match Self::load(&path) {
            Ok(config) => {
                info!("Loaded config file: {}", path.display());
                config
            }
            Err(e) => {
                warn!("Ignoring config file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

/// Database path resolution in priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_database_path(cli_arg: Option<&Path>, config: &TomlConfig) -> PathBuf {
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    if let Ok(path) = std::env::var(DATABASE_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    if let Some(path) = &config.database_path {
        return path.clone();
    }

    default_database_path()
}

/// Platform config file: user config dir first, then /etc on Linux
fn default_config_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("xjh").join("config.toml"));
    if let Some(path) = user_config {
        if path.exists() {
            return Some(path);
        }
    }

    if cfg!(target_os = "linux") {
        let system_config = PathBuf::from("/etc/xjh/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    None
}

/// Get OS-dependent default database path
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("xjh"))
        .unwrap_or_else(|| PathBuf::from("./xjh_data"))
        .join(DEFAULT_DATABASE_FILE)
}
