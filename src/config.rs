//! Optional JSON configuration file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::automation::{DEFAULT_HEIGHT, DEFAULT_WIDTH};

/// Filter used when neither the environment nor the config file sets one.
pub const DEFAULT_LOG_FILTER: &str = "formlab=info";

/// Errors that can occur while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading the file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid configuration JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings read from `config.json`. Every key is optional.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `tracing` filter directive, overridden by `FORMLAB_LOG`.
    pub log_filter: String,
    /// Log file for the interactive UI. Defaults to the data directory.
    pub log_file: Option<PathBuf>,
    /// Terminal size used by headless script runs.
    pub headless_width: u16,
    pub headless_height: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_file: None,
            headless_width: DEFAULT_WIDTH,
            headless_height: DEFAULT_HEIGHT,
        }
    }
}

impl Config {
    /// Returns the default config file location (`~/.config/formlab/config.json`).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("formlab").join("config.json"))
    }

    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is read if
    /// present and defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_path(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_path(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Reads the configuration from `path`.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Returns the interactive log file: the configured one, else
    /// `~/.local/share/formlab/formlab.log`.
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            dirs::data_local_dir().map(|dir| dir.join("formlab").join("formlab.log"))
        })
    }
}
