//! Configuration file handling for ascii-wallpaper.
//!
//! Loads configuration from `~/.config/ascii-wallpaper/config.toml` or a
//! custom path.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::convert::ConversionConfig;
use crate::error::ConfigError;

/// Configuration file structure.
///
/// ```toml
/// [conversion]
/// charset = "manga"
/// directional = true
/// width = 120
/// keepdims = true
/// ```
#[derive(Debug, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub conversion: ConversionConfig,
}

impl Config {
    /// Load configuration from a file path, or the default path if `None`.
    ///
    /// Returns the default config if the file doesn't exist, and an error if
    /// it exists but cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if !path.exists() {
            log::debug!("No config file at '{}', using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;
        let config = Self::parse(&content).map_err(|e| ConfigError::Parse {
            path: path.clone(),
            source: e,
        })?;

        log::debug!("Loaded config from '{}'", path.display());
        Ok(config)
    }

    /// Parse configuration from TOML text.
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("ascii-wallpaper").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/ascii-wallpaper/config.toml")
        })
}
