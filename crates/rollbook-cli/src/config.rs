//! Configuration management for the CLI
//!
//! This module handles loading and merging configuration from:
//! - Default values
//! - A TOML configuration file
//! - Environment variables
//! - Command-line arguments

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Path settings
    pub paths: PathConfig,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Default verbosity level
    pub verbosity: u8,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,
}

/// Path configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Dataset used when `--dataset` is not passed
    pub dataset: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            verbosity: 0,
        }
    }
}

impl Config {
    /// Load configuration, optionally from an explicit file path.
    ///
    /// An explicit path must exist; the default location
    /// (`~/.config/rollbook/config.toml`) is used only when present.
    pub fn load_with_file(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(Error::FileNotFound {
                        path: path.to_path_buf(),
                    });
                }
                Self::from_file(path)?
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };
        config.merge_with_env();
        Ok(config)
    }

    /// Parse a TOML configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("invalid config {}: {}", path.display(), e)))
    }

    /// The default configuration file location.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rollbook").join("config.toml"))
    }

    /// Apply environment overrides.
    fn merge_with_env(&mut self) {
        if let Ok(dataset) = std::env::var("ROLLBOOK_DATASET") {
            self.paths.dataset = Some(PathBuf::from(dataset));
        }
        if let Ok(level) = std::env::var("ROLLBOOK_LOG_LEVEL") {
            self.logging.level = Some(level);
        }
    }
}
