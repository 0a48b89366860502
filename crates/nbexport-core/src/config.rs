//! Application configuration
//!
//! Configuration is loaded from:
//! 1. Default values
//! 2. Config file (~/.config/nbexport/config.toml)
//! 3. Environment variables (NBEXPORT_* prefix)
//!
//! Environment variables take precedence over config file values.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::formats::ExportFormat;

/// Environment variable prefix
const ENV_PREFIX: &str = "NBEXPORT";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory the last successful export was written into
    #[serde(default)]
    pub last_export_dir: Option<PathBuf>,

    /// Format used when none is given on the command line
    #[serde(default)]
    pub default_format: ExportFormat,

    /// Write logs here instead of stderr
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from default location and environment
    ///
    /// Order of precedence (highest to lowest):
    /// 1. Environment variables (NBEXPORT_LAST_EXPORT_DIR, NBEXPORT_DEFAULT_FORMAT, NBEXPORT_LOG_FILE)
    /// 2. Config file (~/.config/nbexport/config.toml or NBEXPORT_CONFIG)
    /// 3. Default values
    pub fn load() -> Result<Self> {
        Self::load_from_path(&Self::config_file_path())
    }

    /// Load from a path given on the command line, or the default location
    pub fn load_with_cli_override(path: Option<&PathBuf>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_path(path),
            None => Self::load(),
        }
    }

    /// Load configuration from a specific path
    ///
    /// Environment variables are still applied as overrides.
    /// If the file doesn't exist, defaults are used.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Load configuration from a TOML string (useful for testing)
    pub fn load_from_str(toml_content: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(toml_content).context("Failed to parse config TOML")?;
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) -> Result<()> {
        // NBEXPORT_LAST_EXPORT_DIR
        if let Ok(val) = std::env::var(format!("{}_LAST_EXPORT_DIR", ENV_PREFIX)) {
            self.last_export_dir = if val.is_empty() { None } else { Some(val.into()) };
        }

        // NBEXPORT_DEFAULT_FORMAT
        if let Ok(val) = std::env::var(format!("{}_DEFAULT_FORMAT", ENV_PREFIX)) {
            self.default_format = val
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid NBEXPORT_DEFAULT_FORMAT")?;
        }

        // NBEXPORT_LOG_FILE
        if let Ok(val) = std::env::var(format!("{}_LOG_FILE", ENV_PREFIX)) {
            self.log_file = if val.is_empty() { None } else { Some(val.into()) };
        }

        Ok(())
    }

    /// Save configuration to a specific file, creating parent directories
    pub fn save_to_path(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {:?}", parent))?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        std::fs::write(config_path, content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;
        Ok(())
    }

    /// Get the config file path
    ///
    /// Can be overridden with NBEXPORT_CONFIG environment variable
    pub fn config_file_path() -> PathBuf {
        if let Ok(path) = std::env::var(format!("{}_CONFIG", ENV_PREFIX)) {
            return PathBuf::from(path);
        }

        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nbexport")
            .join("config.toml")
    }

    /// Folder a destination picker should start in
    ///
    /// The last export directory when it still exists, otherwise the home
    /// directory.
    pub fn export_start_dir(&self) -> PathBuf {
        self.last_export_dir
            .as_ref()
            .filter(|dir| dir.is_dir())
            .cloned()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Remember where an export was written
    ///
    /// Stores the parent of `destination`, so the next export is suggested
    /// next to this one.
    pub fn remember_export(&mut self, destination: &Path) {
        self.last_export_dir = destination
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf);
    }
}
