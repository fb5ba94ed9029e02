//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/rollcall/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/rollcall/` (~/.config/rollcall/)
//! - State/Logs: `$XDG_STATE_HOME/rollcall/` (~/.local/state/rollcall/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Reporting configuration
    #[serde(default)]
    pub reporting: ReportingConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Reporting configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ReportingConfig {
    /// How many records the earliest-arrivals view returns
    #[serde(default = "default_early_arrivals_limit")]
    pub early_arrivals_limit: usize,

    /// Fallback for the per-day expected headcount when a record carries no
    /// attached roster. Unset means the count is reported as unknown.
    #[serde(default)]
    pub default_expected: Option<u32>,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            early_arrivals_limit: default_early_arrivals_limit(),
            default_expected: None,
        }
    }
}

fn default_early_arrivals_limit() -> usize {
    3
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/rollcall/config.toml` (~/.config/rollcall/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("rollcall").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/rollcall/` (~/.local/state/rollcall/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("rollcall")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/rollcall/rollcall.log` (~/.local/state/rollcall/rollcall.log)
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("rollcall.log")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.reporting.early_arrivals_limit, 3);
        assert!(config.reporting.default_expected.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[reporting]\nearly_arrivals_limit = 5\ndefault_expected = 100\n\n[logging]\nlevel = \"debug\""
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.reporting.early_arrivals_limit, 5);
        assert_eq!(config.reporting.default_expected, Some(100));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.max_files, 5);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "reporting = \"not a table\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
