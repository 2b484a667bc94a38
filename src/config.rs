//! Configuration management for the tiles TUI.
//!
//! Handles loading configuration from JSONC files.
//! A missing file is not an error: the defaults describe the stock
//! `localhost:8080` deployment.

use anyhow::{Context, Result};
use dirs::config_dir;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Collection URL of the stock backend.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/tiles";

/// Password that unlocks admin mode unless overridden.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin@123";

const APP_DIR: &str = "tiles-tui";

/// Application configuration structure.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL of the `/tiles` collection
    pub api_url: String,
    /// Seconds between background listing refreshes
    pub poll_interval_secs: u64,
    /// Password compared against the admin login prompt
    pub admin_password: String,
    /// Log file path (relative to config dir or absolute)
    pub log_path: String,
    /// Default tracing filter, overridden by `RUST_LOG`
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval_secs: 3,
            admin_password: DEFAULT_ADMIN_PASSWORD.to_string(),
            log_path: "tiles-tui.log".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// # Arguments
    /// * `path` - Optional path to config file. If None, uses default location.
    ///
    /// # Returns
    /// * `Result<Config>` - Loaded configuration or error
    ///
    /// # Details
    /// Reads `$XDG_CONFIG_HOME/tiles-tui/config.jsonc` by default.
    /// If no config file exists, returns default configuration.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_config_path()?,
        };

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = serde_json::from_str(&strip_line_comments(&content))
            .with_context(|| "Failed to deserialize config")?;

        if config.poll_interval_secs == 0 {
            return Err(anyhow::anyhow!("poll_interval_secs must be at least 1"));
        }

        Ok(config)
    }

    /// Get default configuration file path.
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("config.jsonc"))
    }

    /// Get log file path.
    ///
    /// # Details
    /// If log_path is absolute, returns it as-is.
    /// Otherwise, returns path relative to config directory.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        let log_path = Path::new(&self.log_path);
        if log_path.is_absolute() {
            Ok(log_path.to_path_buf())
        } else {
            Ok(Self::app_dir()?.join(log_path))
        }
    }

    /// Background refresh period.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    fn app_dir() -> Result<PathBuf> {
        let config_dir =
            config_dir().ok_or_else(|| anyhow::anyhow!("Failed to determine config directory"))?;
        Ok(config_dir.join(APP_DIR))
    }
}

/// Drop `//` comments that are not inside a string literal.
fn strip_line_comments(content: &str) -> String {
    content
        .lines()
        .map(|line| &line[..comment_start(line).unwrap_or(line.len())])
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Byte offset of the first `//` outside a string literal.
fn comment_start(line: &str) -> Option<usize> {
    let mut in_string = false;
    let mut escaped = false;
    let mut prev_slash = false;
    for (i, ch) in line.char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => {
                in_string = true;
                prev_slash = false;
            }
            '/' if prev_slash => return Some(i - 1),
            '/' => prev_slash = true,
            _ => prev_slash = false,
        }
    }
    None
}
