//! Configuration module

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::remote::DEFAULT_SERVER_URL;

/// Directory holding a project-local config
pub const LOCAL_DIR: &str = ".smartfaq";

/// Config file name, both local and global
pub const CONFIG_FILE: &str = "config.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// FAQ service connection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL (e.g., "http://localhost:8787")
    #[serde(default)]
    pub url: Option<String>,

    /// Per-request timeout in seconds (0 disables it)
    #[serde(default = "default_server_timeout")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout_secs: default_server_timeout(),
        }
    }
}

fn default_server_timeout() -> u64 {
    30
}

impl ServerConfig {
    /// Configured URL, or the public default
    pub fn url(&self) -> &str {
        self.url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or(DEFAULT_SERVER_URL)
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Truncate answers in list views (0 = never)
    #[serde(default = "default_max_answer_chars")]
    pub max_answer_chars: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            max_answer_chars: default_max_answer_chars(),
        }
    }
}

fn default_max_answer_chars() -> usize {
    200
}

impl Config {
    /// Load config from an explicit file, else from default locations
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }

        // Try local config first, then global
        if let Some(local) = Self::find_local_config() {
            return Self::load_from(&local);
        }

        if let Some(global) = Self::global_config_path() {
            if global.exists() {
                return Self::load_from(&global);
            }
        }

        Ok(Self::default())
    }

    /// Load config from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Apply a command-line server override
    pub fn with_server_url(mut self, url: Option<String>) -> Self {
        if url.is_some() {
            self.server.url = url;
        }
        self
    }

    /// Find local .smartfaq/config.toml walking up directories
    pub fn find_local_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;

        loop {
            let config_path = current.join(LOCAL_DIR).join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Local config path in the current directory (may not exist yet)
    pub fn local_config_path() -> PathBuf {
        PathBuf::from(LOCAL_DIR).join(CONFIG_FILE)
    }

    /// Get global config path (platform config dir)
    pub fn global_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "smartfaq").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }
}
