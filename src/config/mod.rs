//! Configuration management for gch

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that points at an alternative config file
pub const CONFIG_PATH_ENV: &str = "GCH_CONFIG_PATH";

/// Application configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// Remote whose branches are offered and tracked
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Message recorded on stashes made before a checkout
    #[serde(default = "default_stash_message")]
    pub stash_message: String,

    /// Number of branches the picker shows at once
    #[serde(default = "default_max_visible_branches")]
    pub max_visible_branches: usize,

    /// Fetch from the remote before browsing all branches
    #[serde(default = "default_fetch_before_browse")]
    pub fetch_before_browse: bool,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_stash_message() -> String {
    "Auto-stashed by gch".to_string()
}

const fn default_max_visible_branches() -> usize {
    10
}

const fn default_fetch_before_browse() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            stash_message: default_stash_message(),
            max_visible_branches: default_max_visible_branches(),
            fetch_before_browse: default_fetch_before_browse(),
        }
    }
}

impl Config {
    /// Load configuration from the default location
    ///
    /// # Errors
    ///
    /// Returns an error if reading or parsing the config file fails
    pub fn load() -> Result<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        Ok(config.normalized())
    }

    /// Get the configuration file path, honouring `GCH_CONFIG_PATH`
    #[must_use]
    pub fn default_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("gch")
            .join("config.json")
    }

    /// Replace values that cannot work with their defaults
    fn normalized(mut self) -> Self {
        if self.remote.trim().is_empty() {
            self.remote = default_remote();
        }
        if self.max_visible_branches == 0 {
            self.max_visible_branches = default_max_visible_branches();
        }
        self
    }
}
