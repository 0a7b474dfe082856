//! Configuration handling
//!
//! Global configuration lives in the platform config directory
//! (e.g. `~/.config/triage/config.toml`). A missing file means defaults;
//! a present but unparseable file is an error the user should see.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::domain::Strategy;

/// Global configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Strategy used when neither the CLI flag nor the request names one
    pub default_strategy: Strategy,

    /// Override for the ticket store location
    pub tickets_path: Option<PathBuf>,
}

impl Config {
    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "triage").map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the default ticket store path in the platform data directory
    pub fn default_tickets_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "triage")
            .map(|dirs| dirs.data_dir().join("tickets.jsonl"))
    }

    /// Loads the global configuration, falling back to defaults when absent
    pub fn load() -> Result<Self> {
        let Some(config_dir) = Self::global_config_dir() else {
            return Ok(Self::default());
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config: {}", config_path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", config_path.display()))
    }

    /// Saves the global configuration
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::global_config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        fs::create_dir_all(&config_dir).with_context(|| {
            format!(
                "Failed to create config directory: {}",
                config_dir.display()
            )
        })?;

        let config_path = config_dir.join("config.toml");
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))
    }

    /// Resolves the ticket store path (config override, then platform default)
    pub fn tickets_path(&self) -> Result<PathBuf> {
        self.tickets_path
            .clone()
            .or_else(Self::default_tickets_path)
            .ok_or_else(|| anyhow::anyhow!("Could not determine ticket store location"))
    }
}
