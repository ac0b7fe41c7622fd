use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::model::UnitPreference;

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// api_key = "..."
/// units = "celsius"
/// featured_cities = ["Delhi", "Mumbai"]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key.
    pub api_key: Option<String>,

    /// Unit the detail surface starts in.
    #[serde(default)]
    pub units: UnitPreference,

    /// Cities shown on the home panel.
    #[serde(default = "default_featured_cities")]
    pub featured_cities: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            units: UnitPreference::default(),
            featured_cities: default_featured_cities(),
        }
    }
}

fn default_featured_cities() -> Vec<String> {
    ["Delhi", "Mumbai", "Lucknow", "Dehradun", "Shimla", "Bhopal"]
        .into_iter()
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Set/replace the API key.
    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Load config from disk, or return the default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "skycast", "skycast")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}
