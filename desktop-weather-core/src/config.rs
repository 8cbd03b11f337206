use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{error::WeatherError, model::WeatherQuery};

/// Environment variable holding the OpenWeather API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

pub const DEFAULT_CITY: &str = "Gulu";

pub const DEFAULT_ENDPOINT: &str = "https://api.openweathermap.org/data/2.5/weather";

/// Configuration stored on disk. Every key is optional.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// city = "Gulu"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub api_key: Option<String>,
    pub city: Option<String>,
    pub endpoint: Option<String>,
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_toml(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
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

        Ok(path)
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "desktop-weather", "desktop-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Effective settings for one run, after layering defaults, the config file,
/// the environment and command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub city: String,
    pub endpoint: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            city: DEFAULT_CITY.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

impl Settings {
    pub fn resolve(
        config: &Config,
        env_api_key: Option<String>,
        city_override: Option<String>,
    ) -> Self {
        let defaults = Self::default();

        let api_key = non_blank(env_api_key).or_else(|| non_blank(config.api_key.clone()));
        let city = non_blank(city_override)
            .or_else(|| non_blank(config.city.clone()))
            .unwrap_or(defaults.city);
        let endpoint = non_blank(config.endpoint.clone()).unwrap_or(defaults.endpoint);

        Self { api_key, city, endpoint }
    }

    /// Reads the API key from the process environment.
    pub fn env_api_key() -> Option<String> {
        std::env::var(API_KEY_ENV).ok()
    }

    /// Build the query for this run. Fails when no credential is available.
    pub fn query(&self) -> Result<WeatherQuery, WeatherError> {
        let api_key = self.api_key.clone().ok_or(WeatherError::MissingCredential)?;

        Ok(WeatherQuery { city: self.city.clone(), api_key })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
