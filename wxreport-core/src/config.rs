use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

/// URLs for the four provider endpoints the fetch client talks to.
///
/// Defaults match OpenWeather (geocoding, current, forecast) and the
/// Open-Meteo daily archive; overridable to point at a stub server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Endpoints {
    #[serde(default = "default_geocode_url")]
    pub geocode: String,
    #[serde(default = "default_current_url")]
    pub current: String,
    #[serde(default = "default_forecast_url")]
    pub forecast: String,
    #[serde(default = "default_historical_url")]
    pub historical: String,
}

fn default_geocode_url() -> String {
    "https://api.openweathermap.org/geo/1.0/direct".to_string()
}

fn default_current_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_forecast_url() -> String {
    "https://api.openweathermap.org/data/2.5/forecast".to_string()
}

fn default_historical_url() -> String {
    "https://api.open-meteo.com/v1/forecast".to_string()
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            geocode: default_geocode_url(),
            current: default_current_url(),
            forecast: default_forecast_url(),
            historical: default_historical_url(),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Loaded once at startup and passed into components by reference;
/// nothing in the engine mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// OpenWeather API key; required before any report can be generated.
    pub api_key: Option<String>,

    #[serde(default)]
    pub endpoints: Endpoints,

    /// Optional overrides for on-disk file locations. When absent the
    /// platform data directory is used.
    pub report_file: Option<PathBuf>,
    pub users_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Return the API key, or a hint telling the user how to set one.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or_else(|| {
            anyhow!(
                "No API key configured.\n\
                 Hint: run `wxreport configure` and enter your OpenWeather API key."
            )
        })
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return empty.
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
        let dirs = project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Path to the append-only file where composed reports are persisted.
    pub fn report_file_path(&self) -> Result<PathBuf> {
        match &self.report_file {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("weather_report.txt")),
        }
    }

    /// Path to the account store file.
    pub fn users_file_path(&self) -> Result<PathBuf> {
        match &self.users_file {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("users.json")),
        }
    }

    /// Path to the operational event log.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match &self.log_file {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("wxreport.log")),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "wxreport", "wxreport")
        .ok_or_else(|| anyhow!("Could not determine platform config directory"))
}
