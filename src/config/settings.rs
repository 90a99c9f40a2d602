//! Application settings loaded from config.toml
//!
//! The file names one base address per backend collaborator, the HTTP timeout,
//! the forecast fallback area and where uniqueness-constrained entities live.
//! Every key is optional; a missing file yields the defaults.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Default backend address used by every collaborator without an override
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Square footage sent with a forecast request when the home has none
pub const DEFAULT_FORECAST_AREA: f64 = 1500.0;

/// Environment variable that points at an alternative config file
pub const CONFIG_PATH_ENV: &str = "HOME_BUDDY_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    /// Backend addresses and transport settings
    #[serde(default)]
    pub services: ServicesConfig,
    /// Price forecast request defaults
    #[serde(default)]
    pub forecast: ForecastConfig,
    /// Where favorites and recently-viewed rows are stored
    #[serde(default)]
    pub storage: StorageConfig,
}

/// Backend collaborator addresses
#[derive(Debug, Clone, Deserialize)]
pub struct ServicesConfig {
    /// Address used for any collaborator without its own override
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub favorites_url: Option<String>,
    pub tasks_url: Option<String>,
    pub forecast_url: Option<String>,
    pub recently_viewed_url: Option<String>,
    pub catalog_url: Option<String>,
    pub chat_url: Option<String>,
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Fully resolved base address for each collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub favorites: String,
    pub tasks: String,
    pub forecast: String,
    pub recently_viewed: String,
    pub catalog: String,
    pub chat: String,
}

impl ServicesConfig {
    /// Resolves overrides against `base_url` and strips trailing slashes.
    #[must_use]
    pub fn endpoints(&self) -> Endpoints {
        let pick = |url: &Option<String>| {
            url.as_deref()
                .unwrap_or(&self.base_url)
                .trim_end_matches('/')
                .to_string()
        };
        Endpoints {
            favorites: pick(&self.favorites_url),
            tasks: pick(&self.tasks_url),
            forecast: pick(&self.forecast_url),
            recently_viewed: pick(&self.recently_viewed_url),
            catalog: pick(&self.catalog_url),
            chat: pick(&self.chat_url),
        }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            favorites_url: None,
            tasks_url: None,
            forecast_url: None,
            recently_viewed_url: None,
            catalog_url: None,
            chat_url: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForecastConfig {
    /// Area sent when the selected home does not carry one
    #[serde(default = "default_area")]
    pub default_area: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            default_area: default_area(),
        }
    }
}

/// Storage backend for favorites and recently-viewed rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageMode {
    /// Everything goes to the remote backend
    #[default]
    Remote,
    /// Favorites and recently-viewed rows live in the local `SQLite` database
    Local,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub mode: StorageMode,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

const fn default_timeout_secs() -> u64 {
    15
}

const fn default_area() -> f64 {
    DEFAULT_FORECAST_AREA
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A value fails validation (non-positive timeout or default area)
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;
    parse_settings(&contents)
}

/// Parses and validates settings from TOML text
pub fn parse_settings(contents: &str) -> Result<Settings> {
    let settings: Settings = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;

    if settings.services.timeout_secs == 0 {
        return Err(Error::Config {
            message: "services.timeout_secs must be greater than zero".to_string(),
        });
    }
    if !settings.forecast.default_area.is_finite() || settings.forecast.default_area <= 0.0 {
        return Err(Error::Config {
            message: "forecast.default_area must be a positive number".to_string(),
        });
    }

    Ok(settings)
}

/// Loads settings from `$HOME_BUDDY_CONFIG` or ./config.toml
///
/// A missing file is not an error: the defaults are returned instead.
pub fn load_default_settings() -> Result<Settings> {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| "config.toml".to_string());
    if Path::new(&path).exists() {
        tracing::debug!("Loading settings from {path}");
        load_settings(path)
    } else {
        tracing::info!("No config file at {path}, using defaults");
        Ok(Settings::default())
    }
}
