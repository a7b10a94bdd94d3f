/// Service configuration.
///
/// Non-secret settings come from a TOML file (`forecast.toml` by default);
/// credentials (`OPENWEATHER_API_KEY`, `DATABASE_URL`) come from the
/// environment, usually via `.env`, and are deliberately not part of these
/// structs so a dumped or logged `Config` can never leak them.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::ingest::openweather::DEFAULT_BASE_URL;

// ---------------------------------------------------------------------------
// Configuration structs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Provider host. Only changed for testing against a stub server.
    pub base_url: String,
    /// Bounded timeout for the single forecast request, in seconds.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        ProviderConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Logical dataset name the forecast set is persisted under. Each
    /// persist call replaces this dataset's full contents.
    pub dataset_name: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            dataset_name: "hourly_weather".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log file path; empty means console only.
    pub log_path: String,
    /// Minimum log level: "debug", "info", "warn", "error".
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            log_path: String::new(),
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub provider: ProviderConfig,
    pub store: StoreConfig,
    pub general: GeneralConfig,
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

/// Loads the configuration file and returns a struct with all configuration
/// items. Every section and key is optional; omitted values take their
/// defaults.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;
    let config: Config = toml::from_str(&toml)?;
    Ok(config)
}

/// Like [`load_config`], but a missing file yields the default configuration
/// rather than an error. A file that exists but does not parse is still an
/// error — a typo in real config should never be silently ignored.
pub fn load_or_default(config_path: &str) -> Result<Config, ConfigError> {
    if Path::new(config_path).exists() {
        load_config(config_path)
    } else {
        Ok(Config::default())
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ConfigError(pub String);

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Config error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError(e.to_string())
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError(e.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
