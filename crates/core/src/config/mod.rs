//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Command-line flags
//! 2. Environment variables (KAGI_*)
//! 3. TOML config file (`--config` or KAGI_CONFIG_FILE)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Environment variable naming an optional TOML config file.
pub const CONFIG_FILE_ENV: &str = "KAGI_CONFIG_FILE";

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Command-line flags ([`ConfigOverrides`])
/// 2. Environment variables (KAGI_*)
/// 3. TOML config file
/// 4. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Kagi API key used for FastGPT.
    ///
    /// Set via `--kagi_api_key` or the KAGI_API_KEY environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Directory answers are cached in. Unset or empty disables caching.
    ///
    /// Set via `--cache_dir` or the KAGI_CACHE_DIR environment variable.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,

    /// FastGPT API base URL.
    ///
    /// Set via KAGI_BASE_URL environment variable.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via KAGI_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via KAGI_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://kagi.com/api/v0".into()
}

fn default_timeout_ms() -> u64 {
    60_000
}

fn default_user_agent() -> String {
    "kagi-cli/0.1".into()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            cache_dir: None,
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

/// Environment variables read verbatim rather than through figment's typed parsing.
const API_KEY_ENV: &str = "KAGI_API_KEY";
const CACHE_DIR_ENV: &str = "KAGI_CACHE_DIR";

/// Values layered above the figment sources. Unset fields leave lower layers untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_dir: Option<PathBuf>,

    /// TOML file to load; takes precedence over KAGI_CONFIG_FILE.
    #[serde(skip)]
    pub config_file: Option<PathBuf>,
}

impl ConfigOverrides {
    /// The API key and cache directory exactly as set in the environment.
    ///
    /// `Env` turns `12345` or `true` into numbers and booleans, which then
    /// fail to extract as strings and mangle values such as `007`.
    fn from_raw_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).ok(),
            cache_dir: std::env::var_os(CACHE_DIR_ENV).map(PathBuf::from),
            config_file: None,
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read or parsed
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load(overrides: &ConfigOverrides) -> Result<Self, ConfigError> {
        let config_file = overrides
            .config_file
            .clone()
            .or_else(|| std::env::var_os(CONFIG_FILE_ENV).map(PathBuf::from));

        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(path) = &config_file {
            if !path.is_file() {
                return Err(ConfigError::LoadFailed(format!("config file not found: {}", path.display())));
            }
            figment = figment.merge(Toml::file(path));
        }

        figment = figment
            .merge(
                Env::prefixed("KAGI_")
                    .map(|key| key.as_str().to_lowercase().into())
                    .split("__"),
            )
            .merge(Serialized::defaults(ConfigOverrides::from_raw_env()))
            .merge(Serialized::defaults(overrides));

        Self::from_figment(&figment)
    }

    /// Extract and validate configuration from an assembled figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// The API key, or an error naming where to set it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if the key is unset or empty.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ConfigError::Missing {
                field: "api_key".into(),
                hint: "pass -kagi_api_key or set the KAGI_API_KEY environment variable".into(),
            })
    }

    /// Cache directory, if caching is enabled.
    pub fn cache_dir(&self) -> Option<&Path> {
        self.cache_dir
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
    }
}
