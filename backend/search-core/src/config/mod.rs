//! Service configuration (`gemini-search.toml`).
//!
//! Model ids, endpoint, sampling and cache settings. Read-only at runtime;
//! the mutable, user-owned state lives in [`crate::settings`].

use crate::error::ConfigError;
use crate::{CONFIG_DIR_ENV_VAR, DEFAULT_GEMINI_BASE_URL, SERVICE_CONFIG_FILE_NAME};

use common::ErrorLocation;
use models::Locale;

use std::panic::Location;
use std::path::{Path, PathBuf};
use std::time::Duration;

use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Highest temperature a search or weather call is allowed to use.
pub const MAX_TEMPERATURE: f32 = 0.1;

const APP_DIR_NAME: &str = "gemini-search";

// ============================================
// CONFIG STRUCT
// ============================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_search_model")]
    pub search_model: String,

    #[serde(default = "default_flash_model")]
    pub weather_model: String,

    #[serde(default = "default_flash_model")]
    pub probe_model: String,

    #[serde(default)]
    pub temperature: f32,

    #[serde(default = "default_probe_max_output_tokens")]
    pub probe_max_output_tokens: u32,

    /// Send a response schema alongside the prompt. Off by default: not every
    /// model accepts a schema together with the search tool.
    #[serde(default)]
    pub structured_output: bool,

    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    #[serde(default = "default_weather_cache_ttl_secs")]
    pub weather_cache_ttl_secs: u64,

    #[serde(default)]
    pub locale: Locale,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            search_model: default_search_model(),
            weather_model: default_flash_model(),
            probe_model: default_flash_model(),
            temperature: 0.0,
            probe_max_output_tokens: default_probe_max_output_tokens(),
            structured_output: false,
            request_timeout_secs: None,
            weather_cache_ttl_secs: default_weather_cache_ttl_secs(),
            locale: Locale::default(),
        }
    }
}

// ============================================
// DEFAULT FUNCTIONS
// ============================================

fn default_base_url() -> String {
    DEFAULT_GEMINI_BASE_URL.to_string()
}
fn default_search_model() -> String {
    "gemini-3-pro-preview".to_string()
}
fn default_flash_model() -> String {
    "gemini-3-flash-preview".to_string()
}
fn default_probe_max_output_tokens() -> u32 {
    8
}
fn default_weather_cache_ttl_secs() -> u64 {
    30 * 60
}

// ============================================
// IMPLEMENTATION
// ============================================

impl ServiceConfig {
    /// Load `gemini-search.toml` from the config directory.
    ///
    /// Tries, in order:
    /// 1. `{config_dir}/config/gemini-search.toml`
    /// 2. `{config_dir}/gemini-search.toml`
    ///
    /// A missing file yields defaults. A file that exists but fails to read,
    /// parse or validate is an error.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let paths = [
            config_dir.join("config").join(SERVICE_CONFIG_FILE_NAME),
            config_dir.join(SERVICE_CONFIG_FILE_NAME),
        ];

        for path in &paths {
            if path.exists() {
                let config = Self::load_from_path(path)?;
                info!("Service config loaded from {}", path.display());
                return Ok(config);
            }
        }

        info!(
            "No {} found in {}, using defaults",
            SERVICE_CONFIG_FILE_NAME,
            config_dir.display()
        );
        Ok(Self::default())
    }

    /// Load from a specific file.
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            location: ErrorLocation::from(Location::caller()),
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: ServiceConfig = toml::from_str(&contents).map_err(|e| {
            warn!("Failed to parse {}: {}", path.display(), e);
            ConfigError::ParseError {
                location: ErrorLocation::from(Location::caller()),
                path: path.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match url::Url::parse(&self.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => {
                return Err(validation_error(format!(
                    "base_url must use http or https, got scheme '{}'",
                    url.scheme()
                )));
            }
            Err(e) => {
                return Err(validation_error(format!(
                    "Invalid base_url '{}': {}",
                    self.base_url, e
                )));
            }
        }

        for (name, value) in [
            ("search_model", &self.search_model),
            ("weather_model", &self.weather_model),
            ("probe_model", &self.probe_model),
        ] {
            if value.trim().is_empty() {
                return Err(validation_error(format!("{} cannot be empty", name)));
            }
        }

        if !self.temperature.is_finite() || !(0.0..=MAX_TEMPERATURE).contains(&self.temperature)
        {
            return Err(validation_error(format!(
                "Invalid temperature: {} (must be 0.0-{})",
                self.temperature, MAX_TEMPERATURE
            )));
        }

        if !(1..=64).contains(&self.probe_max_output_tokens) {
            return Err(validation_error(format!(
                "Invalid probe_max_output_tokens: {} (must be 1-64)",
                self.probe_max_output_tokens
            )));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(validation_error(
                "request_timeout_secs must be greater than zero when set",
            ));
        }

        Ok(())
    }

    /// Temperature actually sent upstream.
    pub fn effective_temperature(&self) -> f32 {
        if self.temperature.is_finite() {
            self.temperature.clamp(0.0, MAX_TEMPERATURE)
        } else {
            0.0
        }
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    pub fn weather_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.weather_cache_ttl_secs)
    }
}

#[track_caller]
fn validation_error(reason: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        location: ErrorLocation::from(Location::caller()),
        reason: reason.into(),
    }
}

/// Resolve the directory holding config and settings.
///
/// Precedence: explicit argument, then `GEMINI_SEARCH_CONFIG_DIR`, then the
/// platform config directory joined with `gemini-search`.
pub fn resolve_config_dir(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }

    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV_VAR)
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir.trim()));
    }

    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or_else(|| ConfigError::DirectoryNotFound {
            location: ErrorLocation::from(Location::caller()),
        })
}
