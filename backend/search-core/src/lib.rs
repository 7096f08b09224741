//! Search and weather core.
//!
//! Forwards a query or a coordinate pair to a grounded Gemini model, recovers a
//! typed payload from its free-form answer, and maps every failure onto one of
//! five user-facing error kinds.
//!
//! # Modules
//! - [`credential`]: override vs. ambient default resolution
//! - [`extract`]: JSON recovery from model text
//! - [`classify`]: internal error → [`models::ClassifiedError`]
//! - [`gemini_client`]: [`gemini_client::ModelProvider`] and its REST client
//! - [`services`]: search, weather, credential probe
//! - [`config`] / [`settings`]: service config (TOML) and persisted state (JSON)

pub mod classify;
pub mod config;
pub mod credential;
pub mod error;
pub mod extract;
pub mod gemini_client;
pub mod services;
pub mod settings;

pub use classify::classify;
pub use config::ServiceConfig;
pub use credential::{
    CredentialSource, CredentialSources, load_ambient_default, resolve_credential,
    resolve_credential_with_source,
};
pub use extract::{ParsedObject, extract};
pub use gemini_client::{GeminiClient, GenerateRequest, GenerateResponse, ModelProvider};
pub use services::{CredentialProbe, SearchService, ServiceContext, WeatherService};
pub use settings::{FileSettingsStore, MemorySettingsStore, Settings, SettingsStore};

use const_format::concatcp;

pub const GEMINI_API_HOST: &str = "generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_BASE_URL: &str = concatcp!("https://", GEMINI_API_HOST);

pub const SERVICE_CONFIG_FILE_NAME: &str = "gemini-search.toml";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
pub const CONFIG_DIR_ENV_VAR: &str = "GEMINI_SEARCH_CONFIG_DIR";

#[cfg(test)]
mod tests;
