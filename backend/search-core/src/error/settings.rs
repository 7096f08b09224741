use std::path::PathBuf;

use common::ErrorLocation;
use thiserror::Error;

/// Errors reading or writing the persisted settings (override, theme, weather cache).
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Settings Read Error: {path}: {source} {location}")]
    ReadError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings Parse Error: {path}: {reason} {location}")]
    ParseError {
        location: ErrorLocation,
        path: PathBuf,
        reason: String,
    },

    #[error("Settings Write Error: {path}: {source} {location}")]
    WriteError {
        location: ErrorLocation,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Settings Serialization Error: {reason} {location}")]
    SerializeError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Settings Validation Error: {reason} {location}")]
    ValidationError {
        location: ErrorLocation,
        reason: String,
    },

    #[error("Settings Lock Error: {reason} {location}")]
    LockError {
        location: ErrorLocation,
        reason: String,
    },
}

impl SettingsError {
    /// The file exists but is not valid settings JSON.
    pub fn is_corrupt(&self) -> bool {
        matches!(self, SettingsError::ParseError { .. })
    }
}
