use common::ErrorLocation;
use models::ClassifiedError;
use search_core::error::{ConfigError, ProviderError, SettingsError};

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Exit code for a classified query failure.
pub const EXIT_QUERY_FAILED: u8 = 1;

/// Exit code for configuration, settings or start-up failures.
pub const EXIT_SETUP_FAILED: u8 = 2;

/// Errors surfaced by the command-line front end.
///
/// Serializable so failures can be printed as JSON next to successful output.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "type", content = "data")]
pub enum AppError {
    /// Service config missing directory, unreadable, or invalid
    #[error("Config Error: {message} {location}")]
    Config {
        message: String,
        location: ErrorLocation,
    },

    /// Settings file unreadable or unwritable
    #[error("Settings Error: {message} {location}")]
    Settings {
        message: String,
        location: ErrorLocation,
    },

    /// Logger could not be set up
    #[error("Logger Error: {message} {location}")]
    Logger {
        message: String,
        location: ErrorLocation,
    },

    /// Command input could not be read
    #[error("Input Error: {message} {location}")]
    Input {
        message: String,
        location: ErrorLocation,
    },

    /// A query failed; the message is already safe to show
    #[error("{error}")]
    Query { error: ClassifiedError },
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Query { .. } => EXIT_QUERY_FAILED,
            AppError::Config { .. }
            | AppError::Settings { .. }
            | AppError::Logger { .. }
            | AppError::Input { .. } => EXIT_SETUP_FAILED,
        }
    }
}

impl From<ClassifiedError> for AppError {
    fn from(error: ClassifiedError) -> Self {
        AppError::Query { error }
    }
}

impl From<ConfigError> for AppError {
    #[track_caller]
    fn from(error: ConfigError) -> Self {
        AppError::Config {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<SettingsError> for AppError {
    #[track_caller]
    fn from(error: SettingsError) -> Self {
        AppError::Settings {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

// The client is only built at start-up, so its failures are setup failures.
impl From<ProviderError> for AppError {
    #[track_caller]
    fn from(error: ProviderError) -> Self {
        AppError::Config {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
