use crate::error::{ExtractError, ProviderError, SettingsError};

use common::ErrorLocation;
use models::ModelError;

use std::panic::Location;

use thiserror::Error as ThisError;

/// Internal failure of one query-service call, before classification.
#[derive(Debug, ThisError)]
pub enum QueryError {
    #[error("Missing Credential Error: no override or ambient default configured {location}")]
    MissingCredential { location: ErrorLocation },

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Settings(#[from] SettingsError),

    #[error(transparent)]
    InvalidInput(#[from] ModelError),
}

impl QueryError {
    #[track_caller]
    pub fn missing_credential() -> Self {
        QueryError::MissingCredential {
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
