//! Failures of the response extractor.
//!
//! Every variant classifies as `MalformedResponse`. The parser messages are kept
//! for logs only and never reach a user.

use common::ErrorLocation;

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ExtractError {
    #[error("Empty Response Error: model returned no text {location}")]
    Empty { location: ErrorLocation },

    #[error("No Object Error: {message} {location}")]
    NoObject {
        message: String,
        location: ErrorLocation,
    },

    #[error("Unparseable Object Error: strict pass: {strict}; sanitized pass: {sanitized} {location}")]
    Unparseable {
        strict: String,
        sanitized: String,
        location: ErrorLocation,
    },
}

impl ExtractError {
    #[track_caller]
    pub fn empty() -> Self {
        ExtractError::Empty {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn no_object(message: impl Into<String>) -> Self {
        ExtractError::NoObject {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unparseable(strict: impl Into<String>, sanitized: impl Into<String>) -> Self {
        ExtractError::Unparseable {
            strict: strict.into(),
            sanitized: sanitized.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
