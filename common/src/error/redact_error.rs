use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised when something tries to move a credential somewhere it must not go.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}
