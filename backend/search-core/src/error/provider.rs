//! Errors from the model provider call.
//!
//! Key design decisions:
//! - HTTP status codes stored directly (not parsed from strings)
//! - Provider status/reason codes (`RESOURCE_EXHAUSTED`, `API_KEY_INVALID`) kept verbatim
//! - All errors include ErrorLocation for debugging
//! - `#[track_caller]` for automatic location capture

use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ProviderError {
    #[error("Provider API Error: HTTP {status_code} {status:?} {reason:?} - {message} {location}")]
    Api {
        status_code: HttpStatusCode,
        /// Canonical status from the error envelope, e.g. `RESOURCE_EXHAUSTED`.
        status: Option<String>,
        /// First `details[].reason`, e.g. `API_KEY_INVALID`.
        reason: Option<String>,
        message: String,
        location: ErrorLocation,
    },

    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        is_timeout: bool,
        is_connect: bool,
        location: ErrorLocation,
    },

    #[error("Decode Error: {message} {location}")]
    Decode {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP Client Error: {message} {location}")]
    Client {
        message: String,
        location: ErrorLocation,
    },
}

impl ProviderError {
    /// Create from an HTTP error response.
    #[track_caller]
    pub fn api(
        status_code: u16,
        status: Option<String>,
        reason: Option<String>,
        message: impl Into<String>,
    ) -> Self {
        ProviderError::Api {
            status_code: HttpStatusCode(status_code),
            status,
            reason,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn transport(message: impl Into<String>) -> Self {
        ProviderError::Transport {
            message: message.into(),
            is_timeout: false,
            is_connect: false,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn decode(message: impl Into<String>) -> Self {
        ProviderError::Decode {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Create from a reqwest error, checking categories before stringifying.
    #[track_caller]
    pub fn from_reqwest(error: &reqwest::Error) -> Self {
        if let Some(status) = error.status() {
            // reqwest's Display carries the request URL; keep only the status line.
            return ProviderError::Api {
                status_code: HttpStatusCode(status.as_u16()),
                status: None,
                reason: None,
                message: status.canonical_reason().unwrap_or_default().to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        if error.is_decode() {
            return ProviderError::decode(error.to_string());
        }

        // Raised before anything is sent, e.g. a header value with control characters.
        if error.is_builder() {
            return ProviderError::Client {
                message: error.to_string(),
                location: ErrorLocation::from(Location::caller()),
            };
        }

        ProviderError::Transport {
            message: error.to_string(),
            is_timeout: error.is_timeout(),
            is_connect: error.is_connect(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// HTTP status code, when the provider answered.
    pub fn status_code(&self) -> Option<HttpStatusCode> {
        match self {
            ProviderError::Api { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Provider-authored text the classifier scans for quota/auth markers.
    ///
    /// Only an answered request has any. Transport, decode and client messages
    /// are produced locally and carry request URLs or parser positions.
    pub fn marker_text(&self) -> Option<String> {
        match self {
            ProviderError::Api {
                status_code,
                status,
                reason,
                message,
                ..
            } => Some(format!(
                "{} {} {} {}",
                status_code,
                status.as_deref().unwrap_or_default(),
                reason.as_deref().unwrap_or_default(),
                message
            )),
            ProviderError::Transport { .. }
            | ProviderError::Decode { .. }
            | ProviderError::UrlParse { .. }
            | ProviderError::Client { .. } => None,
        }
    }

    /// True when no HTTP response was received.
    pub fn is_transport(&self) -> bool {
        matches!(self, ProviderError::Transport { .. })
    }

    /// Short category for log lines.
    pub fn error_category(&self) -> &'static str {
        match self {
            ProviderError::Api { status_code, .. } if status_code.is_client_error() => "client_error",
            ProviderError::Api { status_code, .. } if status_code.is_server_error() => "server_error",
            ProviderError::Api { .. } => "api",
            ProviderError::Transport { is_timeout: true, .. } => "timeout",
            ProviderError::Transport { is_connect: true, .. } => "connection",
            ProviderError::Transport { .. } => "transport",
            ProviderError::Decode { .. } => "decode",
            ProviderError::UrlParse { .. } => "url_parse",
            ProviderError::Client { .. } => "client",
        }
    }
}

impl From<url::ParseError> for ProviderError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ProviderError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        ProviderError::from_reqwest(&error)
    }
}

impl From<serde_json::Error> for ProviderError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ProviderError::Decode {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
