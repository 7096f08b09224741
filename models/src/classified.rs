//! The only error shape that crosses the core boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Flat, user-facing failure taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// No credential, or the provider rejected it.
    Unauthenticated,
    /// Rate limit or exhausted quota.
    QuotaExceeded,
    /// The model answered but no object could be recovered.
    MalformedResponse,
    /// The request never produced an HTTP response.
    Network,
    Unknown,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::QuotaExceeded => "quota_exceeded",
            ErrorKind::MalformedResponse => "malformed_response",
            ErrorKind::Network => "network",
            ErrorKind::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failure with a message that is safe to show as-is.
///
/// Never carries upstream error text; build it through the core classifier.
#[derive(Debug, Clone, PartialEq, Eq, ThisError, Serialize, Deserialize)]
#[error("{message}")]
pub struct ClassifiedError {
    pub kind: ErrorKind,
    pub message: String,
}

impl ClassifiedError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
