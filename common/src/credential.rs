//! The model-provider credential, with redacted Debug/Display output.

use crate::{ErrorLocation, RedactError};

use std::fmt;
use std::panic::Location;

use serde::ser::Error;
use zeroize::Zeroize;

/// Opaque API credential.
///
/// Trimmed on construction. The value is only reachable through
/// [`RedactedCredential::expose`], which should be called exactly where the
/// credential is attached to an outbound provider request.
#[derive(Clone, PartialEq, Eq)]
pub struct RedactedCredential {
    inner: String,
}

impl RedactedCredential {
    /// Wrap a credential, trimming surrounding whitespace.
    pub fn new(value: impl Into<String>) -> Self {
        let mut raw: String = value.into();
        let trimmed = raw.trim().to_string();
        raw.zeroize();
        Self { inner: trimmed }
    }

    /// Wrap `value` only if it is non-empty after trimming.
    pub fn non_blank(value: &str) -> Option<Self> {
        let credential = Self::new(value);
        if credential.is_empty() {
            None
        } else {
            Some(credential)
        }
    }

    /// The raw secret, for transmission to the model provider only.
    #[inline]
    pub fn expose(&self) -> &str {
        &self.inner
    }

    /// Character count (safe to log).
    #[inline]
    pub fn len(&self) -> usize {
        self.inner.chars().count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl fmt::Debug for RedactedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RedactedCredential([REDACTED])")
    }
}

impl fmt::Display for RedactedCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED CREDENTIAL]")
    }
}

impl Drop for RedactedCredential {
    fn drop(&mut self) {
        self.inner.zeroize();
    }
}

// Settings persistence goes through `expose()` explicitly.
impl serde::Serialize for RedactedCredential {
    #[track_caller]
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(S::Error::custom(RedactError::Serialization {
            message: String::from(
                "RedactedCredential cannot be serialized - use expose() explicitly",
            ),
            location: ErrorLocation::from(Location::caller()),
        }))
    }
}
