//! Shared primitives for Gemini Search.
//!
//! Everything here is dependency-light and used by every other crate:
//!
//! - **ErrorLocation**: call-site capture for every error variant
//! - **RedactedCredential**: the API credential, never logged or serialized
//! - **HttpStatusCode**: upstream status classification (quota, auth, retry)
//!
//! ## Architecture
//!
//! - **common** (this crate): Primitives
//! - **models**: Pure data structures
//! - **search-core**: Business logic operating on models
//! - **gemini-search**: Command-line collaborator wiring everything together

pub mod credential;
pub mod error;
pub mod http_status;

pub use credential::RedactedCredential;
pub use error::error_location::ErrorLocation;
pub use error::redact_error::RedactError;
pub use http_status::HttpStatusCode;

#[cfg(test)]
mod tests;
