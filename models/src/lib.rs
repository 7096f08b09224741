//! Domain models for Gemini Search.
//!
//! Pure data structures representing search results, weather reports and the
//! user-facing error shape. Models have no I/O - they are the values passed
//! between the core services and whichever collaborator renders them.

pub mod classified;
pub mod coordinates;
pub mod error;
pub mod preferences;
pub mod search;
pub mod weather;

pub use classified::{ClassifiedError, ErrorKind};
pub use coordinates::Coordinates;
pub use error::model_error::ModelError;
pub use preferences::{Locale, Theme};
pub use search::{SearchResponse, SearchResult};
pub use weather::WeatherInfo;
pub use weather::builder::WeatherInfoBuilder;

#[cfg(test)]
mod tests;
