use crate::ModelError;

use common::ErrorLocation;

use std::fmt;
use std::panic::Location;

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Validate and build a coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Validation`] for non-finite values or values outside
    /// `-90..=90` / `-180..=180`.
    #[track_caller]
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, ModelError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(ModelError::Validation {
                message: format!("Latitude out of range: {latitude}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(ModelError::Validation {
                message: format!("Longitude out of range: {longitude}"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// True when both axes differ by at most `tolerance_degrees`.
    pub fn is_near(&self, other: &Coordinates, tolerance_degrees: f64) -> bool {
        (self.latitude - other.latitude).abs() <= tolerance_degrees
            && (self.longitude - other.longitude).abs() <= tolerance_degrees
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}
