use models::{Coordinates, WeatherInfo};

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Two requests closer than this on both axes share a cached report.
pub const CACHE_COORDINATE_TOLERANCE: f64 = 0.01;

/// Last weather report, stored with where and when it was fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedWeather {
    pub info: WeatherInfo,
    pub latitude: f64,
    pub longitude: f64,
    pub fetched_at_unix_secs: u64,
}

impl CachedWeather {
    pub fn new(info: WeatherInfo, coordinates: Coordinates, fetched_at: SystemTime) -> Self {
        Self {
            info,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            fetched_at_unix_secs: unix_secs(fetched_at),
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// Usable for `coordinates` at `now` under `ttl`.
    ///
    /// An entry timestamped in the future (clock moved backwards) is stale.
    pub fn is_fresh_for(&self, coordinates: &Coordinates, now: SystemTime, ttl: Duration) -> bool {
        if !self
            .coordinates()
            .is_near(coordinates, CACHE_COORDINATE_TOLERANCE)
        {
            return false;
        }

        let now_secs = unix_secs(now);
        match now_secs.checked_sub(self.fetched_at_unix_secs) {
            Some(age) => age < ttl.as_secs(),
            None => false,
        }
    }
}

fn unix_secs(time: SystemTime) -> u64 {
    time.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}
