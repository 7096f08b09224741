pub mod builder;

use crate::Locale;

use serde::{Deserialize, Serialize};

const UNKNOWN_TEMPERATURE: &str = "--℃";

/// Current conditions at a location. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherInfo {
    pub location: String,
    pub temp: String,
    pub condition: String,
    pub high: String,
    pub low: String,
    pub details: String,
}

impl WeatherInfo {
    /// The all-placeholder report used when the model omits every field.
    pub fn sentinel(locale: Locale) -> Self {
        Self {
            location: sentinel_location(locale).to_string(),
            temp: UNKNOWN_TEMPERATURE.to_string(),
            condition: sentinel_condition(locale).to_string(),
            high: UNKNOWN_TEMPERATURE.to_string(),
            low: UNKNOWN_TEMPERATURE.to_string(),
            details: sentinel_details(locale).to_string(),
        }
    }
}

fn sentinel_location(locale: Locale) -> &'static str {
    match locale {
        Locale::Ja => "不明な地点",
        Locale::En => "Unknown location",
    }
}

fn sentinel_condition(locale: Locale) -> &'static str {
    match locale {
        Locale::Ja => "取得中",
        Locale::En => "Unavailable",
    }
}

fn sentinel_details(locale: Locale) -> &'static str {
    match locale {
        Locale::Ja => "データの取得に失敗しました。",
        Locale::En => "Weather details could not be retrieved.",
    }
}
