use crate::{Locale, WeatherInfo};

/// Builder that assembles a [`WeatherInfo`] from whatever fields the model produced.
///
/// Blank values count as missing. [`WeatherInfoBuilder::build`] never fails: each
/// missing field is backfilled independently with its sentinel.
#[derive(Debug, Default, Clone)]
pub struct WeatherInfoBuilder {
    location: Option<String>,
    temp: Option<String>,
    condition: Option<String>,
    high: Option<String>,
    low: Option<String>,
    details: Option<String>,
}

impl WeatherInfoBuilder {
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = non_blank(location.into());
        self
    }

    pub fn with_temp(mut self, temp: impl Into<String>) -> Self {
        self.temp = non_blank(temp.into());
        self
    }

    pub fn with_condition(mut self, condition: impl Into<String>) -> Self {
        self.condition = non_blank(condition.into());
        self
    }

    pub fn with_high(mut self, high: impl Into<String>) -> Self {
        self.high = non_blank(high.into());
        self
    }

    pub fn with_low(mut self, low: impl Into<String>) -> Self {
        self.low = non_blank(low.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = non_blank(details.into());
        self
    }

    /// Names of fields that will be backfilled.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("location", self.location.is_none()),
            ("temp", self.temp.is_none()),
            ("condition", self.condition.is_none()),
            ("high", self.high.is_none()),
            ("low", self.low.is_none()),
            ("details", self.details.is_none()),
        ]
        .into_iter()
        .filter_map(|(name, missing)| missing.then_some(name))
        .collect()
    }

    /// Build the report, substituting the locale's sentinel for each missing field.
    pub fn build(self, locale: Locale) -> WeatherInfo {
        let sentinel = WeatherInfo::sentinel(locale);

        WeatherInfo {
            location: self.location.unwrap_or(sentinel.location),
            temp: self.temp.unwrap_or(sentinel.temp),
            condition: self.condition.unwrap_or(sentinel.condition),
            high: self.high.unwrap_or(sentinel.high),
            low: self.low.unwrap_or(sentinel.low),
            details: self.details.unwrap_or(sentinel.details),
        }
    }
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
