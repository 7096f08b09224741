use crate::classify::classify;
use crate::error::QueryError;
use crate::extract::{ParsedObject, extract};
use crate::gemini_client::GenerateRequest;
use crate::services::ServiceContext;
use crate::services::prompts;
use crate::settings::{CachedWeather, Settings, SettingsStore};

use models::{ClassifiedError, Coordinates, Locale, WeatherInfo, WeatherInfoBuilder};

use std::time::SystemTime;

use log::{debug, info, warn};
use serde_json::Value;

/// Current weather at a coordinate pair.
#[derive(Debug, Clone)]
pub struct WeatherService {
    context: ServiceContext,
}

impl WeatherService {
    pub fn new(context: ServiceContext) -> Self {
        Self { context }
    }

    /// Look up the weather at (`lat`, `lng`).
    ///
    /// On success every field is populated; missing ones carry their sentinel.
    pub async fn weather_at(&self, lat: f64, lng: f64) -> Result<WeatherInfo, ClassifiedError> {
        self.try_weather_at(lat, lng)
            .await
            .map_err(|e| classify(&e, self.context.locale()))
    }

    /// Like [`WeatherService::weather_at`], but served from `store` when a fresh
    /// report for nearby coordinates exists. Successful lookups that learned at
    /// least one field refresh the cache; an all-sentinel report is never cached.
    ///
    /// Cache read and write failures are logged and otherwise ignored.
    pub async fn weather_at_cached(
        &self,
        lat: f64,
        lng: f64,
        store: &dyn SettingsStore,
        now: SystemTime,
    ) -> Result<WeatherInfo, ClassifiedError> {
        let ttl = self.context.config().weather_cache_ttl();
        let locale = self.context.locale();
        // Invalid coordinates skip the cache; weather_at reports them.
        let coordinates = Coordinates::new(lat, lng).ok();

        if let Some(coordinates) = &coordinates {
            match store.load() {
                Ok(settings) => {
                    if let Some(cached) = settings.weather_cache
                        && cached.is_fresh_for(coordinates, now, ttl)
                        && !is_unknown_report(&cached.info, locale)
                    {
                        debug!("Weather cache hit for {}", coordinates);
                        return Ok(cached.info);
                    }
                }
                Err(e) => warn!("Weather cache unreadable, calling through: {}", e),
            }
        }

        let info = self.weather_at(lat, lng).await?;

        if is_unknown_report(&info, locale) {
            debug!("Weather report is all sentinels, not caching it");
            return Ok(info);
        }

        if let Some(coordinates) = coordinates {
            let entry = CachedWeather::new(info.clone(), coordinates, now);
            let mut store_entry =
                |settings: &mut Settings| settings.weather_cache = Some(entry.clone());
            if let Err(e) = store.update(&mut store_entry) {
                warn!("Failed to store weather cache: {}", e);
            }
        }

        Ok(info)
    }

    async fn try_weather_at(&self, lat: f64, lng: f64) -> Result<WeatherInfo, QueryError> {
        let credential = self.context.credential()?;
        let coordinates = Coordinates::new(lat, lng)?;

        let config = self.context.config();
        let locale = self.context.locale();

        let mut request = GenerateRequest::new(
            &config.weather_model,
            prompts::weather_prompt(&coordinates, locale),
        )
        .with_system_instruction(prompts::weather_system_instruction(locale))
        .with_web_search(true)
        .with_temperature(config.effective_temperature());

        if config.structured_output {
            request = request.with_response_schema(prompts::weather_response_schema());
        }

        let response = self.context.generate(&credential, &request).await?;

        let Some(text) = response.text else {
            info!(
                "Weather returned no text (finish_reason={:?}), using sentinels",
                response.finish_reason
            );
            return Ok(WeatherInfo::sentinel(locale));
        };

        let object = extract(&text)?;
        Ok(weather_info_from(&object, locale))
    }
}

/// Nothing was learned: every field carries its sentinel.
fn is_unknown_report(info: &WeatherInfo, locale: Locale) -> bool {
    *info == WeatherInfo::sentinel(locale)
}

/// Backfill each field independently. Blank strings, `null` and non-scalar
/// values count as missing; numbers are rendered as text.
pub fn weather_info_from(object: &ParsedObject, locale: Locale) -> WeatherInfo {
    let field = |name: &str| scalar_text(object.get(name)).unwrap_or_default();

    let builder = WeatherInfoBuilder::default()
        .with_location(field("location"))
        .with_temp(field("temp"))
        .with_condition(field("condition"))
        .with_high(field("high"))
        .with_low(field("low"))
        .with_details(field("details"));

    let missing = builder.missing_fields();
    if !missing.is_empty() {
        debug!("Weather fields backfilled with sentinels: {:?}", missing);
    }

    builder.build(locale)
}

fn scalar_text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}
