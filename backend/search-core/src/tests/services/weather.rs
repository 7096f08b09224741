use crate::config::ServiceConfig;
use crate::error::ProviderError;
use crate::services::WeatherService;
use crate::settings::{CachedWeather, MemorySettingsStore, Settings, SettingsStore};
use crate::tests::support::{ScriptedProvider, harness, harness_with};

use models::{Coordinates, ErrorKind, Locale, WeatherInfo};

use std::time::{Duration, SystemTime, UNIX_EPOCH};

const LAT: f64 = 35.6812;
const LNG: f64 = 139.7671;

fn at(secs: u64) -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(secs)
}

fn all_fields_populated(info: &WeatherInfo) -> bool {
    [
        &info.location,
        &info.temp,
        &info.condition,
        &info.high,
        &info.low,
        &info.details,
    ]
    .iter()
    .all(|field| !field.trim().is_empty())
}

/// **VALUE**: Verifies a complete answer passes through and the request is grounded.
#[tokio::test]
async fn given_complete_answer_when_weather_at_then_returns_fields() {
    let h = harness(ScriptedProvider::new().with_text(
        r#"{"location":"東京都千代田区","temp":"20℃","condition":"晴れ","high":"24℃","low":"15℃","details":"上着があると安心です。"}"#,
    ));
    let service = WeatherService::new(h.context.clone());

    let info = service.weather_at(LAT, LNG).await.expect("weather should succeed");

    assert_eq!(info.location, "東京都千代田区");
    assert_eq!(info.condition, "晴れ");

    let request = h.provider.last_request().unwrap();
    assert_eq!(request.model, "gemini-3-flash-preview");
    assert!(request.web_search);
    assert!(request.prompt.contains("35.6812"));
    assert!(request.prompt.contains("139.7671"));
}

/// **VALUE**: Verifies partial, blank, null and numeric fields are backfilled per field.
///
/// **WHY THIS MATTERS**: A weather card is never shown half-empty.
///
/// **BUG THIS CATCHES**: Would catch an all-or-nothing fallback or a `20` number
/// being discarded instead of rendered.
#[tokio::test]
async fn given_partial_answer_when_weather_at_then_each_missing_field_backfilled() {
    let h = harness(ScriptedProvider::new().with_text(
        r#"Sure! {"location":"Osaka","temp":20,"condition":"   ","high":null,"low":["x"]}"#,
    ));
    let service = WeatherService::new(h.context.clone());

    let info = service.weather_at(LAT, LNG).await.expect("weather should succeed");
    let sentinel = WeatherInfo::sentinel(Locale::Ja);

    assert_eq!(info.location, "Osaka");
    assert_eq!(info.temp, "20");
    assert_eq!(info.condition, sentinel.condition);
    assert_eq!(info.high, sentinel.high);
    assert_eq!(info.low, sentinel.low);
    assert_eq!(info.details, sentinel.details);
    assert!(all_fields_populated(&info));
}

/// **VALUE**: Verifies no text at all yields the all-sentinel report.
#[tokio::test]
async fn given_no_text_when_weather_at_then_all_sentinels() {
    let h = harness(ScriptedProvider::new().with_no_text());
    let service = WeatherService::new(h.context.clone());

    let info = service.weather_at(LAT, LNG).await.expect("no text is not an error");

    assert_eq!(info, WeatherInfo::sentinel(Locale::Ja));
}

/// **VALUE**: Verifies extraction failure and auth failure are classified.
#[tokio::test]
async fn given_failures_when_weather_at_then_classified_errors() {
    let h = harness(
        ScriptedProvider::new()
            .with_text("sunny, probably")
            .with_error(ProviderError::api(403, Some("PERMISSION_DENIED".to_string()), None, "denied")),
    );
    let service = WeatherService::new(h.context.clone());

    assert_eq!(
        service.weather_at(LAT, LNG).await.unwrap_err().kind,
        ErrorKind::MalformedResponse
    );
    assert_eq!(
        service.weather_at(LAT, LNG).await.unwrap_err().kind,
        ErrorKind::Unauthenticated
    );
}

/// **VALUE**: Verifies out-of-range coordinates never reach the provider.
#[tokio::test]
async fn given_invalid_coordinates_when_weather_at_then_unknown_without_call() {
    let h = harness(ScriptedProvider::new());
    let service = WeatherService::new(h.context.clone());

    let error = service.weather_at(95.0, LNG).await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::Unknown);
    assert_eq!(h.provider.call_count(), 0);
}

// ============================================
// CACHE
// ============================================

/// **VALUE**: Verifies a fresh nearby entry is served with zero provider calls.
#[tokio::test]
async fn given_fresh_cache_when_weather_at_cached_then_no_provider_call() {
    let cached_info = WeatherInfo {
        location: "Cached".to_string(),
        ..WeatherInfo::sentinel(Locale::Ja)
    };
    let mut settings = Settings::default();
    settings.weather_cache = Some(CachedWeather::new(
        cached_info.clone(),
        Coordinates::new(LAT, LNG).unwrap(),
        at(1_000),
    ));

    let h = harness_with(
        ScriptedProvider::new(),
        MemorySettingsStore::new(settings),
        Some("ambient-key-12345"),
        ServiceConfig::default(),
    );
    let service = WeatherService::new(h.context.clone());

    let info = service
        .weather_at_cached(LAT + 0.005, LNG, h.store.as_ref(), at(1_600))
        .await
        .expect("cache hit");

    assert_eq!(info, cached_info);
    assert_eq!(h.provider.call_count(), 0);
}

/// **VALUE**: Verifies a stale entry calls through and the cache is refreshed.
///
/// **BUG THIS CATCHES**: Would catch serving stale data or forgetting to write back.
#[tokio::test]
async fn given_stale_cache_when_weather_at_cached_then_calls_through_and_refreshes() {
    let mut settings = Settings::default();
    settings.weather_cache = Some(CachedWeather::new(
        WeatherInfo::sentinel(Locale::Ja),
        Coordinates::new(LAT, LNG).unwrap(),
        at(1_000),
    ));

    let h = harness_with(
        ScriptedProvider::new().with_text(r#"{"location":"Fresh"}"#),
        MemorySettingsStore::new(settings),
        Some("ambient-key-12345"),
        ServiceConfig::default(),
    );
    let service = WeatherService::new(h.context.clone());

    let info = service
        .weather_at_cached(LAT, LNG, h.store.as_ref(), at(1_000 + 1_800))
        .await
        .expect("call through");

    assert_eq!(info.location, "Fresh");
    assert_eq!(h.provider.call_count(), 1);

    let stored = h.store.load().unwrap().weather_cache.expect("cache written");
    assert_eq!(stored.info.location, "Fresh");
    assert_eq!(stored.fetched_at_unix_secs, 2_800);
}

/// **VALUE**: Verifies a failed lookup leaves the cache untouched.
#[tokio::test]
async fn given_failure_when_weather_at_cached_then_error_and_cache_not_written() {
    let h = harness(ScriptedProvider::new().with_error(ProviderError::transport("timed out")));
    let service = WeatherService::new(h.context.clone());

    let error = service
        .weather_at_cached(LAT, LNG, h.store.as_ref(), at(5_000))
        .await
        .unwrap_err();

    assert_eq!(error.kind, ErrorKind::Network);
    assert!(h.store.load().unwrap().weather_cache.is_none());
}

/// **VALUE**: Verifies an all-sentinel report is neither cached nor served from cache.
///
/// **WHY THIS MATTERS**: An empty answer is a transient failure. Caching it would
/// show "unknown location" for the whole TTL without asking the model again.
///
/// **BUG THIS CATCHES**: Would catch writing every successful lookup to the cache
/// regardless of content.
#[tokio::test]
async fn given_empty_answer_then_full_answer_when_weather_at_cached_then_second_call_refetches() {
    let h = harness(
        ScriptedProvider::new()
            .with_no_text()
            .with_text(r#"{"location":"Tokyo","temp":"21°C","condition":"Sunny","high":"24°C","low":"15°C","details":"Light breeze"}"#),
    );
    let service = WeatherService::new(h.context.clone());

    let first = service
        .weather_at_cached(LAT, LNG, h.store.as_ref(), at(10_000))
        .await
        .expect("empty answer is still a report");
    assert_eq!(first, WeatherInfo::sentinel(Locale::Ja));
    assert!(h.store.load().unwrap().weather_cache.is_none());

    let second = service
        .weather_at_cached(LAT, LNG, h.store.as_ref(), at(10_060))
        .await
        .expect("second lookup");

    assert_eq!(second.location, "Tokyo");
    assert!(all_fields_populated(&second));
    assert_eq!(h.provider.call_count(), 2);
}

/// **VALUE**: Verifies a fresh but all-sentinel cache entry is treated as a miss.
#[tokio::test]
async fn given_fresh_sentinel_cache_entry_when_weather_at_cached_then_calls_through() {
    let mut settings = Settings::default();
    settings.weather_cache = Some(CachedWeather::new(
        WeatherInfo::sentinel(Locale::Ja),
        Coordinates::new(LAT, LNG).unwrap(),
        at(1_000),
    ));

    let h = harness_with(
        ScriptedProvider::new().with_text(r#"{"location":"Osaka"}"#),
        MemorySettingsStore::new(settings),
        Some("ambient-key-12345"),
        ServiceConfig::default(),
    );
    let service = WeatherService::new(h.context.clone());

    let info = service
        .weather_at_cached(LAT, LNG, h.store.as_ref(), at(1_060))
        .await
        .expect("call through");

    assert_eq!(info.location, "Osaka");
    assert_eq!(h.provider.call_count(), 1);
}
