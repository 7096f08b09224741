use crate::helpers::{TEST_KEY, context_for, error_response, generate_path, mount, text_response};

use models::{ErrorKind, Locale, WeatherInfo};
use search_core::{
    CredentialProbe, GeminiClient, MemorySettingsStore, SearchService, ServiceConfig,
    ServiceContext, SettingsStore, WeatherService,
};

use std::sync::Arc;
use std::time::{Duration, SystemTime};

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// **VALUE**: Verifies search end to end over HTTP with a decorated answer.
#[tokio::test]
async fn given_decorated_answer_over_http_when_search_then_typed_results() {
    let server = MockServer::start().await;
    mount(
        &server,
        "gemini-3-pro-preview",
        200,
        text_response(
            "結果:\n```json\n{\"results\":[{\"title\":\"A\",\"url\":\"https://x.com\",\"summary\":\"s\"}],}\n```",
        ),
    )
    .await;

    let store = Arc::new(MemorySettingsStore::default());
    let service = SearchService::new(context_for(&server, store, Some(TEST_KEY)));

    let response = service.search("x").await.expect("search should succeed");

    assert_eq!(response.results.len(), 1);
    assert_eq!(response.results[0].url, "https://x.com");
}

/// **VALUE**: Verifies a 429 from the provider reaches the caller as QuotaExceeded.
#[tokio::test]
async fn given_quota_error_over_http_when_search_then_quota_exceeded() {
    let server = MockServer::start().await;
    mount(
        &server,
        "gemini-3-pro-preview",
        429,
        error_response(429, "RESOURCE_EXHAUSTED", None, "Resource has been exhausted"),
    )
    .await;

    let store = Arc::new(MemorySettingsStore::default());
    let service = SearchService::new(context_for(&server, store, Some(TEST_KEY)));

    let error = service.search("x").await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::QuotaExceeded);
    assert!(!error.message.contains("exhausted"));
}

/// **VALUE**: Verifies a refused connection reaches the caller as Network, even when
/// the endpoint URL contains digits that look like status codes.
///
/// **WHY THIS MATTERS**: reqwest error text includes the request URL. Scanning it
/// would tell an offline user their quota is used up.
///
/// **BUG THIS CATCHES**: Would catch marker matching on locally produced transport text.
#[tokio::test]
async fn given_closed_port_with_status_digits_when_search_then_network() {
    // Nothing listens on 4290; the path segment mimics an auth status.
    let base_url = "http://127.0.0.1:4290/403";
    let config = ServiceConfig {
        base_url: base_url.to_string(),
        request_timeout_secs: Some(5),
        ..ServiceConfig::default()
    };
    let client = GeminiClient::new(base_url, Some(Duration::from_secs(5))).unwrap();
    let store: Arc<dyn SettingsStore> = Arc::new(MemorySettingsStore::default());
    let context = ServiceContext::new(
        Arc::new(client),
        store,
        Some(TEST_KEY.to_string()),
        config,
    );

    let error = SearchService::new(context).search("rust").await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::Network);
}

/// **VALUE**: Verifies weather over HTTP backfills an answer with missing fields.
#[tokio::test]
async fn given_partial_weather_over_http_when_weather_at_then_sentinels_fill_gaps() {
    let server = MockServer::start().await;
    mount(
        &server,
        "gemini-3-flash-preview",
        200,
        text_response("{\"location\": \"札幌市\", \"temp\": \"-2℃\"} [1]"),
    )
    .await;

    let store = Arc::new(MemorySettingsStore::default());
    let service = WeatherService::new(context_for(&server, store, Some(TEST_KEY)));

    let info = service.weather_at(43.0621, 141.3544).await.expect("weather");
    let sentinel = WeatherInfo::sentinel(Locale::Ja);

    assert_eq!(info.location, "札幌市");
    assert_eq!(info.temp, "-2℃");
    assert_eq!(info.high, sentinel.high);
    assert_eq!(info.details, sentinel.details);
}

/// **VALUE**: Verifies the second cached lookup is served without HTTP.
///
/// **BUG THIS CATCHES**: Would catch the cache write being skipped on success.
#[tokio::test]
async fn given_repeated_lookup_when_weather_at_cached_then_single_http_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path("gemini-3-flash-preview")))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response(
            "{\"location\":\"Kyoto\",\"temp\":\"12℃\",\"condition\":\"Cloudy\",\"high\":\"15℃\",\"low\":\"8℃\",\"details\":\"Umbrella.\"}",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySettingsStore::default());
    let service = WeatherService::new(context_for(&server, store.clone(), Some(TEST_KEY)));
    let now = SystemTime::now();

    let first = service
        .weather_at_cached(35.0116, 135.7681, store.as_ref(), now)
        .await
        .expect("first lookup");
    let second = service
        .weather_at_cached(35.0120, 135.7690, store.as_ref(), now)
        .await
        .expect("second lookup");

    assert_eq!(first, second);
    assert!(store.load().unwrap().weather_cache.is_some());
}

/// **VALUE**: Verifies probe_and_store sends a minimal request and persists the key.
#[tokio::test]
async fn given_valid_candidate_over_http_when_probe_and_store_then_override_saved() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path("gemini-3-flash-preview")))
        .and(header("x-goog-api-key", "AIzaNewCandidate999"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "ping"}]}],
            "generationConfig": {"temperature": 0.0, "maxOutputTokens": 8}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("pong")))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySettingsStore::default());
    let probe = CredentialProbe::new(context_for(&server, store.clone(), None));

    let accepted = probe
        .probe_and_store("AIzaNewCandidate999", store.as_ref())
        .await
        .expect("store should succeed");

    assert!(accepted);
    assert_eq!(
        store.user_override().unwrap().as_deref(),
        Some("AIzaNewCandidate999")
    );
}

/// **VALUE**: Verifies a rejected key over HTTP is `false` and nothing is stored.
#[tokio::test]
async fn given_rejected_candidate_over_http_when_probe_and_store_then_nothing_saved() {
    let server = MockServer::start().await;
    mount(
        &server,
        "gemini-3-flash-preview",
        400,
        error_response(400, "INVALID_ARGUMENT", Some("API_KEY_INVALID"), "API key not valid."),
    )
    .await;

    let store = Arc::new(MemorySettingsStore::default());
    let probe = CredentialProbe::new(context_for(&server, store.clone(), None));

    let accepted = probe
        .probe_and_store("AIzaRejected0000", store.as_ref())
        .await
        .expect("no store error");

    assert!(!accepted);
    assert!(store.user_override().unwrap().is_none());
}
