use crate::config::ServiceConfig;
use crate::error::ProviderError;
use crate::services::SearchService;
use crate::settings::MemorySettingsStore;
use crate::tests::support::{ScriptedProvider, harness, harness_with};

use models::{ErrorKind, Locale, SearchResult};

/// **VALUE**: Verifies the happy path end to end through the scripted provider.
///
/// **WHY THIS MATTERS**: Proves the search model, search tool and temperature are
/// what the provider actually receives.
///
/// **BUG THIS CATCHES**: Would catch a weather model id or a missing search tool.
#[tokio::test]
async fn given_decorated_answer_when_search_then_returns_results_and_sends_grounded_request() {
    let h = harness(ScriptedProvider::new().with_text(
        "```json\n{\"results\":[{\"title\":\"Rust\",\"url\":\"https://www.rust-lang.org/\",\"summary\":\"A language.\"}]}\n```",
    ));
    let service = SearchService::new(h.context.clone());

    let response = service.search("rust").await.expect("search should succeed");

    assert_eq!(
        response.results,
        vec![SearchResult {
            title: "Rust".to_string(),
            url: "https://www.rust-lang.org/".to_string(),
            summary: "A language.".to_string(),
        }]
    );

    let request = h.provider.last_request().expect("one call");
    assert_eq!(request.model, "gemini-3-pro-preview");
    assert!(request.web_search);
    assert_eq!(request.temperature, 0.0);
    assert!(request.prompt.contains("rust"));
    assert!(request.system_instruction.is_some());
    assert!(request.response_schema.is_none());
}

/// **VALUE**: Verifies no credential means `Unauthenticated` and zero calls.
///
/// **BUG THIS CATCHES**: Would catch sending an empty key header upstream.
#[tokio::test]
async fn given_no_credential_when_search_then_unauthenticated_without_call() {
    let h = harness_with(
        ScriptedProvider::new(),
        MemorySettingsStore::default(),
        None,
        ServiceConfig::default(),
    );
    let service = SearchService::new(h.context.clone());

    let error = service.search("rust").await.unwrap_err();

    assert_eq!(error.kind, ErrorKind::Unauthenticated);
    assert_eq!(h.provider.call_count(), 0);
}

/// **VALUE**: Verifies the stored override is the credential sent, over the default.
#[tokio::test]
async fn given_override_and_default_when_search_then_override_is_sent() {
    let h = harness_with(
        ScriptedProvider::new().with_text("{\"results\": []}"),
        MemorySettingsStore::with_override("  override-key-999 "),
        Some("ambient-key-12345"),
        ServiceConfig::default(),
    );
    let service = SearchService::new(h.context.clone());

    service.search("rust").await.expect("search should succeed");

    assert_eq!(h.provider.credentials_seen(), vec!["override-key-999".to_string()]);
}

/// **VALUE**: Verifies a blank query short-circuits to empty results.
#[tokio::test]
async fn given_blank_query_when_search_then_empty_results_without_call() {
    let h = harness(ScriptedProvider::new());
    let service = SearchService::new(h.context.clone());

    let response = service.search("   \n").await.expect("blank query is not an error");

    assert!(response.is_empty());
    assert_eq!(h.provider.call_count(), 0);
}

/// **VALUE**: Verifies a response with no text is an empty result, not an error.
#[tokio::test]
async fn given_provider_returns_no_text_when_search_then_empty_results() {
    let h = harness(ScriptedProvider::new().with_no_text());
    let service = SearchService::new(h.context.clone());

    let response = service.search("rust").await.expect("no text is not an error");

    assert!(response.is_empty());
}

/// **VALUE**: Verifies entries are validated one by one and order is kept.
///
/// **WHY THIS MATTERS**: One bad entry must not throw away the good ones, and
/// relative or non-http links must never be rendered as clickable.
///
/// **BUG THIS CATCHES**: Would catch all-or-nothing typed deserialization.
#[tokio::test]
async fn given_mixed_entries_when_search_then_invalid_dropped_and_defaults_applied() {
    let h = harness(ScriptedProvider::new().with_text(
        r#"{"results": [
            {"title": "First", "url": "https://a.example/1", "summary": "one"},
            {"title": "Relative", "url": "/just/a/path", "summary": "x"},
            {"title": "Script", "url": "javascript:alert(1)", "summary": "x"},
            {"title": "No url", "summary": "x"},
            "not an object",
            {"url": "http://b.example/2"},
            {"title": "  ", "url": "https://c.example/3", "summary": 42}
        ]}"#,
    ));
    let service = SearchService::new(h.context.clone());

    let response = service.search("rust").await.expect("search should succeed");

    let titles: Vec<&str> = response.results.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "b.example", "c.example"]);
    assert_eq!(response.results[1].summary, "");
    assert_eq!(response.results[2].summary, "");
}

/// **VALUE**: Verifies an object without a `results` array yields empty results.
#[tokio::test]
async fn given_object_without_results_array_when_search_then_empty_results() {
    let h = harness(ScriptedProvider::new().with_text("{\"results\": \"none\"}"));
    let service = SearchService::new(h.context.clone());

    let response = service.search("rust").await.expect("search should succeed");

    assert!(response.is_empty());
}

/// **VALUE**: Verifies unparseable text and provider errors are classified.
#[tokio::test]
async fn given_failures_when_search_then_classified_errors() {
    let h = harness(
        ScriptedProvider::new()
            .with_text("I could not find anything.")
            .with_error(ProviderError::api(429, Some("RESOURCE_EXHAUSTED".to_string()), None, "slow down"))
            .with_error(ProviderError::transport("connection reset")),
    );
    let service = SearchService::new(h.context.clone());

    assert_eq!(
        service.search("a").await.unwrap_err().kind,
        ErrorKind::MalformedResponse
    );
    assert_eq!(
        service.search("b").await.unwrap_err().kind,
        ErrorKind::QuotaExceeded
    );
    assert_eq!(service.search("c").await.unwrap_err().kind, ErrorKind::Network);
}

/// **VALUE**: Verifies the prompt language follows the configured locale.
#[tokio::test]
async fn given_english_locale_when_search_then_english_prompt() {
    let h = harness_with(
        ScriptedProvider::new().with_text("{\"results\": []}"),
        MemorySettingsStore::default(),
        Some("ambient-key-12345"),
        ServiceConfig {
            locale: Locale::En,
            structured_output: true,
            ..ServiceConfig::default()
        },
    );
    let service = SearchService::new(h.context.clone());

    service.search("rust").await.expect("search should succeed");

    let request = h.provider.last_request().unwrap();
    assert!(request.prompt.starts_with("Find the most recent web sites"));
    assert!(request.response_schema.is_some());
}
