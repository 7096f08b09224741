use crate::helpers::{TEST_KEY, error_response, generate_path, mount, text_response};

use common::{HttpStatusCode, RedactedCredential};
use search_core::error::ProviderError;
use search_core::{GeminiClient, GenerateRequest, ModelProvider};

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-3-pro-preview";

fn grounded_request() -> GenerateRequest {
    GenerateRequest::new(MODEL, "find rust")
        .with_system_instruction("json only")
        .with_web_search(true)
        .with_temperature(0.0)
}

/// **VALUE**: Verifies the outbound request: path, key header, search tool, config.
///
/// **WHY THIS MATTERS**: This is the only network contract the crate has. A wrong
/// header name means every call is 403; a missing tool means ungrounded answers.
///
/// **BUG THIS CATCHES**: Would catch the key moving to the query string or the
/// tool key being camel-cased.
#[tokio::test]
async fn given_grounded_request_when_generate_content_then_sends_expected_shape() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path(MODEL)))
        .and(header("x-goog-api-key", TEST_KEY))
        .and(body_partial_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "find rust"}]}],
            "systemInstruction": {"parts": [{"text": "json only"}]},
            "tools": [{"google_search": {}}],
            "generationConfig": {"temperature": 0.0}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("{\"results\":[]}")))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::new(&server.uri(), None).unwrap();
    let response = client
        .generate_content(&RedactedCredential::new(TEST_KEY), &grounded_request())
        .await
        .expect("call should succeed");

    assert_eq!(response.text.as_deref(), Some("{\"results\":[]}"));
    assert_eq!(response.finish_reason.as_deref(), Some("STOP"));
}

/// **VALUE**: Verifies multi-part answers are concatenated in order.
#[tokio::test]
async fn given_multi_part_answer_when_generate_content_then_text_concatenated() {
    let server = MockServer::start().await;
    mount(
        &server,
        MODEL,
        200,
        json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"a\""}, {"text": ": 1}"}]},
                "finishReason": "STOP"
            }]
        }),
    )
    .await;

    let client = GeminiClient::new(&server.uri(), None).unwrap();
    let response = client
        .generate_content(&RedactedCredential::new(TEST_KEY), &grounded_request())
        .await
        .unwrap();

    assert_eq!(response.text.as_deref(), Some("{\"a\": 1}"));
}

/// **VALUE**: Verifies a 429 envelope becomes an Api error with status and code.
#[tokio::test]
async fn given_429_envelope_when_generate_content_then_api_error_with_status() {
    let server = MockServer::start().await;
    mount(
        &server,
        MODEL,
        429,
        error_response(429, "RESOURCE_EXHAUSTED", None, "Quota exceeded for metric"),
    )
    .await;

    let client = GeminiClient::new(&server.uri(), None).unwrap();
    let error = client
        .generate_content(&RedactedCredential::new(TEST_KEY), &grounded_request())
        .await
        .unwrap_err();

    match error {
        ProviderError::Api {
            status_code,
            status,
            ..
        } => {
            assert_eq!(status_code, HttpStatusCode::TOO_MANY_REQUESTS);
            assert_eq!(status.as_deref(), Some("RESOURCE_EXHAUSTED"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

/// **VALUE**: Verifies the `details[].reason` of a 400 invalid-key envelope is kept.
///
/// **BUG THIS CATCHES**: Would catch dropping the reason, which is the only signal
/// that a 400 is an authentication problem.
#[tokio::test]
async fn given_400_api_key_invalid_when_generate_content_then_reason_preserved() {
    let server = MockServer::start().await;
    mount(
        &server,
        MODEL,
        400,
        error_response(
            400,
            "INVALID_ARGUMENT",
            Some("API_KEY_INVALID"),
            "API key not valid. Please pass a valid API key.",
        ),
    )
    .await;

    let client = GeminiClient::new(&server.uri(), None).unwrap();
    let error = client
        .generate_content(&RedactedCredential::new(TEST_KEY), &grounded_request())
        .await
        .unwrap_err();

    match error {
        ProviderError::Api { reason, .. } => {
            assert_eq!(reason.as_deref(), Some("API_KEY_INVALID"));
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

/// **VALUE**: Verifies a non-JSON error body falls back to the raw text.
#[tokio::test]
async fn given_plain_text_error_body_when_generate_content_then_message_is_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path(MODEL)))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway\n"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&server.uri(), None).unwrap();
    let error = client
        .generate_content(&RedactedCredential::new(TEST_KEY), &grounded_request())
        .await
        .unwrap_err();

    match error {
        ProviderError::Api {
            status_code,
            message,
            status,
            ..
        } => {
            assert_eq!(status_code, HttpStatusCode(502));
            assert_eq!(message, "Bad Gateway");
            assert!(status.is_none());
        }
        other => panic!("expected Api error, got {:?}", other),
    }
}

/// **VALUE**: Verifies an undecodable 2xx body is a Decode error.
#[tokio::test]
async fn given_garbage_success_body_when_generate_content_then_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path(MODEL)))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = GeminiClient::new(&server.uri(), None).unwrap();
    let error = client
        .generate_content(&RedactedCredential::new(TEST_KEY), &grounded_request())
        .await
        .unwrap_err();

    assert!(matches!(error, ProviderError::Decode { .. }));
}

/// **VALUE**: Verifies a configured timeout surfaces as a transport timeout.
///
/// **WHY THIS MATTERS**: Timeouts are the caller's choice, but when set they must
/// classify as Network rather than Unknown.
#[tokio::test]
async fn given_slow_server_and_timeout_when_generate_content_then_transport_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(generate_path(MODEL)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(text_response("{}"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let client = GeminiClient::new(&server.uri(), Some(Duration::from_millis(100))).unwrap();
    let error = client
        .generate_content(&RedactedCredential::new(TEST_KEY), &grounded_request())
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ProviderError::Transport {
            is_timeout: true,
            ..
        }
    ));
}

/// **VALUE**: Verifies an unreachable endpoint is a transport (connect) error.
#[tokio::test]
async fn given_unreachable_endpoint_when_generate_content_then_transport_error() {
    // Port 9 (discard) is closed on CI hosts.
    let client = GeminiClient::new("http://127.0.0.1:9", None).unwrap();

    let error = client
        .generate_content(&RedactedCredential::new(TEST_KEY), &grounded_request())
        .await
        .unwrap_err();

    assert!(error.is_transport());
}
