//! Shared fixtures: a mock Generative Language endpoint and service wiring.

use search_core::{GeminiClient, MemorySettingsStore, ServiceConfig, ServiceContext, SettingsStore};

use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_KEY: &str = "AIzaTestKey0123456789";

pub fn generate_path(model: &str) -> String {
    format!("/v1beta/models/{}:generateContent", model)
}

/// A successful `generateContent` body whose answer is `text`.
pub fn text_response(text: &str) -> Value {
    json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": text}]},
            "finishReason": "STOP"
        }]
    })
}

pub fn error_response(code: u16, status: &str, reason: Option<&str>, message: &str) -> Value {
    let details = match reason {
        Some(reason) => json!([{
            "@type": "type.googleapis.com/google.rpc.ErrorInfo",
            "reason": reason,
            "domain": "googleapis.com"
        }]),
        None => json!([]),
    };

    json!({
        "error": {"code": code, "message": message, "status": status, "details": details}
    })
}

/// Mount a single response for `model`.
pub async fn mount(server: &MockServer, model: &str, status: u16, body: Value) {
    Mock::given(method("POST"))
        .and(path(generate_path(model)))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

pub fn config_for(server: &MockServer) -> ServiceConfig {
    ServiceConfig {
        base_url: server.uri(),
        ..ServiceConfig::default()
    }
}

/// Context talking to `server`, with `ambient` as the default credential.
pub fn context_for(
    server: &MockServer,
    store: Arc<MemorySettingsStore>,
    ambient: Option<&str>,
) -> ServiceContext {
    let config = config_for(server);
    let client = GeminiClient::new(&config.base_url, config.request_timeout())
        .expect("client should build");

    ServiceContext::new(
        Arc::new(client),
        store as Arc<dyn SettingsStore>,
        ambient.map(str::to_string),
        config,
    )
}
