//! Model provider seam and its Generative Language REST implementation.
//!
//! The services only see [`ModelProvider`]. [`GeminiClient`] is the
//! production implementation; tests substitute scripted providers.

pub mod wire;

use crate::error::ProviderError;

use common::{ErrorLocation, RedactedCredential};

use wire::{
    Content, ErrorEnvelope, GenerateContentBody, GenerateContentResponse, GenerationConfig, Tool,
};

use std::panic::Location;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::Value;
use url::Url;

const API_KEY_HEADER: &str = "x-goog-api-key";
const API_VERSION_PATH: &str = "v1beta/models/";
const GENERATE_CONTENT_METHOD: &str = "generateContent";
const JSON_MIME_TYPE: &str = "application/json";

/// One generate-content call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub system_instruction: Option<String>,
    /// JSON schema for structured output. Sent with `application/json` when set.
    pub response_schema: Option<Value>,
    /// Attach the grounding search tool.
    pub web_search: bool,
    pub temperature: f32,
    pub max_output_tokens: Option<u32>,
}

impl GenerateRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system_instruction: None,
            response_schema: None,
            web_search: false,
            temperature: 0.0,
            max_output_tokens: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn with_response_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    pub fn with_web_search(mut self, enabled: bool) -> Self {
        self.web_search = enabled;
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }
}

/// What the services need back from a call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateResponse {
    /// Concatenated answer text; `None` when the model produced none.
    pub text: Option<String>,
    pub finish_reason: Option<String>,
}

impl GenerateResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            finish_reason: None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Opaque generate-content capability.
#[async_trait]
pub trait ModelProvider: Send + Sync {
    async fn generate_content(
        &self,
        credential: &RedactedCredential,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, ProviderError>;
}

/// Generative Language API client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: Url,
    client: Client,
}

impl GeminiClient {
    /// Build a client for `base_url_str`.
    ///
    /// No timeout is applied unless `timeout` is set; the caller owns
    /// cancellation.
    pub fn new(base_url_str: &str, timeout: Option<Duration>) -> Result<Self, ProviderError> {
        let mut base_url = Url::parse(base_url_str)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| ProviderError::Client {
            message: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        })?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, model: &str) -> Result<Url, ProviderError> {
        let url = self.base_url.join(&format!(
            "{API_VERSION_PATH}{model}:{GENERATE_CONTENT_METHOD}"
        ))?;
        Ok(url)
    }

    fn body(request: &GenerateRequest) -> GenerateContentBody {
        let (response_mime_type, response_schema) = match &request.response_schema {
            Some(schema) => (Some(JSON_MIME_TYPE.to_string()), Some(schema.clone())),
            None => (None, None),
        };

        GenerateContentBody {
            contents: vec![Content::user_text(&request.prompt)],
            system_instruction: request
                .system_instruction
                .as_ref()
                .map(Content::system_text),
            tools: if request.web_search {
                vec![Tool::google_search()]
            } else {
                Vec::new()
            },
            generation_config: GenerationConfig {
                temperature: request.temperature,
                max_output_tokens: request.max_output_tokens,
                response_mime_type,
                response_schema,
            },
        }
    }
}

#[async_trait]
impl ModelProvider for GeminiClient {
    async fn generate_content(
        &self,
        credential: &RedactedCredential,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, ProviderError> {
        let url = self.endpoint(&request.model)?;

        debug!(
            "generateContent model={} web_search={} temperature={} credential_len={}",
            request.model,
            request.web_search,
            request.temperature,
            credential.len()
        );

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, credential.expose())
            .json(&Self::body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), &body));
        }

        let bytes = response.bytes().await?;
        let parsed: GenerateContentResponse = serde_json::from_slice(&bytes)?;

        let text = parsed.first_candidate_text();
        let finish_reason = parsed.first_finish_reason();
        debug!(
            "generateContent finished: finish_reason={:?} text_len={}",
            finish_reason,
            text.as_ref().map_or(0, String::len)
        );

        Ok(GenerateResponse {
            text,
            finish_reason,
        })
    }
}

/// Build an [`ProviderError::Api`] from a non-2xx body, using the error
/// envelope when present and the raw body otherwise.
#[track_caller]
fn api_error(status_code: u16, body: &str) -> ProviderError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let reason = envelope.error.first_reason();
            ProviderError::api(
                status_code,
                envelope.error.status,
                reason,
                envelope.error.message.unwrap_or_default(),
            )
        }
        Err(_) => ProviderError::api(status_code, None, None, body.trim()),
    }
}
