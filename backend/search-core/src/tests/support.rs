// Scripted model provider and context builders shared by the service tests.

use crate::config::ServiceConfig;
use crate::error::ProviderError;
use crate::gemini_client::{GenerateRequest, GenerateResponse, ModelProvider};
use crate::services::ServiceContext;
use crate::settings::{MemorySettingsStore, SettingsStore};

use common::RedactedCredential;

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

pub enum Scripted {
    Text(String),
    NoText,
    Fail(ProviderError),
}

/// Returns scripted outcomes in order and records every call.
#[derive(Default)]
pub struct ScriptedProvider {
    outcomes: Mutex<VecDeque<Scripted>>,
    calls: Mutex<Vec<(String, GenerateRequest)>>,
}

impl ScriptedProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push(Scripted::Text(text.into()))
    }

    pub fn with_no_text(self) -> Self {
        self.push(Scripted::NoText)
    }

    pub fn with_error(self, error: ProviderError) -> Self {
        self.push(Scripted::Fail(error))
    }

    fn push(self, outcome: Scripted) -> Self {
        self.outcomes.lock().unwrap().push_back(outcome);
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Credential values seen, in call order.
    pub fn credentials_seen(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(credential, _)| credential.clone())
            .collect()
    }

    pub fn last_request(&self) -> Option<GenerateRequest> {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|(_, request)| request.clone())
    }
}

#[async_trait]
impl ModelProvider for ScriptedProvider {
    async fn generate_content(
        &self,
        credential: &RedactedCredential,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, ProviderError> {
        self.calls
            .lock()
            .unwrap()
            .push((credential.expose().to_string(), request.clone()));

        match self.outcomes.lock().unwrap().pop_front() {
            Some(Scripted::Text(text)) => Ok(GenerateResponse::text(text)),
            Some(Scripted::NoText) | None => Ok(GenerateResponse::empty()),
            Some(Scripted::Fail(error)) => Err(error),
        }
    }
}

pub struct Harness {
    pub provider: Arc<ScriptedProvider>,
    pub store: Arc<MemorySettingsStore>,
    pub context: ServiceContext,
}

/// Context with an ambient default credential and default config.
pub fn harness(provider: ScriptedProvider) -> Harness {
    harness_with(
        provider,
        MemorySettingsStore::default(),
        Some("ambient-key-12345"),
        ServiceConfig::default(),
    )
}

pub fn harness_with(
    provider: ScriptedProvider,
    store: MemorySettingsStore,
    ambient_default: Option<&str>,
    config: ServiceConfig,
) -> Harness {
    let provider = Arc::new(provider);
    let store = Arc::new(store);
    let context = ServiceContext::new(
        provider.clone(),
        store.clone() as Arc<dyn SettingsStore>,
        ambient_default.map(str::to_string),
        config,
    );

    Harness {
        provider,
        store,
        context,
    }
}
