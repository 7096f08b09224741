//! Query services: search, weather and the credential probe.
//!
//! Each public operation runs a single provider call and returns either a
//! typed value or a [`models::ClassifiedError`]. Internal failures are
//! [`crate::error::QueryError`]s until they pass through
//! [`crate::classify::classify`].

pub mod probe;
pub mod prompts;
pub mod search;
pub mod weather;

pub use probe::CredentialProbe;
pub use search::SearchService;
pub use weather::WeatherService;

use crate::config::ServiceConfig;
use crate::credential::{CredentialSources, resolve_credential_with_source};
use crate::error::QueryError;
use crate::gemini_client::{GenerateRequest, GenerateResponse, ModelProvider};
use crate::settings::SettingsStore;

use common::RedactedCredential;
use models::Locale;

use std::fmt;
use std::sync::Arc;

use log::{debug, warn};

/// Everything a service needs, shared behind `Arc`s. Cheap to clone.
#[derive(Clone)]
pub struct ServiceContext {
    provider: Arc<dyn ModelProvider>,
    settings: Arc<dyn SettingsStore>,
    ambient_default: Option<String>,
    config: Arc<ServiceConfig>,
}

impl ServiceContext {
    pub fn new(
        provider: Arc<dyn ModelProvider>,
        settings: Arc<dyn SettingsStore>,
        ambient_default: Option<String>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            provider,
            settings,
            ambient_default,
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn locale(&self) -> Locale {
        self.config.locale
    }

    pub fn settings(&self) -> &Arc<dyn SettingsStore> {
        &self.settings
    }

    pub fn has_ambient_default(&self) -> bool {
        self.ambient_default
            .as_deref()
            .is_some_and(|value| !value.trim().is_empty())
    }

    /// Current override/default pair.
    ///
    /// An unreadable settings store degrades to "no override" so the ambient
    /// default still works.
    pub fn credential_sources(&self) -> CredentialSources {
        let user_override = match self.settings.user_override() {
            Ok(value) => value,
            Err(e) => {
                warn!("Could not read credential override, ignoring it: {}", e);
                None
            }
        };

        CredentialSources::new(user_override, self.ambient_default.clone())
    }

    /// Resolve the credential for one call.
    pub fn credential(&self) -> Result<RedactedCredential, QueryError> {
        match resolve_credential_with_source(&self.credential_sources()) {
            Some((credential, source)) => {
                debug!("Using credential from {} ({} chars)", source, credential.len());
                Ok(credential)
            }
            None => Err(QueryError::missing_credential()),
        }
    }

    pub(crate) async fn generate(
        &self,
        credential: &RedactedCredential,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, QueryError> {
        let response = self.provider.generate_content(credential, request).await?;
        Ok(response)
    }
}

impl fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContext")
            .field("ambient_default", &self.ambient_default.as_ref().map(|_| "[REDACTED]"))
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
