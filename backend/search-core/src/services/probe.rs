use crate::classify::classify;
use crate::credential::validation::is_plausible_candidate;
use crate::error::QueryError;
use crate::gemini_client::GenerateRequest;
use crate::services::ServiceContext;
use crate::services::prompts::PROBE_PROMPT;
use crate::settings::{Settings, SettingsStore};

use common::RedactedCredential;
use models::ClassifiedError;

use log::{info, warn};

/// Validates a candidate credential with one minimal provider call.
#[derive(Debug, Clone)]
pub struct CredentialProbe {
    context: ServiceContext,
}

impl CredentialProbe {
    pub fn new(context: ServiceContext) -> Self {
        Self { context }
    }

    /// `true` iff a minimal call with `candidate` succeeds.
    ///
    /// Candidates shorter than five characters after trimming are rejected
    /// without a call. Every failure is `false`.
    pub async fn probe(&self, candidate: &str) -> bool {
        if !is_plausible_candidate(candidate) {
            info!("Probe rejected candidate without a call: too short");
            return false;
        }

        let Some(credential) = RedactedCredential::non_blank(candidate) else {
            return false;
        };

        let config = self.context.config();
        let request = GenerateRequest::new(&config.probe_model, PROBE_PROMPT)
            .with_temperature(0.0)
            .with_max_output_tokens(config.probe_max_output_tokens);

        match self.context.generate(&credential, &request).await {
            Ok(_) => {
                info!("Probe succeeded ({} chars)", credential.len());
                true
            }
            Err(e) => {
                warn!("Probe failed: {}", e);
                false
            }
        }
    }

    /// Probe and, only on success, persist the trimmed candidate as the user override.
    ///
    /// Returns whether the probe succeeded. A failed write after a successful
    /// probe is an `Unknown` error.
    pub async fn probe_and_store(
        &self,
        candidate: &str,
        store: &dyn SettingsStore,
    ) -> Result<bool, ClassifiedError> {
        if !self.probe(candidate).await {
            return Ok(false);
        }

        let trimmed = candidate.trim().to_string();
        let mut set_override =
            |settings: &mut Settings| settings.credential.user_override = Some(trimmed.clone());
        store
            .update(&mut set_override)
            .map_err(|e| classify(&QueryError::from(e), self.context.locale()))?;

        info!("Credential override stored");
        Ok(true)
    }

    /// Remove the user override. The ambient default, if any, applies again.
    ///
    /// A corrupt settings file is replaced rather than blocking the clear.
    pub fn clear_override(&self, store: &dyn SettingsStore) -> Result<(), ClassifiedError> {
        let mut clear = |settings: &mut Settings| settings.credential.user_override = None;
        store
            .update_or_reset(&mut clear)
            .map_err(|e| classify(&QueryError::from(e), self.context.locale()))?;

        info!("Credential override cleared");
        Ok(())
    }
}
