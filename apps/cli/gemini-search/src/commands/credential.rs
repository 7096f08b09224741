use crate::app::App;
use crate::commands::CommandOutput;
use crate::error::AppError;

use common::ErrorLocation;
use search_core::{CredentialProbe, CredentialSource, resolve_credential_with_source};

use std::io::BufRead;
use std::panic::Location;

use serde::Serialize;

use log::{info, warn};

/// Which credential a query would use right now. Never carries the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyStatus {
    /// `"user_override"`, `"ambient_default"` or `null`
    pub source: Option<String>,
    pub override_set: bool,
    pub ambient_default_available: bool,
    pub credential_length: Option<usize>,
}

pub async fn set_key(app: &App, candidate: &str) -> Result<CommandOutput, AppError> {
    let accepted = CredentialProbe::new(app.context().clone())
        .probe_and_store(candidate, app.store())
        .await?;

    if accepted {
        info!("Key accepted and stored");
    } else {
        warn!("Key rejected; existing credential left unchanged");
    }

    Ok(CommandOutput::KeySet { accepted })
}

/// First line of `reader`, without the line ending. The key itself is never logged.
pub fn read_candidate(mut reader: impl BufRead) -> Result<String, AppError> {
    let mut line = String::new();
    reader.read_line(&mut line).map_err(|e| AppError::Input {
        message: format!("Failed to read key from stdin: {e}"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    let candidate = line.trim_end_matches(['\r', '\n']).to_string();
    if candidate.trim().is_empty() {
        return Err(AppError::Input {
            message: "No key given on the command line or stdin".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(candidate)
}

pub fn clear_key(app: &App) -> Result<CommandOutput, AppError> {
    CredentialProbe::new(app.context().clone()).clear_override(app.store())?;
    Ok(CommandOutput::KeyCleared { cleared: true })
}

pub fn key_status(app: &App) -> CommandOutput {
    let sources = app.context().credential_sources();
    let override_set = sources
        .user_override
        .as_deref()
        .is_some_and(|value| !value.trim().is_empty());
    let resolved = resolve_credential_with_source(&sources);

    CommandOutput::KeyStatus(KeyStatus {
        source: resolved
            .as_ref()
            .map(|(_, source)| source_name(*source).to_string()),
        override_set,
        ambient_default_available: app.context().has_ambient_default(),
        credential_length: resolved.as_ref().map(|(credential, _)| credential.len()),
    })
}

fn source_name(source: CredentialSource) -> &'static str {
    match source {
        CredentialSource::UserOverride => "user_override",
        CredentialSource::AmbientDefault => "ambient_default",
    }
}
