//! Credential resolution.
//!
//! # Precedence
//! 1. Persisted user override (non-empty after trim)
//! 2. Ambient default from the environment / `.env`
//! 3. Absent
//!
//! The resolver is a pure function over an explicit [`CredentialSources`]
//! pair. It never reads settings or the environment itself; the ambient
//! default is loaded once at start-up by [`load_ambient_default`] and the
//! override is read by the service from its settings store.

pub mod validation;

use common::RedactedCredential;

use validation::detect_placeholder;

use std::env;
use std::fmt;
use std::path::PathBuf;

use log::{debug, info, warn};

/// Environment variables consulted for the ambient default, in order.
pub const AMBIENT_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "GOOGLE_API_KEY", "API_KEY"];

/// The two places a credential can come from.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialSources {
    pub user_override: Option<String>,
    pub ambient_default: Option<String>,
}

impl CredentialSources {
    pub fn new(user_override: Option<String>, ambient_default: Option<String>) -> Self {
        Self {
            user_override,
            ambient_default,
        }
    }
}

// Hand-written so raw values never reach a log line.
impl fmt::Debug for CredentialSources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSources")
            .field("user_override", &self.user_override.as_ref().map(|_| "[REDACTED]"))
            .field("ambient_default", &self.ambient_default.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Which source won resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialSource {
    UserOverride,
    AmbientDefault,
}

impl fmt::Display for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::UserOverride => write!(f, "user override"),
            CredentialSource::AmbientDefault => write!(f, "ambient default"),
        }
    }
}

/// Pick the credential for one call. Returned value is trimmed.
pub fn resolve_credential(sources: &CredentialSources) -> Option<RedactedCredential> {
    resolve_credential_with_source(sources).map(|(credential, _)| credential)
}

/// Like [`resolve_credential`], also reporting which source won.
pub fn resolve_credential_with_source(
    sources: &CredentialSources,
) -> Option<(RedactedCredential, CredentialSource)> {
    if let Some(credential) = sources
        .user_override
        .as_deref()
        .and_then(RedactedCredential::non_blank)
    {
        return Some((credential, CredentialSource::UserOverride));
    }

    sources
        .ambient_default
        .as_deref()
        .and_then(RedactedCredential::non_blank)
        .map(|credential| (credential, CredentialSource::AmbientDefault))
}

/// Result of attempting to load a `.env` file.
#[derive(Debug)]
pub struct EnvLoadResult {
    pub path: Option<PathBuf>,
    pub loaded: bool,
}

/// Load the ambient default credential.
///
/// Tries `.env` in the current directory, then next to the executable (a
/// missing file is not an error), then reads the first non-empty, non-placeholder
/// value among [`AMBIENT_ENV_VARS`].
pub fn load_ambient_default() -> Option<String> {
    let env_result = try_load_dotenv();
    if !env_result.loaded {
        debug!("No .env file found - will check existing environment variables");
    }

    ambient_default_from_env()
}

/// Read [`AMBIENT_ENV_VARS`] from the process environment without touching `.env`.
pub fn ambient_default_from_env() -> Option<String> {
    for name in AMBIENT_ENV_VARS {
        match env::var(name) {
            Ok(value) => {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    debug!("{} is set but empty, skipping", name);
                    continue;
                }
                if let Some(pattern) = detect_placeholder(trimmed) {
                    warn!("{} looks like a placeholder ({}), skipping", name, pattern);
                    continue;
                }
                info!(
                    "Ambient credential found in {} ({} chars)",
                    name,
                    trimmed.chars().count()
                );
                return Some(trimmed.to_string());
            }
            Err(env::VarError::NotPresent) => {
                debug!("No {} env var found", name);
            }
            Err(env::VarError::NotUnicode(_)) => {
                warn!("Env var {} contains invalid unicode", name);
            }
        }
    }

    None
}

/// Attempts to load .env from known locations.
fn try_load_dotenv() -> EnvLoadResult {
    if let Ok(path) = dotenvy::dotenv() {
        info!("Loaded .env from: {:?}", path);
        return EnvLoadResult {
            path: Some(path),
            loaded: true,
        };
    }

    if let Ok(exe_path) = env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        let env_path = exe_dir.join(".env");
        if env_path.exists() {
            match dotenvy::from_path(&env_path) {
                Ok(()) => {
                    info!("Loaded .env from: {:?}", env_path);
                    return EnvLoadResult {
                        path: Some(env_path),
                        loaded: true,
                    };
                }
                Err(e) => {
                    warn!("Failed to parse .env at {:?}: {}", env_path, e);
                }
            }
        }
    }

    EnvLoadResult {
        path: None,
        loaded: false,
    }
}
