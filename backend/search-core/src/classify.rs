//! Single chokepoint that turns internal failures into user-facing errors.
//!
//! Order matters, first match wins:
//! 1. quota / resource exhaustion
//! 2. authentication / invalid credential
//! 3. extractor failure
//! 4. transport failure with no HTTP response
//! 5. anything else

use crate::error::{ProviderError, QueryError};

use models::{ClassifiedError, ErrorKind, Locale};

use log::warn;

const QUOTA_MARKERS: &[&str] = &["429", "resource_exhausted", "quota"];

const AUTH_MARKERS: &[&str] = &[
    "403",
    "401",
    "api_key_invalid",
    "permission_denied",
    "unauthenticated",
    "api key not valid",
];

/// Classify a failed query. The returned message never contains upstream text.
pub fn classify(error: &QueryError, locale: Locale) -> ClassifiedError {
    let kind = classify_kind(error);
    match error {
        QueryError::Provider(provider) => warn!(
            "Query failed ({}, {}): {}",
            kind,
            provider.error_category(),
            error
        ),
        _ => warn!("Query failed ({}): {}", kind, error),
    }
    ClassifiedError::new(kind, user_message(kind, locale))
}

/// The kind alone, without logging.
pub fn classify_kind(error: &QueryError) -> ErrorKind {
    match error {
        QueryError::MissingCredential { .. } => ErrorKind::Unauthenticated,
        QueryError::Provider(provider) => classify_provider(provider),
        QueryError::Extract(_) => ErrorKind::MalformedResponse,
        QueryError::Settings(_) | QueryError::InvalidInput(_) => ErrorKind::Unknown,
    }
}

fn classify_provider(error: &ProviderError) -> ErrorKind {
    let status = error.status_code();
    let text = error.marker_text().unwrap_or_default().to_lowercase();

    if status.is_some_and(|s| s.is_quota_exhausted()) || contains_any(&text, QUOTA_MARKERS) {
        return ErrorKind::QuotaExceeded;
    }

    if status.is_some_and(|s| s.is_auth_failure()) || contains_any(&text, AUTH_MARKERS) {
        return ErrorKind::Unauthenticated;
    }

    if error.is_transport() {
        return ErrorKind::Network;
    }

    ErrorKind::Unknown
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

/// Fixed, localized message for each kind.
pub fn user_message(kind: ErrorKind, locale: Locale) -> &'static str {
    match (kind, locale) {
        (ErrorKind::QuotaExceeded, Locale::Ja) => {
            "利用上限に達しました。しばらく待ってから再度お試しください。"
        }
        (ErrorKind::QuotaExceeded, Locale::En) => {
            "The usage limit was reached. Please wait a moment and try again."
        }
        (ErrorKind::Unauthenticated, Locale::Ja) => {
            "APIキーが無効か、設定されていません。APIキーの設定を開いて確認してください。"
        }
        (ErrorKind::Unauthenticated, Locale::En) => {
            "The API key is missing or invalid. Open the API key settings to update it."
        }
        (ErrorKind::MalformedResponse, Locale::Ja) => {
            "情報の解析に失敗しました。もう一度お試しください。"
        }
        (ErrorKind::MalformedResponse, Locale::En) => {
            "The response could not be read. Please try again."
        }
        (ErrorKind::Network, Locale::Ja) => {
            "ネットワークに接続できませんでした。接続を確認して再度お試しください。"
        }
        (ErrorKind::Network, Locale::En) => {
            "Could not reach the service. Check your connection and try again."
        }
        (ErrorKind::Unknown, Locale::Ja) => {
            "エラーが発生しました。しばらくしてから再度お試しください。"
        }
        (ErrorKind::Unknown, Locale::En) => "Something went wrong. Please try again later.",
    }
}
