use crate::config::ServiceConfig;
use crate::error::ProviderError;
use crate::services::CredentialProbe;
use crate::settings::{MemorySettingsStore, SettingsStore};
use crate::tests::support::{ScriptedProvider, harness, harness_with};

/// **VALUE**: Verifies short candidates are rejected without a network call.
///
/// **WHY THIS MATTERS**: Every probe costs quota; obvious junk must not spend it.
#[tokio::test]
async fn given_short_candidates_when_probe_then_false_without_call() {
    let h = harness(ScriptedProvider::new());
    let probe = CredentialProbe::new(h.context.clone());

    assert!(!probe.probe("").await);
    assert!(!probe.probe("abc").await);
    assert!(!probe.probe("   abcd   ").await);
    assert_eq!(h.provider.call_count(), 0);
}

/// **VALUE**: Verifies the probe call shape: probe model, no search, capped output.
#[tokio::test]
async fn given_candidate_when_probe_succeeds_then_true_with_minimal_request() {
    let h = harness(ScriptedProvider::new().with_text("pong"));
    let probe = CredentialProbe::new(h.context.clone());

    assert!(probe.probe("  candidate-key-123 ").await);

    let request = h.provider.last_request().unwrap();
    assert_eq!(request.model, "gemini-3-flash-preview");
    assert!(!request.web_search);
    assert_eq!(request.temperature, 0.0);
    assert_eq!(request.max_output_tokens, Some(8));
    assert_eq!(h.provider.credentials_seen(), vec!["candidate-key-123".to_string()]);
}

/// **VALUE**: Verifies every provider failure is `false`, never an error or panic.
#[tokio::test]
async fn given_provider_failure_when_probe_then_false() {
    let h = harness(
        ScriptedProvider::new()
            .with_error(ProviderError::api(400, None, Some("API_KEY_INVALID".to_string()), "bad key"))
            .with_error(ProviderError::transport("dns failure")),
    );
    let probe = CredentialProbe::new(h.context.clone());

    assert!(!probe.probe("candidate-key-123").await);
    assert!(!probe.probe("candidate-key-123").await);
}

/// **VALUE**: Verifies a candidate is persisted only after a successful probe.
///
/// **WHY THIS MATTERS**: A rejected key must never replace a working override.
///
/// **BUG THIS CATCHES**: Would catch writing the slot before the probe returns.
#[tokio::test]
async fn given_probe_results_when_probe_and_store_then_persists_only_on_success() {
    let h = harness_with(
        ScriptedProvider::new()
            .with_error(ProviderError::api(401, None, None, "unauthenticated"))
            .with_text("pong"),
        MemorySettingsStore::with_override("old-working-key"),
        None,
        ServiceConfig::default(),
    );
    let probe = CredentialProbe::new(h.context.clone());

    let rejected = probe
        .probe_and_store("bad-candidate-key", h.store.as_ref())
        .await
        .expect("no store error");
    assert!(!rejected);
    assert_eq!(h.store.user_override().unwrap().as_deref(), Some("old-working-key"));

    let accepted = probe
        .probe_and_store(" new-working-key \n", h.store.as_ref())
        .await
        .expect("no store error");
    assert!(accepted);
    assert_eq!(h.store.user_override().unwrap().as_deref(), Some("new-working-key"));
}

/// **VALUE**: Verifies clearing the override hands resolution back to the default.
#[tokio::test]
async fn given_stored_override_when_clear_override_then_default_is_used() {
    let h = harness_with(
        ScriptedProvider::new().with_text("{\"results\": []}"),
        MemorySettingsStore::with_override("override-key-999"),
        Some("ambient-key-12345"),
        ServiceConfig::default(),
    );
    let probe = CredentialProbe::new(h.context.clone());

    probe.clear_override(h.store.as_ref()).expect("clear should succeed");

    assert!(h.store.user_override().unwrap().is_none());
    let credential = h.context.credential().expect("default should resolve");
    assert_eq!(credential.expose(), "ambient-key-12345");
}
