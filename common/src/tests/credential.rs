use crate::RedactedCredential;

/// **VALUE**: Verifies the secret never appears in Debug or Display output.
///
/// **WHY THIS MATTERS**: Credentials end up inside error values and log lines
/// (`{:?}` on request structs). One leaked key in a log file is a real incident.
///
/// **BUG THIS CATCHES**: Would catch a derived Debug or a Display that prints the value.
#[test]
fn given_credential_when_formatted_then_value_is_redacted() {
    // GIVEN: A credential
    let credential = RedactedCredential::new("AIzaSySecretValue123");

    // WHEN: Formatting it both ways
    let debug = format!("{:?}", credential);
    let display = format!("{}", credential);

    // THEN: The secret is absent
    assert!(!debug.contains("AIzaSySecretValue123"));
    assert!(!display.contains("AIzaSySecretValue123"));
    assert!(debug.contains("REDACTED"));
}

/// **VALUE**: Verifies serialization always fails.
///
/// **WHY THIS MATTERS**: The settings file must only receive the override through an
/// explicit `expose()` call, never through an accidental derive.
///
/// **BUG THIS CATCHES**: Would catch if someone derives Serialize on the wrapper.
#[test]
fn given_credential_when_serialized_then_returns_error() {
    let credential = RedactedCredential::new("AIzaSySecretValue123");

    let result = serde_json::to_string(&credential);

    assert!(result.is_err());
    assert!(!result.unwrap_err().to_string().contains("AIzaSySecretValue123"));
}

/// **VALUE**: Verifies construction trims and `non_blank` rejects whitespace-only input.
///
/// **WHY THIS MATTERS**: A pasted key with a trailing newline must still authenticate,
/// and a blank override must not shadow the ambient default.
///
/// **BUG THIS CATCHES**: Would catch if trimming is removed or blank values are accepted.
#[test]
fn given_padded_or_blank_input_when_wrapping_then_trims_or_rejects() {
    let padded = RedactedCredential::new("  key-12345\n");
    assert_eq!(padded.expose(), "key-12345");
    assert_eq!(padded.len(), 9);

    assert!(RedactedCredential::non_blank("   \t").is_none());
    assert!(RedactedCredential::non_blank("").is_none());
    assert_eq!(
        RedactedCredential::non_blank(" abcde ").map(|c| c.expose().to_string()),
        Some(String::from("abcde"))
    );
}
