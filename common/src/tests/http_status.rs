use crate::HttpStatusCode;

/// **VALUE**: Verifies quota and auth status classification.
///
/// **WHY THIS MATTERS**: The error classifier trusts these helpers before it looks at
/// message text. A wrong answer shows the user the wrong remediation.
///
/// **BUG THIS CATCHES**: Would catch range/constant mistakes (e.g. 429 treated as auth).
#[test]
fn given_status_codes_when_classified_then_quota_and_auth_are_distinct() {
    assert!(HttpStatusCode(429).is_quota_exhausted());
    assert!(!HttpStatusCode(429).is_auth_failure());

    assert!(HttpStatusCode(401).is_auth_failure());
    assert!(HttpStatusCode(403).is_auth_failure());
    assert!(!HttpStatusCode(400).is_auth_failure());

    assert!(HttpStatusCode(404).is_client_error());
    assert!(HttpStatusCode(503).is_server_error());
    assert!(!HttpStatusCode(200).is_client_error());
}
