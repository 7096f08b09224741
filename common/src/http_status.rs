//! HTTP status code helpers for classifying provider failures.

/// Status code returned by the model provider.
///
/// Stored directly on provider errors rather than parsed back out of messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpStatusCode(pub u16);

impl HttpStatusCode {
    pub const TOO_MANY_REQUESTS: HttpStatusCode = HttpStatusCode(429);
    pub const UNAUTHORIZED: HttpStatusCode = HttpStatusCode(401);
    pub const FORBIDDEN: HttpStatusCode = HttpStatusCode(403);

    /// 4xx client errors.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.0)
    }

    /// 5xx server errors.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.0)
    }

    /// Rate limit or exhausted quota.
    pub fn is_quota_exhausted(&self) -> bool {
        *self == Self::TOO_MANY_REQUESTS
    }

    /// Missing, invalid or unauthorised credential.
    ///
    /// Gemini reports a malformed key as 400 with an `API_KEY_INVALID` reason,
    /// so callers still need to look at the error body for that case.
    pub fn is_auth_failure(&self) -> bool {
        matches!(*self, Self::UNAUTHORIZED | Self::FORBIDDEN)
    }
}

impl From<u16> for HttpStatusCode {
    fn from(code: u16) -> Self {
        HttpStatusCode(code)
    }
}

impl std::fmt::Display for HttpStatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
