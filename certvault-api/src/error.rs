use thiserror::Error;

/// Unified error type for every CertVault API operation.
///
/// Callers only need the two-level split exposed by
/// [`is_session_expired`](Self::is_session_expired): a session-expired error must
/// send the user back to the login screen, while every other variant is a
/// generic failure local to the operation that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// HTTP 401 or an envelope with `code == 401`.
    #[error("session expired: please log in again")]
    SessionExpired,

    /// The envelope carried a business error code.
    #[error("API error {code}: {message}")]
    Api {
        /// Envelope `code` field.
        code: i64,
        /// Envelope `msg` field.
        message: String,
    },

    /// Non-success HTTP status without a usable envelope.
    #[error("HTTP {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Raw (truncated) response body.
        body: String,
    },

    /// Connection refused, DNS failure, TLS problem and similar.
    #[error("network error: {0}")]
    Network(String),

    /// The request did not complete within the client timeout.
    #[error("request timed out: {0}")]
    Timeout(String),

    /// The response body could not be decoded into the expected shape.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// The request could not be built (bad input on the caller side).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Whether this error means the session token is no longer valid.
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }

    /// Whether retrying the same call later could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout(_) => true,
            Self::Http { status, .. } => matches!(status, 502..=504),
            _ => false,
        }
    }
}

/// Library-wide result alias.
pub type Result<T> = std::result::Result<T, ApiError>;
