//! Error taxonomy carried inside chat responses
//!
//! Provider failures never surface as Rust errors from the router. They are
//! folded into a [`ChatError`] on the returned [`ChatResponse`](super::ChatResponse),
//! identified by an [`ErrorCode`].

use serde::{Deserialize, Serialize};

/// Error code taxonomy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Credentials for the provider could not be resolved
    MissingSecret,
    /// Provider is not configured, no attempt made
    NotConfigured,
    /// Credentials rejected
    AuthError,
    /// Account quota or billing limit exhausted
    QuotaError,
    /// Upstream rate limit
    RateLimit,
    /// Upstream 5xx or overload
    ServerError,
    /// Provider call timed out
    Timeout,
    /// Connection-level failure
    NetworkError,
    /// Structured output could not be parsed
    JsonParseError,
    /// Request rejected as malformed by the provider
    InvalidRequest,
    /// Unclassified provider failure
    ProviderError,
    /// Router skipped the provider because its circuit is open
    CircuitOpen,
    /// Marker on the local answer used as the availability backstop
    FailOpen,
    /// No provider produced any response
    NoProviderAvailable,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::MissingSecret => "missing_secret",
            ErrorCode::NotConfigured => "not_configured",
            ErrorCode::AuthError => "auth_error",
            ErrorCode::QuotaError => "quota_error",
            ErrorCode::RateLimit => "rate_limit",
            ErrorCode::ServerError => "server_error",
            ErrorCode::Timeout => "timeout",
            ErrorCode::NetworkError => "network_error",
            ErrorCode::JsonParseError => "json_parse_error",
            ErrorCode::InvalidRequest => "invalid_request",
            ErrorCode::ProviderError => "provider_error",
            ErrorCode::CircuitOpen => "circuit_open",
            ErrorCode::FailOpen => "fail_open",
            ErrorCode::NoProviderAvailable => "no_provider_available",
        }
    }

    /// Codes meaning the provider cannot be used at all, so no attempt counts
    pub fn is_skip(&self) -> bool {
        matches!(self, ErrorCode::MissingSecret | ErrorCode::NotConfigured)
    }

    /// Default retry policy for the code
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCode::RateLimit
                | ErrorCode::ServerError
                | ErrorCode::Timeout
                | ErrorCode::NetworkError
        )
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error detail attached to a chat response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatError {
    /// Error code
    pub code: ErrorCode,
    /// Human readable message
    pub msg: String,
    /// Whether a retry may succeed
    pub retryable: bool,
}

impl ChatError {
    /// Create an error using the code's default retry policy
    pub fn new(code: ErrorCode, msg: impl Into<String>) -> Self {
        Self {
            code,
            msg: msg.into(),
            retryable: code.is_retryable(),
        }
    }

    pub fn with_retryable(mut self, retryable: bool) -> Self {
        self.retryable = retryable;
        self
    }
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.msg)
    }
}
