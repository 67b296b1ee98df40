//! Provider adapter interface
//!
//! Defines the narrow interface the router consumes from provider adapters.
//! Adapters own request formatting, the network call and error mapping; the
//! router only sees [`ChatResponse`] or a typed [`ProviderError`].
//!
//! # Example
//!
//! ```rust
//! use async_trait::async_trait;
//! use provider_router::core::traits::{ProviderAdapter, ProviderError};
//! use provider_router::core::types::{ChatRequest, ChatResponse};
//!
//! struct Echo;
//!
//! #[async_trait]
//! impl ProviderAdapter for Echo {
//!     fn name(&self) -> &str {
//!         "echo"
//!     }
//!
//!     fn is_configured(&self) -> bool {
//!         true
//!     }
//!
//!     async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
//!         let text = request.last_user_message().unwrap_or_default();
//!         Ok(ChatResponse::text(self.name(), text))
//!     }
//! }
//! ```

use crate::core::types::{ChatError, ChatRequest, ChatResponse, ErrorCode};
use async_trait::async_trait;

/// Model key used for admission control when an adapter does not name one
pub const DEFAULT_MODEL: &str = "default";

/// Interface implemented by every backend responder
#[async_trait]
pub trait ProviderAdapter: Send + Sync {
    /// Provider identifier
    fn name(&self) -> &str;

    /// Model this adapter calls, used as the quota key
    fn model(&self) -> &str {
        DEFAULT_MODEL
    }

    /// Whether the provider must report `is_configured` before being tried
    ///
    /// Local responders that need no credentials return `false`.
    fn requires_configuration(&self) -> bool {
        true
    }

    /// Non-blocking capability check (credentials present, endpoint known)
    fn is_configured(&self) -> bool;

    /// Perform one chat call
    ///
    /// Provider-level timeouts are the adapter's responsibility and must be
    /// reported as [`ProviderError::Timeout`].
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError>;
}

/// Typed provider failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Missing secret for {provider}: {message}")]
    MissingSecret { provider: String, message: String },

    #[error("Provider {provider} is not configured: {message}")]
    NotConfigured { provider: String, message: String },

    #[error("Authentication failed for {provider}: {message}")]
    Authentication { provider: String, message: String },

    #[error("Quota exceeded for {provider}: {message}")]
    QuotaExceeded { provider: String, message: String },

    #[error("Rate limit exceeded for {provider}: {message}")]
    RateLimit {
        provider: String,
        message: String,
        /// Seconds the provider asked us to wait
        retry_after: Option<u64>,
    },

    #[error("Server error from {provider}: {message}")]
    Server {
        provider: String,
        status: Option<u16>,
        message: String,
    },

    #[error("Timeout for {provider}: {message}")]
    Timeout { provider: String, message: String },

    #[error("Network error for {provider}: {message}")]
    Network { provider: String, message: String },

    #[error("Malformed structured output from {provider}: {message}")]
    JsonParse { provider: String, message: String },

    #[error("Invalid request for {provider}: {message}")]
    InvalidRequest { provider: String, message: String },

    #[error("{provider} error: {message}")]
    Other { provider: String, message: String },
}

impl ProviderError {
    pub fn missing_secret(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MissingSecret {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn not_configured(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NotConfigured {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn authentication(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Authentication {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn quota_exceeded(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::QuotaExceeded {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn rate_limit(provider: impl Into<String>, retry_after: Option<u64>) -> Self {
        Self::RateLimit {
            provider: provider.into(),
            message: match retry_after {
                Some(secs) => format!("retry after {}s", secs),
                None => "too many requests".to_string(),
            },
            retry_after,
        }
    }

    pub fn server(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Server {
            provider: provider.into(),
            status: None,
            message: message.into(),
        }
    }

    pub fn timeout(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Timeout {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn network(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Network {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn json_parse(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::JsonParse {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn invalid_request(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            provider: provider.into(),
            message: message.into(),
        }
    }

    pub fn other(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Other {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Map an HTTP status from an upstream service onto the taxonomy
    pub fn from_http_status(
        provider: impl Into<String>,
        status: u16,
        message: Option<String>,
    ) -> Self {
        let provider = provider.into();
        let message = message.unwrap_or_else(|| format!("HTTP error {}", status));

        match status {
            400 | 404 | 413 | 422 => Self::InvalidRequest { provider, message },
            401 | 403 => Self::Authentication { provider, message },
            402 => Self::QuotaExceeded { provider, message },
            408 | 504 => Self::Timeout { provider, message },
            429 => Self::RateLimit {
                provider,
                message,
                retry_after: None,
            },
            500..=599 => Self::Server {
                provider,
                status: Some(status),
                message,
            },
            _ => Self::Other { provider, message },
        }
    }

    /// Taxonomy code for this failure
    pub fn code(&self) -> ErrorCode {
        match self {
            ProviderError::MissingSecret { .. } => ErrorCode::MissingSecret,
            ProviderError::NotConfigured { .. } => ErrorCode::NotConfigured,
            ProviderError::Authentication { .. } => ErrorCode::AuthError,
            ProviderError::QuotaExceeded { .. } => ErrorCode::QuotaError,
            ProviderError::RateLimit { .. } => ErrorCode::RateLimit,
            ProviderError::Server { .. } => ErrorCode::ServerError,
            ProviderError::Timeout { .. } => ErrorCode::Timeout,
            ProviderError::Network { .. } => ErrorCode::NetworkError,
            ProviderError::JsonParse { .. } => ErrorCode::JsonParseError,
            ProviderError::InvalidRequest { .. } => ErrorCode::InvalidRequest,
            ProviderError::Other { .. } => ErrorCode::ProviderError,
        }
    }

    /// Whether the router may retry the same provider
    pub fn is_retryable(&self) -> bool {
        self.code().is_retryable()
    }

    /// Provider that raised the error
    pub fn provider(&self) -> &str {
        match self {
            ProviderError::MissingSecret { provider, .. }
            | ProviderError::NotConfigured { provider, .. }
            | ProviderError::Authentication { provider, .. }
            | ProviderError::QuotaExceeded { provider, .. }
            | ProviderError::RateLimit { provider, .. }
            | ProviderError::Server { provider, .. }
            | ProviderError::Timeout { provider, .. }
            | ProviderError::Network { provider, .. }
            | ProviderError::JsonParse { provider, .. }
            | ProviderError::InvalidRequest { provider, .. }
            | ProviderError::Other { provider, .. } => provider,
        }
    }
}

impl From<&ProviderError> for ChatError {
    fn from(err: &ProviderError) -> Self {
        ChatError {
            code: err.code(),
            msg: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

impl From<ProviderError> for ChatError {
    fn from(err: ProviderError) -> Self {
        ChatError::from(&err)
    }
}
