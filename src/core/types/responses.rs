//! Chat response types

use super::errors::{ChatError, ErrorCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Provider name used on terminal responses no provider produced
pub const NO_PROVIDER: &str = "none";

/// Chat response
///
/// Always returned from routing, including on failure; failure is carried by
/// `success == false` and a populated `error`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Text answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Structured answer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<Map<String, Value>>,
    /// Provider that produced the response
    pub provider: String,
    /// Model that produced the response
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    /// Provider usage counters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Map<String, Value>>,
    /// Wall-clock latency in milliseconds
    pub latency_ms: u64,
    /// Whether the response is a successful answer
    pub success: bool,
    /// Error detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ChatError>,
    /// Trace identifier of the originating request
    pub trace_id: String,
}

impl ChatResponse {
    /// Successful text response
    pub fn text(provider: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::empty(provider, true)
        }
    }

    /// Successful structured response
    pub fn json(provider: impl Into<String>, json: Map<String, Value>) -> Self {
        Self {
            json: Some(json),
            ..Self::empty(provider, true)
        }
    }

    /// Unsuccessful response carrying an error
    pub fn failure(provider: impl Into<String>, error: ChatError) -> Self {
        Self {
            error: Some(error),
            ..Self::empty(provider, false)
        }
    }

    /// Terminal response used when no provider produced anything
    pub fn terminal(code: ErrorCode, msg: impl Into<String>, trace_id: impl Into<String>) -> Self {
        Self {
            trace_id: trace_id.into(),
            ..Self::failure(NO_PROVIDER, ChatError::new(code, msg).with_retryable(false))
        }
    }

    fn empty(provider: impl Into<String>, success: bool) -> Self {
        Self {
            text: None,
            json: None,
            provider: provider.into(),
            model: None,
            usage: None,
            latency_ms: 0,
            success,
            error: None,
            trace_id: String::new(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn with_usage(mut self, usage: Map<String, Value>) -> Self {
        self.usage = Some(usage);
        self
    }

    pub fn with_latency_ms(mut self, latency_ms: u64) -> Self {
        self.latency_ms = latency_ms;
        self
    }

    pub fn with_trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.trace_id = trace_id.into();
        self
    }

    pub fn with_error(mut self, error: ChatError) -> Self {
        self.error = Some(error);
        self
    }

    /// Error code, if any
    pub fn error_code(&self) -> Option<ErrorCode> {
        self.error.as_ref().map(|e| e.code)
    }

    /// Whether no provider produced this response
    pub fn is_terminal(&self) -> bool {
        self.provider == NO_PROVIDER
    }
}
