//! Chat request types

use super::message::ChatMessage;
use crate::utils::error::{Result, RouterError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Default sampling temperature
pub const DEFAULT_TEMPERATURE: f32 = 0.2;
/// Default output token budget
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 512;
/// Default task profile identifier
pub const DEFAULT_TASK_PROFILE: &str = "chat.default";

/// Metadata key naming the provider the caller would like tried first
pub const META_PREFERRED_PROVIDER: &str = "preferred_provider";
/// Metadata key forcing the chain down to the local provider
pub const META_ANTI_LOOP: &str = "anti_loop";

/// Requested response format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Free text
    #[default]
    Text,
    /// A JSON object
    Json,
}

/// Chat request routed across providers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Ordered, non-empty conversation
    pub messages: Vec<ChatMessage>,
    /// Response format
    #[serde(default)]
    pub response_format: ResponseFormat,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Output token budget
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
    /// Whether the caller asked for streaming
    #[serde(default)]
    pub stream: bool,
    /// Request-scoped trace identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
    /// Free-form request metadata
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Task profile identifier
    #[serde(default = "default_task_profile")]
    pub task_profile_id: String,
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_output_tokens() -> u32 {
    DEFAULT_MAX_OUTPUT_TOKENS
}

fn default_task_profile() -> String {
    DEFAULT_TASK_PROFILE.to_string()
}

impl ChatRequest {
    /// Start building a request
    pub fn builder() -> ChatRequestBuilder {
        ChatRequestBuilder::default()
    }

    /// Single user message request with defaults
    pub fn from_prompt(prompt: impl Into<String>) -> Result<Self> {
        Self::builder().message(ChatMessage::user(prompt)?).build()
    }

    /// Check the request invariants
    pub fn validate(&self) -> Result<()> {
        if self.messages.is_empty() {
            return Err(RouterError::validation("messages must not be empty"));
        }
        if self.max_output_tokens == 0 {
            return Err(RouterError::validation(
                "max_output_tokens must be greater than zero",
            ));
        }
        if !self.temperature.is_finite() || !(0.0..=2.0).contains(&self.temperature) {
            return Err(RouterError::validation(format!(
                "temperature must be within [0, 2], got {}",
                self.temperature
            )));
        }
        Ok(())
    }

    /// Assign a trace id if none is set and return it
    ///
    /// An existing id is never replaced.
    pub fn ensure_trace_id(&mut self) -> &str {
        self.trace_id
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .as_str()
    }

    /// Look up a metadata value
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.as_ref().and_then(|m| m.get(key))
    }

    /// Provider the caller asked to try first
    pub fn preferred_provider(&self) -> Option<&str> {
        self.metadata_value(META_PREFERRED_PROVIDER)
            .and_then(Value::as_str)
    }

    /// Whether the caller signalled a re-entry loop
    pub fn anti_loop(&self) -> bool {
        self.metadata_value(META_ANTI_LOOP)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Content of the most recent user message
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role() == super::message::MessageRole::User)
            .map(ChatMessage::content)
    }
}

/// Builder for [`ChatRequest`]
#[derive(Debug, Clone)]
pub struct ChatRequestBuilder {
    request: ChatRequest,
}

impl Default for ChatRequestBuilder {
    fn default() -> Self {
        Self {
            request: ChatRequest {
                messages: Vec::new(),
                response_format: ResponseFormat::default(),
                temperature: DEFAULT_TEMPERATURE,
                max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
                stream: false,
                trace_id: None,
                metadata: None,
                task_profile_id: default_task_profile(),
            },
        }
    }
}

impl ChatRequestBuilder {
    pub fn message(mut self, message: ChatMessage) -> Self {
        self.request.messages.push(message);
        self
    }

    pub fn messages(mut self, messages: impl IntoIterator<Item = ChatMessage>) -> Self {
        self.request.messages.extend(messages);
        self
    }

    pub fn response_format(mut self, format: ResponseFormat) -> Self {
        self.request.response_format = format;
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.request.temperature = temperature;
        self
    }

    pub fn max_output_tokens(mut self, tokens: u32) -> Self {
        self.request.max_output_tokens = tokens;
        self
    }

    pub fn stream(mut self, stream: bool) -> Self {
        self.request.stream = stream;
        self
    }

    pub fn trace_id(mut self, trace_id: impl Into<String>) -> Self {
        self.request.trace_id = Some(trace_id.into());
        self
    }

    pub fn metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.request
            .metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn preferred_provider(self, provider: impl Into<String>) -> Self {
        let provider: String = provider.into();
        self.metadata(META_PREFERRED_PROVIDER, provider)
    }

    pub fn task_profile_id(mut self, id: impl Into<String>) -> Self {
        self.request.task_profile_id = id.into();
        self
    }

    /// Validate and build the request
    pub fn build(self) -> Result<ChatRequest> {
        self.request.validate()?;
        Ok(self.request)
    }
}
