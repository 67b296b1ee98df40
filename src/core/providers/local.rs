//! Local fallback provider
//!
//! Always configured, never touches the network. Used as the last entry of a
//! chain, as the only entry when connectivity is down, and as the fail-open
//! backstop when every remote provider is unavailable.

use crate::core::traits::{ProviderAdapter, ProviderError};
use crate::core::types::{ChatRequest, ChatResponse, ResponseFormat};
use async_trait::async_trait;
use serde_json::{Map, Value, json};

/// Default identifier of the local provider
pub const LOCAL_PROVIDER: &str = "local";

const LOCAL_MODEL: &str = "local-echo";
const MAX_ECHO_CHARS: usize = 280;

/// Deterministic local responder
#[derive(Debug, Clone)]
pub struct LocalProvider {
    name: String,
}

impl LocalProvider {
    pub fn new() -> Self {
        Self::named(LOCAL_PROVIDER)
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn reply_for(request: &ChatRequest) -> String {
        let prompt = request.last_user_message().unwrap_or_default().trim();
        let mut digest: String = prompt.chars().take(MAX_ECHO_CHARS).collect();
        if prompt.chars().count() > MAX_ECHO_CHARS {
            digest.push('…');
        }
        format!(
            "Remote assistants are unavailable right now. Received: \"{}\"",
            digest
        )
    }
}

impl Default for LocalProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProviderAdapter for LocalProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        LOCAL_MODEL
    }

    fn requires_configuration(&self) -> bool {
        false
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let reply = Self::reply_for(request);

        let mut usage = Map::new();
        usage.insert("input_messages".to_string(), json!(request.messages.len()));
        usage.insert("output_chars".to_string(), json!(reply.chars().count()));

        let response = match request.response_format {
            ResponseFormat::Text => ChatResponse::text(&self.name, reply),
            ResponseFormat::Json => {
                let mut body = Map::new();
                body.insert("reply".to_string(), Value::String(reply));
                body.insert("degraded".to_string(), Value::Bool(true));
                ChatResponse::json(&self.name, body)
            }
        };

        Ok(response.with_model(LOCAL_MODEL).with_usage(usage))
    }
}
