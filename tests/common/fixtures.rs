//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.

use provider_router::{ChatMessage, ChatRequest, Config, ResponseFormat, RoutingPolicy};
use std::time::Duration;

/// Factory for creating chat requests
pub struct ChatRequestFactory;

impl ChatRequestFactory {
    /// Single user message
    pub fn simple() -> ChatRequest {
        ChatRequest::from_prompt("Hello, how are you?").unwrap()
    }

    /// Request asking for a JSON object
    pub fn structured() -> ChatRequest {
        ChatRequest::builder()
            .message(ChatMessage::system("Reply with JSON").unwrap())
            .message(ChatMessage::user("List three colours").unwrap())
            .response_format(ResponseFormat::Json)
            .build()
            .unwrap()
    }

    /// Request carrying a caller-chosen trace id
    pub fn traced(trace_id: &str) -> ChatRequest {
        ChatRequest::builder()
            .message(ChatMessage::user("ping").unwrap())
            .trace_id(trace_id)
            .build()
            .unwrap()
    }
}

/// Factory for policies and configuration
pub struct ConfigFactory;

impl ConfigFactory {
    /// Policy over `chain` with one retry, no backoff delays and a threshold of 3
    pub fn fast_policy(chain: &[&str]) -> RoutingPolicy {
        RoutingPolicy::with_chain(chain.iter().copied())
            .with_retries(1, Vec::new())
            .with_circuit(3, Duration::from_secs(30))
    }

    /// Complete YAML document exercising every section
    pub fn yaml() -> &'static str {
        r#"
routing:
  policy_id: integration
  default_chain: [primary, secondary, local]
  retries_max: 2
  backoff_ms: [10, 20]
  circuit_fail_threshold: 3
  circuit_cooldown_seconds: 5
router:
  strict_mode: false
  fail_open: true
  local_provider: local
  sink_timeout_ms: 100
  route_timeout_ms: 2000
quotas:
  - provider: primary
    model: primary-model
    max_calls: 2
    window_seconds: 60
logging:
  level: debug
  format: json
"#
    }

    /// Parsed and validated [`yaml`](Self::yaml)
    pub fn config() -> Config {
        let config = Config::from_yaml_str(Self::yaml()).unwrap();
        config.validate().unwrap();
        config
    }
}
