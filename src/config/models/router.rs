//! Router behaviour configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Per-call defaults and collaborator settings for the router
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Try only the first provider of the chain and never fail open
    #[serde(default)]
    pub strict_mode: bool,
    /// Answer from the local provider when the chain is exhausted
    #[serde(default = "default_true")]
    pub fail_open: bool,
    /// Identifier of the always-available local provider
    #[serde(default = "default_local_provider")]
    pub local_provider: String,
    /// Provider moved to the front for structured output requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_output_provider: Option<String>,
    /// Upper bound on each decision sink call
    #[serde(default = "default_sink_timeout_ms")]
    pub sink_timeout_ms: u64,
    /// Default deadline for a whole route call
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_timeout_ms: Option<u64>,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            strict_mode: false,
            fail_open: true,
            local_provider: default_local_provider(),
            structured_output_provider: None,
            sink_timeout_ms: default_sink_timeout_ms(),
            route_timeout_ms: None,
        }
    }
}
