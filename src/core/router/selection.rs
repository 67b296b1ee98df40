//! Provider chain selection

use super::policy::RoutingPolicy;
use crate::core::types::{ChatRequest, ResponseFormat};

/// Provider identities the selector needs to know about
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSettings {
    /// Always-available local responder
    pub local_provider: String,
    /// Provider preferred for structured output
    pub structured_output_provider: Option<String>,
}

impl Default for ChainSettings {
    fn default() -> Self {
        Self {
            local_provider: crate::core::providers::LOCAL_PROVIDER.to_string(),
            structured_output_provider: None,
        }
    }
}

/// Compute the ordered list of providers to try
///
/// Rules, in order:
/// 1. Network unreachable, or the request carries the `anti_loop` flag: only
///    the local provider.
/// 2. Start from the policy's default chain.
/// 3. A `preferred_provider` present in the chain moves to the front.
/// 4. With tailoring on, a JSON request moves the structured-output provider
///    (if present in the chain) to the front.
/// 5. Strict mode keeps only the first entry.
pub fn select_chain(
    request: &ChatRequest,
    policy: &RoutingPolicy,
    reachable: bool,
    strict_mode: bool,
    tailor: bool,
    settings: &ChainSettings,
) -> Vec<String> {
    if !reachable || request.anti_loop() {
        return vec![settings.local_provider.clone()];
    }

    let mut chain = policy.default_chain.clone();

    if let Some(preferred) = request.preferred_provider() {
        move_to_front(&mut chain, preferred);
    }

    if tailor && request.response_format == ResponseFormat::Json {
        if let Some(structured) = settings.structured_output_provider.as_deref() {
            move_to_front(&mut chain, structured);
        }
    }

    if strict_mode {
        chain.truncate(1);
    }

    chain
}

fn move_to_front(chain: &mut Vec<String>, provider: &str) {
    if let Some(index) = chain.iter().position(|p| p == provider) {
        let entry = chain.remove(index);
        chain.insert(0, entry);
    }
}
