//! Routing policy configuration

use super::*;
use crate::core::router::RoutingPolicy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Baseline routing policy as written in the config file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingConfig {
    /// Policy identifier reported with each run
    #[serde(default = "default_policy_id")]
    pub policy_id: String,
    /// Provider identifiers in preference order
    #[serde(default = "default_chain")]
    pub default_chain: Vec<String>,
    /// Retries after the first attempt, per provider turn
    #[serde(default = "default_retries_max")]
    pub retries_max: u32,
    /// Delay before retry n is `backoff_ms[min(n-1, len-1)]`
    #[serde(default = "default_backoff_ms")]
    pub backoff_ms: Vec<u64>,
    /// Consecutive failures that open a provider's circuit
    #[serde(default = "default_failure_threshold")]
    pub circuit_fail_threshold: u32,
    /// How long an open circuit stays open
    #[serde(default = "default_cooldown_seconds")]
    pub circuit_cooldown_seconds: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            policy_id: default_policy_id(),
            default_chain: default_chain(),
            retries_max: default_retries_max(),
            backoff_ms: default_backoff_ms(),
            circuit_fail_threshold: default_failure_threshold(),
            circuit_cooldown_seconds: default_cooldown_seconds(),
        }
    }
}

impl RoutingConfig {
    /// Build the immutable policy the router runs with
    pub fn to_policy(&self) -> RoutingPolicy {
        RoutingPolicy {
            policy_id: self.policy_id.clone(),
            default_chain: self.default_chain.clone(),
            retries_max: self.retries_max,
            backoff_ms: self.backoff_ms.clone(),
            circuit_fail_threshold: self.circuit_fail_threshold,
            circuit_cooldown: Duration::from_secs(self.circuit_cooldown_seconds),
        }
    }
}
