//! Routing policy

use crate::config::RoutingConfig;
use crate::utils::error::recovery::{BackoffSchedule, CircuitSettings};
use std::time::Duration;

/// Immutable routing policy
///
/// The router holds one baseline policy built at startup. A per-call
/// override replaces it for that call only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPolicy {
    pub policy_id: String,
    /// Provider identifiers in preference order
    pub default_chain: Vec<String>,
    /// Retries after the first attempt, per provider turn
    pub retries_max: u32,
    pub backoff_ms: Vec<u64>,
    pub circuit_fail_threshold: u32,
    pub circuit_cooldown: Duration,
}

impl RoutingPolicy {
    /// Policy with the given chain and default tuning
    pub fn with_chain<I, S>(chain: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            default_chain: chain.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn with_policy_id(mut self, policy_id: impl Into<String>) -> Self {
        self.policy_id = policy_id.into();
        self
    }

    pub fn with_retries(mut self, retries_max: u32, backoff_ms: Vec<u64>) -> Self {
        self.retries_max = retries_max;
        self.backoff_ms = backoff_ms;
        self
    }

    pub fn with_circuit(mut self, fail_threshold: u32, cooldown: Duration) -> Self {
        self.circuit_fail_threshold = fail_threshold;
        self.circuit_cooldown = cooldown;
        self
    }

    pub fn circuit_settings(&self) -> CircuitSettings {
        CircuitSettings::new(self.circuit_fail_threshold, self.circuit_cooldown)
    }

    pub fn backoff(&self) -> BackoffSchedule {
        BackoffSchedule::from_millis(&self.backoff_ms)
    }

    /// Attempts allowed for one provider turn
    pub fn max_attempts(&self) -> u32 {
        BackoffSchedule::max_attempts(self.retries_max)
    }
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        RoutingConfig::default().to_policy()
    }
}

impl From<&RoutingConfig> for RoutingPolicy {
    fn from(config: &RoutingConfig) -> Self {
        config.to_policy()
    }
}
