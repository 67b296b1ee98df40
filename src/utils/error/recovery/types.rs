//! Types and configurations for error recovery patterns

use serde::Serialize;
use std::time::Duration;

/// Circuit breaker state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CircuitState {
    /// Circuit is closed, requests flow normally
    Closed,
    /// Circuit is open, requests are skipped without a network call
    Open,
    /// Cooldown elapsed, a single probe request may go through
    HalfOpen,
}

impl std::fmt::Display for CircuitState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CircuitState::Closed => write!(f, "closed"),
            CircuitState::Open => write!(f, "open"),
            CircuitState::HalfOpen => write!(f, "half_open"),
        }
    }
}

/// Thresholds applied when recording a failure
///
/// Taken from the routing policy in effect for the call, so a per-call policy
/// override also overrides the breaker thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CircuitSettings {
    /// Consecutive failures that open the circuit
    pub failure_threshold: u32,
    /// How long the circuit stays open
    pub cooldown: Duration,
}

impl CircuitSettings {
    pub fn new(failure_threshold: u32, cooldown: Duration) -> Self {
        Self {
            failure_threshold: failure_threshold.max(1),
            cooldown,
        }
    }
}

impl Default for CircuitSettings {
    fn default() -> Self {
        Self::new(5, Duration::from_secs(30))
    }
}

/// Point-in-time view of one provider's circuit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircuitSnapshot {
    /// Provider identifier
    pub provider: String,
    /// Consecutive failures recorded
    pub failures: u32,
    /// Current state
    pub state: CircuitState,
    /// Time left before a probe is allowed, when open
    #[serde(skip)]
    pub remaining_cooldown: Option<Duration>,
}
