//! Error recovery and resilience utilities
//!
//! This module provides the per-provider circuit breaker and the backoff
//! schedule used between retry attempts.

mod circuit_breaker;
mod retry;
mod types;

pub use circuit_breaker::CircuitBreaker;
pub use retry::BackoffSchedule;
pub use types::{CircuitSettings, CircuitSnapshot, CircuitState};

#[cfg(test)]
mod tests;
