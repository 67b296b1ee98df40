//! Backoff schedule between retry attempts

use std::time::Duration;

/// Fixed backoff schedule
///
/// The delay after failed attempt `n` (1-based) is `delays[min(n-1, len-1)]`,
/// so the last entry repeats once the schedule runs out. An empty schedule
/// retries immediately.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackoffSchedule {
    delays: Vec<Duration>,
}

impl BackoffSchedule {
    /// Create a schedule from millisecond delays
    pub fn from_millis(delays_ms: &[u64]) -> Self {
        Self {
            delays: delays_ms.iter().copied().map(Duration::from_millis).collect(),
        }
    }

    /// Delay to wait after the given failed attempt
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if self.delays.is_empty() {
            return Duration::ZERO;
        }
        let index = (attempt.max(1) as usize - 1).min(self.delays.len() - 1);
        self.delays[index]
    }

    /// Total attempts allowed for a provider turn
    pub fn max_attempts(retries_max: u32) -> u32 {
        retries_max.saturating_add(1)
    }

    pub fn is_empty(&self) -> bool {
        self.delays.is_empty()
    }
}
