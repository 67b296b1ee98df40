//! Per-provider circuit breaker for fault isolation

use super::types::{CircuitSettings, CircuitSnapshot, CircuitState};
use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Circuit state for a single provider
#[derive(Debug, Clone, Default)]
struct CircuitEntry {
    /// Consecutive failures since the last success
    failures: u32,
    /// End of the current cooldown, set once the threshold is reached
    open_until: Option<Instant>,
    /// When the in-flight half-open probe was handed out
    probe_started: Option<Instant>,
    /// Cooldown the circuit was last armed with (also the probe lease)
    cooldown: Duration,
}

impl CircuitEntry {
    fn state_at(&self, now: Instant) -> CircuitState {
        match self.open_until {
            None => CircuitState::Closed,
            Some(until) if now < until => CircuitState::Open,
            Some(_) => CircuitState::HalfOpen,
        }
    }
}

/// Circuit breaker keyed by provider identifier
///
/// Entries are created lazily on the first recorded failure and live as long
/// as the breaker. Every operation on a key runs under that key's DashMap
/// shard lock, so check-and-update sequences are atomic per provider.
#[derive(Debug, Default)]
pub struct CircuitBreaker {
    entries: DashMap<String, CircuitEntry>,
}

impl CircuitBreaker {
    /// Create a new circuit breaker with no tracked providers
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether attempts against `provider` must be skipped
    ///
    /// Once the cooldown has elapsed this returns `false` for exactly one
    /// caller, which becomes the half-open probe. Other callers keep seeing
    /// the circuit as open until the probe is resolved through
    /// [`record_success`](Self::record_success) or
    /// [`record_failure`](Self::record_failure), or until the probe lease
    /// (one cooldown) runs out.
    pub fn is_open(&self, provider: &str) -> bool {
        let Some(mut entry) = self.entries.get_mut(provider) else {
            return false;
        };
        let now = Instant::now();

        match entry.state_at(now) {
            CircuitState::Closed => false,
            CircuitState::Open => true,
            CircuitState::HalfOpen => match entry.probe_started {
                Some(started) if now.duration_since(started) < entry.cooldown => true,
                _ => {
                    debug!(
                        provider = provider,
                        failures = entry.failures,
                        "Circuit cooldown elapsed, allowing probe"
                    );
                    entry.probe_started = Some(now);
                    false
                }
            },
        }
    }

    /// Hand back a half-open trial lease that was taken but never used
    ///
    /// The circuit stays half-open and the next caller of
    /// [`is_open`](Self::is_open) gets the trial. No-op in any other state.
    pub fn release_trial(&self, provider: &str) {
        let Some(mut entry) = self.entries.get_mut(provider) else {
            return;
        };
        if entry.state_at(Instant::now()) == CircuitState::HalfOpen
            && entry.probe_started.take().is_some()
        {
            debug!(provider = provider, "Circuit trial lease released unused");
        }
    }

    /// Record a failed attempt, returning the new failure count
    ///
    /// Reaching the threshold (or failing a probe, which is already past it)
    /// arms a fresh cooldown starting now.
    pub fn record_failure(&self, provider: &str, settings: &CircuitSettings) -> u32 {
        let mut entry = self.entries.entry(provider.to_string()).or_default();
        let now = Instant::now();
        let was_closed = entry.open_until.is_none();

        entry.failures = entry.failures.saturating_add(1);
        entry.probe_started = None;
        entry.cooldown = settings.cooldown;

        if entry.failures >= settings.failure_threshold {
            entry.open_until = Some(now + settings.cooldown);
            if was_closed {
                warn!(
                    provider = provider,
                    failures = entry.failures,
                    cooldown_ms = settings.cooldown.as_millis() as u64,
                    "Circuit opened"
                );
            } else {
                debug!(
                    provider = provider,
                    failures = entry.failures,
                    "Circuit probe failed, cooldown re-armed"
                );
            }
        }

        entry.failures
    }

    /// Record a successful attempt, closing the circuit
    pub fn record_success(&self, provider: &str) {
        if let Some(mut entry) = self.entries.get_mut(provider) {
            if entry.open_until.is_some() {
                debug!(provider = provider, "Circuit closed after successful probe");
            }
            entry.failures = 0;
            entry.open_until = None;
            entry.probe_started = None;
        }
    }

    /// Consecutive failures currently recorded for `provider`
    pub fn failures(&self, provider: &str) -> u32 {
        self.entries
            .get(provider)
            .map(|entry| entry.failures)
            .unwrap_or(0)
    }

    /// Current state without taking a probe lease
    pub fn state(&self, provider: &str) -> CircuitState {
        self.entries
            .get(provider)
            .map(|entry| entry.state_at(Instant::now()))
            .unwrap_or(CircuitState::Closed)
    }

    /// Snapshot of every tracked provider, sorted by identifier
    pub fn snapshot(&self) -> Vec<CircuitSnapshot> {
        let now = Instant::now();
        let mut snapshots: Vec<CircuitSnapshot> = self
            .entries
            .iter()
            .map(|entry| CircuitSnapshot {
                provider: entry.key().clone(),
                failures: entry.failures,
                state: entry.state_at(now),
                remaining_cooldown: entry
                    .open_until
                    .and_then(|until| until.checked_duration_since(now))
                    .filter(|remaining| !remaining.is_zero()),
            })
            .collect();
        snapshots.sort_by(|a, b| a.provider.cmp(&b.provider));
        snapshots
    }

    /// Forget all state for `provider`
    pub fn reset(&self, provider: &str) {
        self.entries.remove(provider);
        debug!(provider = provider, "Circuit reset");
    }

    /// Forget all state
    pub fn reset_all(&self) {
        self.entries.clear();
    }
}
