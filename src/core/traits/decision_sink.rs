//! Decision trace sink
//!
//! The router reports every attempted provider and the final outcome of each
//! request to a [`DecisionSink`]. Persistence is the sink's concern. The
//! router treats every call as fire-and-forget: a sink error, hang or panic
//! never changes the returned response.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::VecDeque;
use tracing::info;

/// Status of one provider attempt in a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttemptStatus {
    /// Provider answered
    Ok,
    /// Provider failed after its retries
    Failed,
    /// Provider skipped, not configured or not registered
    NotConfigured,
    /// Provider skipped, circuit open
    CircuitOpen,
    /// Provider skipped, admission quota exhausted
    QuotaExceeded,
    /// Local provider used as the availability backstop
    FailOpen,
    /// Shadow comparison call answered
    ShadowOk,
    /// Shadow comparison call failed
    ShadowFailed,
}

impl AttemptStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AttemptStatus::Ok => "ok",
            AttemptStatus::Failed => "failed",
            AttemptStatus::NotConfigured => "not_configured",
            AttemptStatus::CircuitOpen => "circuit_open",
            AttemptStatus::QuotaExceeded => "quota_exceeded",
            AttemptStatus::FailOpen => "fail_open",
            AttemptStatus::ShadowOk => "shadow_ok",
            AttemptStatus::ShadowFailed => "shadow_failed",
        }
    }
}

impl std::fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A routing run has started
#[derive(Debug, Clone, Serialize)]
pub struct RunStarted {
    pub run_id: String,
    pub trace_id: String,
    pub policy_id: String,
    pub chain: Vec<String>,
    pub strict_mode: bool,
    pub fail_open: bool,
    pub at: DateTime<Utc>,
}

/// One attempted (or skipped) provider
#[derive(Debug, Clone, Serialize)]
pub struct AttemptRecord {
    pub run_id: String,
    pub trace_id: String,
    pub provider: String,
    pub status: AttemptStatus,
    /// Network calls made for this provider turn
    pub attempts: u32,
    pub latency_ms: u64,
    pub error_code: Option<String>,
    pub at: DateTime<Utc>,
}

/// Final outcome of a run
#[derive(Debug, Clone, Serialize)]
pub struct OutcomeRecord {
    pub run_id: String,
    pub trace_id: String,
    pub provider: String,
    pub success: bool,
    pub latency_ms: u64,
    pub error_code: Option<String>,
    pub at: DateTime<Utc>,
}

/// Sink failure
#[derive(Debug, Clone, thiserror::Error)]
pub enum SinkError {
    #[error("sink unavailable: {0}")]
    Unavailable(String),
    #[error("sink rejected record: {0}")]
    Rejected(String),
}

/// Best-effort receiver of routing decisions
#[async_trait]
pub trait DecisionSink: Send + Sync {
    async fn start_run(&self, run: &RunStarted) -> Result<(), SinkError>;

    async fn notify_attempt(&self, attempt: &AttemptRecord) -> Result<(), SinkError>;

    async fn notify_outcome(&self, outcome: &OutcomeRecord) -> Result<(), SinkError>;
}

/// Sink that drops every record
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDecisionSink;

#[async_trait]
impl DecisionSink for NoopDecisionSink {
    async fn start_run(&self, _run: &RunStarted) -> Result<(), SinkError> {
        Ok(())
    }

    async fn notify_attempt(&self, _attempt: &AttemptRecord) -> Result<(), SinkError> {
        Ok(())
    }

    async fn notify_outcome(&self, _outcome: &OutcomeRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Sink that emits structured tracing events on the `route_decision` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDecisionSink;

#[async_trait]
impl DecisionSink for TracingDecisionSink {
    async fn start_run(&self, run: &RunStarted) -> Result<(), SinkError> {
        info!(
            target: "route_decision",
            run_id = %run.run_id,
            trace_id = %run.trace_id,
            policy_id = %run.policy_id,
            chain = ?run.chain,
            strict_mode = run.strict_mode,
            fail_open = run.fail_open,
            "run started"
        );
        Ok(())
    }

    async fn notify_attempt(&self, attempt: &AttemptRecord) -> Result<(), SinkError> {
        info!(
            target: "route_decision",
            run_id = %attempt.run_id,
            trace_id = %attempt.trace_id,
            provider = %attempt.provider,
            status = %attempt.status,
            attempts = attempt.attempts,
            latency_ms = attempt.latency_ms,
            error_code = attempt.error_code.as_deref().unwrap_or(""),
            "provider attempt"
        );
        Ok(())
    }

    async fn notify_outcome(&self, outcome: &OutcomeRecord) -> Result<(), SinkError> {
        info!(
            target: "route_decision",
            run_id = %outcome.run_id,
            trace_id = %outcome.trace_id,
            provider = %outcome.provider,
            success = outcome.success,
            latency_ms = outcome.latency_ms,
            error_code = outcome.error_code.as_deref().unwrap_or(""),
            "run outcome"
        );
        Ok(())
    }
}

/// Record captured by [`MemoryDecisionSink`]
#[derive(Debug, Clone)]
pub enum DecisionEvent {
    Started(RunStarted),
    Attempt(AttemptRecord),
    Outcome(OutcomeRecord),
}

/// In-memory sink keeping the most recent records
#[derive(Debug)]
pub struct MemoryDecisionSink {
    events: Mutex<VecDeque<DecisionEvent>>,
    capacity: usize,
}

impl MemoryDecisionSink {
    pub const DEFAULT_CAPACITY: usize = 1024;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Mutex::new(VecDeque::with_capacity(capacity.min(Self::DEFAULT_CAPACITY))),
            capacity: capacity.max(1),
        }
    }

    fn push(&self, event: DecisionEvent) {
        let mut events = self.events.lock();
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// All captured events, oldest first
    pub fn events(&self) -> Vec<DecisionEvent> {
        self.events.lock().iter().cloned().collect()
    }

    /// Attempt records for a run, in order
    pub fn attempts(&self, run_or_trace_id: &str) -> Vec<AttemptRecord> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                DecisionEvent::Attempt(a)
                    if a.run_id == run_or_trace_id || a.trace_id == run_or_trace_id =>
                {
                    Some(a.clone())
                }
                _ => None,
            })
            .collect()
    }

    /// Outcome records, in order
    pub fn outcomes(&self) -> Vec<OutcomeRecord> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                DecisionEvent::Outcome(o) => Some(o.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl Default for MemoryDecisionSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DecisionSink for MemoryDecisionSink {
    async fn start_run(&self, run: &RunStarted) -> Result<(), SinkError> {
        self.push(DecisionEvent::Started(run.clone()));
        Ok(())
    }

    async fn notify_attempt(&self, attempt: &AttemptRecord) -> Result<(), SinkError> {
        self.push(DecisionEvent::Attempt(attempt.clone()));
        Ok(())
    }

    async fn notify_outcome(&self, outcome: &OutcomeRecord) -> Result<(), SinkError> {
        self.push(DecisionEvent::Outcome(outcome.clone()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(run_id: &str, provider: &str, status: AttemptStatus) -> AttemptRecord {
        AttemptRecord {
            run_id: run_id.to_string(),
            trace_id: format!("trace-{}", run_id),
            provider: provider.to_string(),
            status,
            attempts: 1,
            latency_ms: 3,
            error_code: None,
            at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_memory_sink_filters_by_run() {
        let sink = MemoryDecisionSink::new();
        sink.notify_attempt(&attempt("r1", "a", AttemptStatus::Failed)).await.unwrap();
        sink.notify_attempt(&attempt("r2", "a", AttemptStatus::Ok)).await.unwrap();
        sink.notify_attempt(&attempt("r1", "b", AttemptStatus::Ok)).await.unwrap();

        let r1 = sink.attempts("r1");
        assert_eq!(r1.len(), 2);
        assert_eq!(r1[0].provider, "a");
        assert_eq!(r1[1].provider, "b");

        assert_eq!(sink.attempts("trace-r2").len(), 1);
    }

    #[tokio::test]
    async fn test_memory_sink_is_bounded() {
        let sink = MemoryDecisionSink::with_capacity(2);
        for provider in ["a", "b", "c"] {
            sink.notify_attempt(&attempt("r", provider, AttemptStatus::Ok)).await.unwrap();
        }

        let attempts = sink.attempts("r");
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].provider, "b");
    }

    #[tokio::test]
    async fn test_noop_and_tracing_sinks_accept_records() {
        let record = attempt("r", "a", AttemptStatus::CircuitOpen);
        assert!(NoopDecisionSink.notify_attempt(&record).await.is_ok());
        assert!(TracingDecisionSink.notify_attempt(&record).await.is_ok());
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&AttemptStatus::QuotaExceeded).unwrap();
        assert_eq!(json, "\"quota_exceeded\"");
        assert_eq!(AttemptStatus::ShadowFailed.to_string(), "shadow_failed");
    }
}
