//! Best-effort delivery of routing decisions
//!
//! Every sink call is bounded by a timeout and shielded from panics. Failures
//! are logged at debug level and otherwise ignored.

use crate::core::traits::{AttemptRecord, DecisionSink, OutcomeRecord, RunStarted, SinkError};
use futures::FutureExt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Wraps a [`DecisionSink`] so routing never depends on it
#[derive(Clone)]
pub struct DecisionReporter {
    sink: Arc<dyn DecisionSink>,
    timeout: Duration,
}

impl DecisionReporter {
    pub fn new(sink: Arc<dyn DecisionSink>, timeout: Duration) -> Self {
        Self { sink, timeout }
    }

    pub async fn start_run(&self, run: &RunStarted) {
        self.dispatch("start_run", &run.trace_id, self.sink.start_run(run))
            .await;
    }

    pub async fn attempt(&self, attempt: &AttemptRecord) {
        self.dispatch("notify_attempt", &attempt.trace_id, self.sink.notify_attempt(attempt))
            .await;
    }

    pub async fn outcome(&self, outcome: &OutcomeRecord) {
        self.dispatch("notify_outcome", &outcome.trace_id, self.sink.notify_outcome(outcome))
            .await;
    }

    async fn dispatch<F>(&self, operation: &'static str, trace_id: &str, call: F)
    where
        F: Future<Output = Result<(), SinkError>>,
    {
        let guarded = AssertUnwindSafe(call).catch_unwind();
        match tokio::time::timeout(self.timeout, guarded).await {
            Ok(Ok(Ok(()))) => {}
            Ok(Ok(Err(e))) => {
                debug!(operation, trace_id, error = %e, "Decision sink call failed");
            }
            Ok(Err(_)) => {
                debug!(operation, trace_id, "Decision sink call panicked");
            }
            Err(_) => {
                debug!(
                    operation,
                    trace_id,
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Decision sink call timed out"
                );
            }
        }
    }
}

impl std::fmt::Debug for DecisionReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionReporter")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
