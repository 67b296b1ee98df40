//! Shadow comparison calls
//!
//! After a successful answer the next eligible provider in the chain can be
//! called once in the background. Its result only reaches the decision sink.

use super::execution::{RunContext, call_adapter, elapsed_ms};
use super::router::Router;
use crate::core::traits::AttemptStatus;
use crate::core::types::ChatRequest;
use crate::utils::error::recovery::CircuitState;
use std::time::Instant;
use tracing::{Instrument, debug, info_span};

impl Router {
    /// Spawn a detached shadow call to the first eligible provider in `rest`
    ///
    /// Eligible means registered, configured and with a closed circuit. The
    /// call bypasses admission and never touches circuit state.
    pub(crate) fn spawn_shadow(&self, run: &RunContext<'_>, request: &ChatRequest, rest: &[String]) {
        let Some((provider_id, adapter)) = rest.iter().find_map(|id| {
            let adapter = self.registry.get(id)?;
            let configured = !adapter.requires_configuration() || adapter.is_configured();
            let closed = self.circuit_breaker.state(id) == CircuitState::Closed;
            (configured && closed).then(|| (id.clone(), adapter))
        }) else {
            debug!("No eligible provider for shadow call");
            return;
        };

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("No runtime available for shadow call");
            return;
        };

        let reporter = self.reporter.clone();
        let request = request.clone();
        let record = run.attempt_record(&provider_id, AttemptStatus::ShadowOk, 1, 0, None);
        let span = info_span!("shadow", trace_id = %run.trace_id, provider = %provider_id);

        handle.spawn(
            async move {
                let started = Instant::now();
                let result = call_adapter(adapter.as_ref(), &request).await;

                let mut record = record;
                record.latency_ms = elapsed_ms(started);
                if let Err(error) = result {
                    debug!(error_code = %error.code, "Shadow call failed: {}", error.msg);
                    record.status = AttemptStatus::ShadowFailed;
                    record.error_code = Some(error.code.as_str().to_string());
                }
                reporter.attempt(&record).await;
            }
            .instrument(span),
        );
    }
}
