//! Chain exhaustion handling
//!
//! When no provider answered, the router either serves the local provider
//! as a degraded answer (fail-open) or returns a terminal response carrying
//! the last observed error code.

use super::execution::{ChainState, RunContext, elapsed_ms, invoke_adapter};
use super::router::Router;
use crate::core::traits::AttemptStatus;
use crate::core::types::{ChatError, ChatRequest, ChatResponse, ErrorCode, NO_PROVIDER};
use std::time::Instant;
use tracing::{info, warn};

impl Router {
    /// Build the response for a chain that produced no answer
    pub(crate) async fn exhausted(
        &self,
        run: &RunContext<'_>,
        request: &ChatRequest,
        state: ChainState,
    ) -> ChatResponse {
        let last_error = state.last_error;

        if run.options.allows_fail_open() {
            if let Some(response) = self.fail_open(run, request, last_error.as_ref()).await {
                return response;
            }
        }

        terminal_response(run, last_error)
    }

    /// Answer from the local provider, tagged as a fail-open response
    ///
    /// Circuit and admission state are bypassed. The local answer is served
    /// with whatever `success` flag it carries. Returns `None` if the local
    /// provider is missing, errors or panics.
    async fn fail_open(
        &self,
        run: &RunContext<'_>,
        request: &ChatRequest,
        cause: Option<&ChatError>,
    ) -> Option<ChatResponse> {
        let local_id = self.settings.local_provider();
        let Some(local) = self.registry.get(local_id) else {
            warn!(provider = %local_id, "Fail-open requested but local provider is not registered");
            return None;
        };

        let started = Instant::now();
        let result = invoke_adapter(local.as_ref(), request).await;
        let latency_ms = elapsed_ms(started);

        match result {
            Ok(response) => {
                info!(
                    provider = %local_id,
                    latency_ms,
                    success = response.success,
                    "Serving fail-open response"
                );
                self.reporter
                    .attempt(&run.attempt_record(
                        local_id,
                        AttemptStatus::FailOpen,
                        1,
                        latency_ms,
                        None,
                    ))
                    .await;

                let reason = match cause {
                    Some(error) => format!("no remote provider answered (last error: {})", error),
                    None => "no remote provider answered".to_string(),
                };
                let mut response = response
                    .with_trace_id(run.trace_id.clone())
                    .with_latency_ms(run.elapsed_ms())
                    .with_error(ChatError::new(ErrorCode::FailOpen, reason).with_retryable(false));
                response.provider = local_id.to_string();
                Some(response)
            }
            Err(error) => {
                warn!(
                    provider = %local_id,
                    error_code = %error.code,
                    "Fail-open attempt failed: {}",
                    error.msg
                );
                self.reporter
                    .attempt(&run.attempt_record(
                        local_id,
                        AttemptStatus::FailOpen,
                        1,
                        latency_ms,
                        Some(error.code),
                    ))
                    .await;
                None
            }
        }
    }
}

/// Terminal response carrying the last observed error, or
/// `no_provider_available` when nothing was observed
fn terminal_response(run: &RunContext<'_>, last_error: Option<ChatError>) -> ChatResponse {
    let response = match last_error {
        Some(error) => ChatResponse::failure(NO_PROVIDER, error),
        None => ChatResponse::terminal(
            ErrorCode::NoProviderAvailable,
            "no provider available",
            run.trace_id.clone(),
        ),
    };

    response
        .with_trace_id(run.trace_id.clone())
        .with_latency_ms(run.elapsed_ms())
}
