//! Route implementation for Router
//!
//! This module contains `route` and the per-provider turn with retry.

use super::config::RouteOptions;
use super::execution::{
    ChainState, InFlight, RunContext, TurnOutcome, call_adapter, elapsed_ms,
};
use super::router::Router;
use super::selection::select_chain;
use crate::core::traits::{AttemptStatus, ProviderAdapter, RunStarted};
use crate::core::types::{ChatError, ChatRequest, ChatResponse, ErrorCode};
use chrono::Utc;
use std::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

impl Router {
    /// Route a request through the provider chain
    ///
    /// Always returns a response. Provider failures, open circuits, exhausted
    /// quotas, an expired deadline and sink failures are all reported inside
    /// the returned [`ChatResponse`].
    pub async fn route(&self, mut request: ChatRequest, options: RouteOptions) -> ChatResponse {
        let trace_id = request.ensure_trace_id().to_string();
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("route", trace_id = %trace_id, run_id = %run_id);

        self.route_inner(request, options, trace_id, run_id)
            .instrument(span)
            .await
    }

    /// Route with [`default_options`](Self::default_options)
    pub async fn route_with_defaults(&self, request: ChatRequest) -> ChatResponse {
        let options = self.default_options();
        self.route(request, options).await
    }

    async fn route_inner(
        &self,
        request: ChatRequest,
        options: RouteOptions,
        trace_id: String,
        run_id: String,
    ) -> ChatResponse {
        let run = RunContext {
            run_id,
            trace_id,
            started: Instant::now(),
            policy: options.policy_override.as_ref().unwrap_or(&self.policy),
            options: &options,
        };

        let reachable = self.connectivity.is_reachable();
        let chain = select_chain(
            &request,
            run.policy,
            reachable,
            options.strict_mode,
            options.tailor_chain,
            &self.settings.chain,
        );

        info!(
            policy_id = %run.policy.policy_id,
            chain = ?chain,
            reachable,
            strict_mode = options.strict_mode,
            "Routing request"
        );

        self.reporter
            .start_run(&RunStarted {
                run_id: run.run_id.clone(),
                trace_id: run.trace_id.clone(),
                policy_id: run.policy.policy_id.clone(),
                chain: chain.clone(),
                strict_mode: options.strict_mode,
                fail_open: options.allows_fail_open(),
                at: Utc::now(),
            })
            .await;

        if let Err(e) = request.validate() {
            warn!(error = %e, "Rejecting invalid request");
            let response = ChatResponse::terminal(
                ErrorCode::InvalidRequest,
                e.to_string(),
                run.trace_id.clone(),
            )
            .with_latency_ms(run.elapsed_ms());
            self.reporter.outcome(&run.outcome_record(&response)).await;
            return response;
        }

        let mut state = ChainState::default();
        let answered = match options.deadline {
            Some(deadline) => {
                let walk = self.walk_chain(&run, &request, &chain, &mut state);
                let result = tokio::time::timeout(deadline, walk).await;
                match result {
                    Ok(answered) => answered,
                    Err(_) => {
                        warn!(
                            deadline_ms = deadline.as_millis() as u64,
                            "Route deadline exceeded"
                        );
                        interrupted(&run, &mut state);
                        None
                    }
                }
            }
            None => self.walk_chain(&run, &request, &chain, &mut state).await,
        };
        self.flush_attempts(&mut state).await;

        let response = match answered {
            Some((index, response)) => {
                if options.shadow_mode {
                    self.spawn_shadow(&run, &request, &chain[index + 1..]);
                }
                response
            }
            None => self.exhausted(&run, &request, state).await,
        };

        info!(
            provider = %response.provider,
            success = response.success,
            latency_ms = response.latency_ms,
            error_code = response.error_code().map(|c| c.as_str()).unwrap_or(""),
            "Route finished"
        );
        self.reporter.outcome(&run.outcome_record(&response)).await;
        response
    }

    /// Walk the chain until a provider answers, returning its index and response
    async fn walk_chain(
        &self,
        run: &RunContext<'_>,
        request: &ChatRequest,
        chain: &[String],
        state: &mut ChainState,
    ) -> Option<(usize, ChatResponse)> {
        for (index, provider_id) in chain.iter().enumerate() {
            match self.provider_turn(run, request, provider_id, state).await {
                TurnOutcome::Answered(response) => return Some((index, response)),
                TurnOutcome::Skipped => {}
                TurnOutcome::Failed if run.options.strict_mode => {
                    debug!(provider = %provider_id, "Strict mode, not trying further providers");
                    break;
                }
                TurnOutcome::Failed => {}
            }
        }
        None
    }

    /// One provider's turn: eligibility checks, then attempts with retry
    async fn provider_turn(
        &self,
        run: &RunContext<'_>,
        request: &ChatRequest,
        provider_id: &str,
        state: &mut ChainState,
    ) -> TurnOutcome {
        let Some(adapter) = self.registry.get(provider_id) else {
            return self
                .skip(run, provider_id, AttemptStatus::NotConfigured, state, || {
                    ChatError::new(
                        ErrorCode::NotConfigured,
                        format!("provider '{}' is not registered", provider_id),
                    )
                });
        };

        if adapter.requires_configuration() && !adapter.is_configured() {
            return self
                .skip(run, provider_id, AttemptStatus::NotConfigured, state, || {
                    ChatError::new(
                        ErrorCode::NotConfigured,
                        format!("provider '{}' is not configured", provider_id),
                    )
                });
        }

        if self.circuit_breaker.is_open(provider_id) {
            return self
                .skip(run, provider_id, AttemptStatus::CircuitOpen, state, || {
                    ChatError::new(
                        ErrorCode::CircuitOpen,
                        format!("circuit open for provider '{}'", provider_id),
                    )
                });
        }

        self.attempt_with_retry(run, request, provider_id, adapter.as_ref(), state)
            .await
    }

    async fn attempt_with_retry(
        &self,
        run: &RunContext<'_>,
        request: &ChatRequest,
        provider_id: &str,
        adapter: &dyn ProviderAdapter,
        state: &mut ChainState,
    ) -> TurnOutcome {
        let model = adapter.model().to_string();
        let circuit = run.policy.circuit_settings();
        let backoff = run.policy.backoff();
        let max_attempts = run.policy.max_attempts();
        let started = Instant::now();

        let mut calls = 0;
        let mut last_error: Option<ChatError> = None;

        for attempt in 1..=max_attempts {
            if attempt > 1 && self.circuit_breaker.is_open(provider_id) {
                debug!(provider = %provider_id, attempt, "Circuit opened during turn");
                break;
            }

            if !self.admission.register_use(provider_id, &model) {
                if attempt == 1 {
                    // No call is made, so a half-open trial lease goes back
                    self.circuit_breaker.release_trial(provider_id);
                    return self.skip(run, provider_id, AttemptStatus::QuotaExceeded, state, || {
                        ChatError::new(
                            ErrorCode::QuotaError,
                            format!("admission quota exhausted for '{}/{}'", provider_id, model),
                        )
                    });
                }
                debug!(provider = %provider_id, attempt, "Quota exhausted before retry");
                break;
            }

            calls += 1;
            state.in_flight = Some(InFlight {
                provider: provider_id.to_string(),
                attempts: calls,
                started,
            });

            match call_adapter(adapter, request).await {
                Ok(response) => {
                    self.circuit_breaker.record_success(provider_id);
                    state.in_flight = None;

                    let latency_ms = elapsed_ms(started);
                    info!(provider = %provider_id, attempt, latency_ms, "Provider answered");
                    state.record(run.attempt_record(
                        provider_id,
                        AttemptStatus::Ok,
                        calls,
                        latency_ms,
                        None,
                    ));

                    return TurnOutcome::Answered(self.finalize(run, provider_id, &model, response));
                }
                Err(error) if error.code.is_skip() => {
                    state.in_flight = None;
                    self.circuit_breaker.release_trial(provider_id);
                    debug!(
                        provider = %provider_id,
                        error_code = %error.code,
                        "Adapter reported itself unusable: {}",
                        error.msg
                    );
                    return self.skip(run, provider_id, AttemptStatus::NotConfigured, state, || {
                        error
                    });
                }
                Err(error) => {
                    let failures = self.circuit_breaker.record_failure(provider_id, &circuit);
                    let retry = error.retryable && attempt < max_attempts;
                    warn!(
                        provider = %provider_id,
                        attempt,
                        failures,
                        error_code = %error.code,
                        retry,
                        "Provider attempt failed: {}",
                        error.msg
                    );
                    last_error = Some(error);

                    if !retry {
                        break;
                    }
                    let delay = backoff.delay_for(attempt);
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        state.in_flight = None;
        let error = last_error.unwrap_or_else(|| {
            ChatError::new(
                ErrorCode::CircuitOpen,
                format!("circuit open for provider '{}'", provider_id),
            )
        });
        state.record(run.attempt_record(
            provider_id,
            AttemptStatus::Failed,
            calls,
            elapsed_ms(started),
            Some(error.code),
        ));
        state.observe(error);
        TurnOutcome::Failed
    }

    fn skip<F>(
        &self,
        run: &RunContext<'_>,
        provider_id: &str,
        status: AttemptStatus,
        state: &mut ChainState,
        error: F,
    ) -> TurnOutcome
    where
        F: FnOnce() -> ChatError,
    {
        let error = error();
        info!(provider = %provider_id, status = %status, "Skipping provider");
        state.in_flight = None;
        state.record(run.attempt_record(provider_id, status, 0, 0, Some(error.code)));
        state.observe(error);
        TurnOutcome::Skipped
    }

    /// Deliver the attempt records buffered during the chain walk
    async fn flush_attempts(&self, state: &mut ChainState) {
        for record in state.records.drain(..) {
            self.reporter.attempt(&record).await;
        }
    }

    /// Stamp router-owned fields onto a provider's answer
    fn finalize(
        &self,
        run: &RunContext<'_>,
        provider_id: &str,
        model: &str,
        mut response: ChatResponse,
    ) -> ChatResponse {
        response.provider = provider_id.to_string();
        if response.model.is_none() {
            response.model = Some(model.to_string());
        }
        response.trace_id = run.trace_id.clone();
        response.latency_ms = run.elapsed_ms();
        response
    }
}

/// Record the provider turn a deadline interrupted
fn interrupted(run: &RunContext<'_>, state: &mut ChainState) {
    if let Some(in_flight) = state.in_flight.take() {
        state.record(run.attempt_record(
            &in_flight.provider,
            AttemptStatus::Failed,
            in_flight.attempts,
            elapsed_ms(in_flight.started),
            Some(ErrorCode::Timeout),
        ));
    }
    state.observe(ChatError::new(
        ErrorCode::Timeout,
        "route deadline exceeded before any provider answered",
    ));
}
