//! Execution helpers shared by the route flow

use super::config::RouteOptions;
use super::policy::RoutingPolicy;
use crate::core::traits::{AttemptRecord, AttemptStatus, OutcomeRecord, ProviderAdapter};
use crate::core::types::{ChatError, ChatRequest, ChatResponse, ErrorCode};
use chrono::Utc;
use futures::FutureExt;
use std::panic::AssertUnwindSafe;
use std::time::Instant;

/// Identity and settings of one route call
pub(crate) struct RunContext<'a> {
    pub run_id: String,
    pub trace_id: String,
    pub started: Instant,
    pub policy: &'a RoutingPolicy,
    pub options: &'a RouteOptions,
}

impl RunContext<'_> {
    pub fn attempt_record(
        &self,
        provider: &str,
        status: AttemptStatus,
        attempts: u32,
        latency_ms: u64,
        error_code: Option<ErrorCode>,
    ) -> AttemptRecord {
        AttemptRecord {
            run_id: self.run_id.clone(),
            trace_id: self.trace_id.clone(),
            provider: provider.to_string(),
            status,
            attempts,
            latency_ms,
            error_code: error_code.map(|code| code.as_str().to_string()),
            at: Utc::now(),
        }
    }

    pub fn outcome_record(&self, response: &ChatResponse) -> OutcomeRecord {
        OutcomeRecord {
            run_id: self.run_id.clone(),
            trace_id: self.trace_id.clone(),
            provider: response.provider.clone(),
            success: response.success,
            latency_ms: response.latency_ms,
            error_code: response.error_code().map(|code| code.as_str().to_string()),
            at: Utc::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        elapsed_ms(self.started)
    }
}

/// Provider turn still running when the chain walk was cut short
#[derive(Debug, Clone)]
pub(crate) struct InFlight {
    pub provider: String,
    pub attempts: u32,
    pub started: Instant,
}

/// State that outlives a cancelled chain walk
///
/// Attempt records are buffered here and delivered to the sink once the
/// walk has finished, so sink latency never counts against the deadline.
#[derive(Debug, Default)]
pub(crate) struct ChainState {
    /// Last observed error, including skip reasons
    pub last_error: Option<ChatError>,
    pub in_flight: Option<InFlight>,
    pub records: Vec<AttemptRecord>,
}

impl ChainState {
    pub fn observe(&mut self, error: ChatError) {
        self.last_error = Some(error);
    }

    pub fn record(&mut self, record: AttemptRecord) {
        self.records.push(record);
    }
}

/// Result of one provider's turn in the chain
#[derive(Debug)]
pub(crate) enum TurnOutcome {
    Answered(ChatResponse),
    Skipped,
    Failed,
}

/// Call an adapter once, folding errors and panics into a [`ChatError`]
///
/// The response is returned as the adapter produced it, successful or not.
pub(crate) async fn invoke_adapter(
    adapter: &dyn ProviderAdapter,
    request: &ChatRequest,
) -> Result<ChatResponse, ChatError> {
    match AssertUnwindSafe(adapter.chat(request)).catch_unwind().await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(err)) => Err(ChatError::from(err)),
        Err(_) => Err(ChatError::new(ErrorCode::ProviderError, "provider adapter panicked")),
    }
}

/// Like [`invoke_adapter`], but an unsuccessful response is also an error
pub(crate) async fn call_adapter(
    adapter: &dyn ProviderAdapter,
    request: &ChatRequest,
) -> Result<ChatResponse, ChatError> {
    let response = invoke_adapter(adapter, request).await?;
    if response.success {
        return Ok(response);
    }
    Err(response.error.unwrap_or_else(|| {
        ChatError::new(
            ErrorCode::ProviderError,
            "provider returned an unsuccessful response without detail",
        )
    }))
}

pub(crate) fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
