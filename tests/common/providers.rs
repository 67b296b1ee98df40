//! Provider test utilities
//!
//! Adapters with scripted behaviour, standing in for remote providers.

use async_trait::async_trait;
use provider_router::{ChatRequest, ChatResponse, ProviderAdapter, ProviderError};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Provider that fails its first `failures` calls, then answers
#[derive(Debug)]
pub struct FlakyProvider {
    name: String,
    model: String,
    failures: u32,
    error: ProviderError,
    calls: AtomicU32,
}

impl FlakyProvider {
    /// Fail the first `failures` calls with a retryable server error
    pub fn failing_first(name: &str, failures: u32) -> Self {
        Self {
            name: name.to_string(),
            model: format!("{}-model", name),
            failures,
            error: ProviderError::server(name, "upstream unavailable"),
            calls: AtomicU32::new(0),
        }
    }

    /// Always answer
    pub fn healthy(name: &str) -> Self {
        Self::failing_first(name, 0)
    }

    /// Always fail with a retryable server error
    pub fn broken(name: &str) -> Self {
        Self::failing_first(name, u32::MAX)
    }

    /// Replace the error returned while failing
    pub fn with_error(mut self, error: ProviderError) -> Self {
        self.error = error;
        self
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProviderAdapter for FlakyProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(self.error.clone());
        }
        Ok(ChatResponse::text(&self.name, format!("{} answered", self.name)))
    }
}

/// Provider that sleeps before answering
#[derive(Debug)]
pub struct SlowProvider {
    name: String,
    delay: Duration,
}

impl SlowProvider {
    pub fn new(name: &str, delay: Duration) -> Self {
        Self {
            name: name.to_string(),
            delay,
        }
    }
}

#[async_trait]
impl ProviderAdapter for SlowProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_configured(&self) -> bool {
        true
    }

    async fn chat(&self, _request: &ChatRequest) -> Result<ChatResponse, ProviderError> {
        tokio::time::sleep(self.delay).await;
        Ok(ChatResponse::text(&self.name, "late answer"))
    }
}
