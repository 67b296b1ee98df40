//! Admission controller types

use crate::config::QuotaConfig;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Configured limit for one (provider, model) pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaLimit {
    pub provider: String,
    pub model: String,
    pub max_calls: u32,
    pub window: Duration,
}

impl QuotaLimit {
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        max_calls: u32,
        window: Duration,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            max_calls,
            window,
        }
    }
}

impl From<&QuotaConfig> for QuotaLimit {
    fn from(config: &QuotaConfig) -> Self {
        Self::new(
            config.provider.clone(),
            config.model.clone(),
            config.max_calls,
            Duration::from_secs(config.window_seconds),
        )
    }
}

/// Point-in-time view of a pair's quota
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuotaUsage {
    pub provider: String,
    pub model: String,
    /// Calls registered in the current window
    pub calls: u32,
    pub max_calls: u32,
    /// Whether a window has been started and not yet expired
    pub window_active: bool,
    /// Time left in the active window
    #[serde(skip)]
    pub resets_in: Option<Duration>,
}

/// Mutable quota state for one pair
#[derive(Debug, Clone)]
pub(super) struct ProviderQuota {
    pub(super) calls: u32,
    /// Unset until the first registered use
    pub(super) window_start: Option<Instant>,
    pub(super) max_calls: u32,
    pub(super) window: Duration,
}

impl ProviderQuota {
    pub(super) fn new(max_calls: u32, window: Duration) -> Self {
        Self {
            calls: 0,
            window_start: None,
            max_calls,
            window,
        }
    }

    pub(super) fn is_expired(&self, now: Instant) -> bool {
        self.window_start
            .is_some_and(|start| now.duration_since(start) > self.window)
    }
}
