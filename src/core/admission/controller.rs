//! Quota window bookkeeping

use super::types::{ProviderQuota, QuotaLimit, QuotaUsage};
use crate::config::QuotaConfig;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Instant;
use tracing::debug;

type QuotaKey = (String, String);

/// Per (provider, model) call counter bounded by a time window
///
/// All state sits behind one mutex held only for map lookups and counter
/// updates, so `register_use` is an atomic check-and-increment.
#[derive(Debug, Default)]
pub struct AdmissionController {
    quotas: Mutex<HashMap<QuotaKey, ProviderQuota>>,
}

impl AdmissionController {
    /// Controller with no limits; every call is admitted
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller enforcing the given limits
    pub fn with_limits(limits: impl IntoIterator<Item = QuotaLimit>) -> Self {
        let quotas = limits
            .into_iter()
            .map(|limit| {
                (
                    (limit.provider, limit.model),
                    ProviderQuota::new(limit.max_calls, limit.window),
                )
            })
            .collect();
        Self {
            quotas: Mutex::new(quotas),
        }
    }

    /// Controller built from the `quotas` config section
    pub fn from_config(quotas: &[QuotaConfig]) -> Self {
        Self::with_limits(quotas.iter().map(QuotaLimit::from))
    }

    /// Add or replace a limit, discarding any window state for the pair
    pub fn set_limit(&self, limit: QuotaLimit) {
        self.quotas.lock().insert(
            (limit.provider, limit.model),
            ProviderQuota::new(limit.max_calls, limit.window),
        );
    }

    /// Whether a call would currently be admitted
    ///
    /// Observing an expired window does not reset it.
    pub fn can_use(&self, provider: &str, model: &str) -> bool {
        let quotas = self.quotas.lock();
        let Some(quota) = quotas.get(&key(provider, model)) else {
            return true;
        };

        if quota.max_calls == 0 {
            return false;
        }
        quota.window_start.is_none()
            || quota.is_expired(Instant::now())
            || quota.calls < quota.max_calls
    }

    /// Record a call if admitted, returning whether it was
    ///
    /// A denied call leaves the state untouched.
    pub fn register_use(&self, provider: &str, model: &str) -> bool {
        let mut quotas = self.quotas.lock();
        let Some(quota) = quotas.get_mut(&key(provider, model)) else {
            return true;
        };
        if quota.max_calls == 0 {
            debug!(provider = provider, model = model, "Quota allows no calls");
            return false;
        }
        let now = Instant::now();

        if quota.window_start.is_none() || quota.is_expired(now) {
            quota.window_start = Some(now);
            quota.calls = 1;
            return true;
        }

        if quota.calls < quota.max_calls {
            quota.calls += 1;
            true
        } else {
            debug!(
                provider = provider,
                model = model,
                calls = quota.calls,
                max_calls = quota.max_calls,
                "Quota exhausted"
            );
            false
        }
    }

    /// Snapshot of a pair's quota, `None` when no limit is configured
    pub fn usage(&self, provider: &str, model: &str) -> Option<QuotaUsage> {
        let quotas = self.quotas.lock();
        let quota = quotas.get(&key(provider, model))?;
        let now = Instant::now();
        let active = quota.window_start.is_some() && !quota.is_expired(now);

        Some(QuotaUsage {
            provider: provider.to_string(),
            model: model.to_string(),
            calls: if active { quota.calls } else { 0 },
            max_calls: quota.max_calls,
            window_active: active,
            resets_in: quota
                .window_start
                .filter(|_| active)
                .map(|start| quota.window.saturating_sub(now.duration_since(start))),
        })
    }

    /// Whether any limit is configured for the pair
    pub fn has_limit(&self, provider: &str, model: &str) -> bool {
        self.quotas.lock().contains_key(&key(provider, model))
    }
}

fn key(provider: &str, model: &str) -> QuotaKey {
    (provider.to_string(), model.to_string())
}
