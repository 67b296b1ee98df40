//! Admission quota configuration

use crate::core::traits::DEFAULT_MODEL;
use serde::{Deserialize, Serialize};

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// Call limit for one (provider, model) pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaConfig {
    pub provider: String,
    /// Model the adapter reports; adapters without one use `default`
    #[serde(default = "default_model")]
    pub model: String,
    /// Calls allowed per window
    pub max_calls: u32,
    /// Window length in seconds
    pub window_seconds: u64,
}

impl QuotaConfig {
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        max_calls: u32,
        window_seconds: u64,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            max_calls,
            window_seconds,
        }
    }
}
