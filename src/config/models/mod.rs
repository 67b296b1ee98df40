//! Configuration data models

#![allow(missing_docs)]

pub mod logging;
pub mod quota;
pub mod router;
pub mod routing;

pub use logging::*;
pub use quota::*;
pub use router::*;
pub use routing::*;

/// Default routing policy identifier
pub fn default_policy_id() -> String {
    "default".to_string()
}

/// Default provider order
pub fn default_chain() -> Vec<String> {
    vec![crate::core::providers::LOCAL_PROVIDER.to_string()]
}

/// Default retries after the first attempt
pub fn default_retries_max() -> u32 {
    1
}

/// Default backoff schedule in milliseconds
pub fn default_backoff_ms() -> Vec<u64> {
    vec![200, 800]
}

pub fn default_failure_threshold() -> u32 {
    5
}

pub fn default_cooldown_seconds() -> u64 {
    30
}

pub fn default_local_provider() -> String {
    crate::core::providers::LOCAL_PROVIDER.to_string()
}

pub fn default_sink_timeout_ms() -> u64 {
    250
}

pub fn default_true() -> bool {
    true
}

pub fn default_log_level() -> String {
    "info".to_string()
}
