//! Utility modules
//!
//! - **error**: Crate error type, circuit breaker and retry backoff
//! - **logging**: Subscriber initialisation

pub mod error;
pub mod logging;
