//! Error handling for the router
//!
//! This module defines the crate-level error type. Provider failures are not
//! represented here; they live in `core::traits::provider::ProviderError` and
//! never escape `Router::route`.

mod helpers;
mod types;

pub use types::{Result, RouterError};
