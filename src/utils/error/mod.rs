//! Error handling utilities
//!
//! This module provides the crate error type and the recovery primitives
//! (circuit breaking, retry backoff) the router is built on.

pub mod error;
pub mod recovery;

// Re-export commonly used types and functions
pub use error::*;
pub use recovery::*;
