//! Common test utilities for provider-router
//!
//! - Scripted provider adapters that fail or answer on demand
//! - Request and configuration fixtures
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::common::{fixtures, providers};
//!
//! #[tokio::test]
//! async fn my_test() {
//!     let provider = providers::FlakyProvider::failing_first("remote", 1);
//!     let request = fixtures::ChatRequestFactory::simple();
//!     // ...
//! }
//! ```

pub mod fixtures;
pub mod providers;

// Re-export commonly used items
pub use fixtures::{ChatRequestFactory, ConfigFactory};
pub use providers::{FlakyProvider, SlowProvider};
