//! # provider-router
//!
//! Resilient multi-provider chat routing. A [`Router`] picks an ordered chain
//! of interchangeable provider adapters for each request, drives each attempt
//! through retry and backoff, isolates failing providers with per-provider
//! circuit breaking, enforces per-(provider, model) call quotas, and always
//! returns a well-formed [`ChatResponse`], falling back to a local responder
//! when every remote provider is unavailable.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use provider_router::{ChatRequest, RouteOptions, Router, RoutingPolicy};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let router = Router::builder(RoutingPolicy::with_chain(["local"])).build();
//!
//!     let request = ChatRequest::from_prompt("What is the capital of France?")?;
//!     let response = router.route(request, RouteOptions::default()).await;
//!
//!     println!("{} answered: {:?}", response.provider, response.text);
//!     Ok(())
//! }
//! ```
//!
//! ## From Configuration
//!
//! ```rust,no_run
//! use provider_router::{Config, Router};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/router.yaml").await?;
//!     let router = Router::builder_from_config(&config).build();
//!     println!("{:?}", router.policy());
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{Result, RouterError};

pub use core::admission::{AdmissionController, QuotaLimit, QuotaUsage};
pub use core::providers::{LOCAL_PROVIDER, LocalProvider, ProviderRegistry};
pub use core::router::{
    ChainSettings, RouteOptions, Router, RouterBuilder, RouterSettings, RoutingPolicy,
    select_chain,
};
pub use core::traits::{
    AlwaysReachable, AttemptRecord, AttemptStatus, ConnectivityProbe, DecisionSink,
    MemoryDecisionSink, NoopDecisionSink, OutcomeRecord, ProviderAdapter, ProviderError,
    RunStarted, SinkError, StaticConnectivity, TracingDecisionSink,
};
pub use core::types::{
    ChatError, ChatMessage, ChatRequest, ChatResponse, ErrorCode, MessageRole, ResponseFormat,
};
pub use utils::error::recovery::{CircuitBreaker, CircuitSettings, CircuitState};

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
