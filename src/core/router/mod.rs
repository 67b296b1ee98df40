//! Core router for resilient multi-provider routing
//!
//! ## Module Structure
//!
//! - `policy` - Immutable routing policy (chain, retries, circuit thresholds)
//! - `selection` - Provider chain selection
//! - `config` - Router settings and per-call route options
//! - `router` - Router struct and builder
//! - `execute_impl` - `route` and the per-provider turn with retry
//! - `execution` - Execution helpers shared by the route flow
//! - `fallback` - Fail-open and terminal responses
//! - `shadow` - Background comparison calls
//! - `reporting` - Best-effort decision sink delivery

pub mod config;
mod execute_impl;
mod execution;
mod fallback;
pub mod policy;
pub mod reporting;
pub mod router;
pub mod selection;
mod shadow;

#[cfg(test)]
mod tests;

pub use config::{RouteOptions, RouterSettings};
pub use policy::RoutingPolicy;
pub use reporting::DecisionReporter;
pub use router::{Router, RouterBuilder};
pub use selection::{ChainSettings, select_chain};
