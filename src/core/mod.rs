//! Core routing functionality
//!
//! Request and response contracts, collaborator traits, the provider
//! registry, admission control and the router itself.

pub mod admission;
pub mod providers;
pub mod router;
pub mod traits;
pub mod types;
