//! Provider adapters
//!
//! Remote adapters are supplied by the embedding application; this module
//! holds the registry they are injected through and the built-in local
//! fallback responder.

pub mod local;
pub mod provider_registry;

pub use local::{LOCAL_PROVIDER, LocalProvider};
pub use provider_registry::ProviderRegistry;
