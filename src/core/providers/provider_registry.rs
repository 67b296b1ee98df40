//! Provider Registry
//!
//! Injected map from provider identifier to adapter implementation.

use crate::core::traits::ProviderAdapter;
use std::collections::HashMap;
use std::sync::Arc;

/// Registry of provider adapters keyed by identifier
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn ProviderAdapter>>,
}

impl ProviderRegistry {
    /// Create new provider registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its own name
    pub fn register(&mut self, provider: Arc<dyn ProviderAdapter>) {
        let name = provider.name().to_string();
        self.providers.insert(name, provider);
    }

    /// Register an adapter under an explicit identifier
    pub fn register_as(&mut self, id: impl Into<String>, provider: Arc<dyn ProviderAdapter>) {
        self.providers.insert(id.into(), provider);
    }

    /// Builder-style registration
    pub fn with(mut self, provider: Arc<dyn ProviderAdapter>) -> Self {
        self.register(provider);
        self
    }

    /// Get provider by identifier
    pub fn get(&self, id: &str) -> Option<Arc<dyn ProviderAdapter>> {
        self.providers.get(id).cloned()
    }

    /// List all registered identifiers, sorted
    pub fn list(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.providers.keys().cloned().collect();
        ids.sort();
        ids
    }

    /// Remove provider
    pub fn remove(&mut self, id: &str) -> Option<Arc<dyn ProviderAdapter>> {
        self.providers.remove(id)
    }

    /// Check if provider is registered
    pub fn contains(&self, id: &str) -> bool {
        self.providers.contains_key(id)
    }

    /// Get provider count
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.list())
            .finish()
    }
}
