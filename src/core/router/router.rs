//! Router core structure
//!
//! The router owns the baseline policy, the provider registry and the shared
//! resilience state (circuit breaker, admission controller). It is `Send +
//! Sync` and meant to be shared behind an `Arc` by concurrent callers.

use super::config::{RouteOptions, RouterSettings};
use super::policy::RoutingPolicy;
use super::reporting::DecisionReporter;
use crate::config::Config;
use crate::core::admission::AdmissionController;
use crate::core::providers::{LocalProvider, ProviderRegistry};
use crate::core::traits::{
    AlwaysReachable, ConnectivityProbe, DecisionSink, NoopDecisionSink, ProviderAdapter,
};
use crate::utils::error::recovery::{CircuitBreaker, CircuitSnapshot};
use std::sync::Arc;
use tracing::debug;

/// Multi-provider chat router
pub struct Router {
    pub(crate) registry: ProviderRegistry,
    pub(crate) policy: RoutingPolicy,
    pub(crate) settings: RouterSettings,
    pub(crate) circuit_breaker: Arc<CircuitBreaker>,
    pub(crate) admission: Arc<AdmissionController>,
    pub(crate) reporter: DecisionReporter,
    pub(crate) connectivity: Arc<dyn ConnectivityProbe>,
}

impl Router {
    /// Start building a router around a baseline policy
    pub fn builder(policy: RoutingPolicy) -> RouterBuilder {
        RouterBuilder::new(policy)
    }

    /// Builder pre-populated from configuration
    pub fn builder_from_config(config: &Config) -> RouterBuilder {
        RouterBuilder::new(config.routing.to_policy())
            .settings(RouterSettings::from(config))
            .admission(Arc::new(AdmissionController::from_config(&config.quotas)))
    }

    /// Per-call options seeded from the router's configured defaults
    pub fn default_options(&self) -> RouteOptions {
        RouteOptions {
            fail_open: self.settings.fail_open,
            strict_mode: self.settings.strict_mode,
            deadline: self.settings.route_timeout,
            ..RouteOptions::default()
        }
    }

    pub fn policy(&self) -> &RoutingPolicy {
        &self.policy
    }

    pub fn settings(&self) -> &RouterSettings {
        &self.settings
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn circuit_breaker(&self) -> &Arc<CircuitBreaker> {
        &self.circuit_breaker
    }

    pub fn admission(&self) -> &Arc<AdmissionController> {
        &self.admission
    }

    /// Circuit state of every provider that has failed at least once
    pub fn circuit_snapshot(&self) -> Vec<CircuitSnapshot> {
        self.circuit_breaker.snapshot()
    }
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("registry", &self.registry)
            .field("policy", &self.policy)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Router`]
pub struct RouterBuilder {
    policy: RoutingPolicy,
    registry: ProviderRegistry,
    settings: RouterSettings,
    circuit_breaker: Option<Arc<CircuitBreaker>>,
    admission: Option<Arc<AdmissionController>>,
    sink: Option<Arc<dyn DecisionSink>>,
    connectivity: Option<Arc<dyn ConnectivityProbe>>,
}

impl RouterBuilder {
    pub fn new(policy: RoutingPolicy) -> Self {
        Self {
            policy,
            registry: ProviderRegistry::new(),
            settings: RouterSettings::default(),
            circuit_breaker: None,
            admission: None,
            sink: None,
            connectivity: None,
        }
    }

    /// Replace the provider registry
    pub fn registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Register one adapter under its own name
    pub fn provider(mut self, provider: Arc<dyn ProviderAdapter>) -> Self {
        self.registry.register(provider);
        self
    }

    pub fn settings(mut self, settings: RouterSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Share a circuit breaker, e.g. between routers or with a test
    pub fn circuit_breaker(mut self, circuit_breaker: Arc<CircuitBreaker>) -> Self {
        self.circuit_breaker = Some(circuit_breaker);
        self
    }

    pub fn admission(mut self, admission: Arc<AdmissionController>) -> Self {
        self.admission = Some(admission);
        self
    }

    pub fn sink(mut self, sink: Arc<dyn DecisionSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn connectivity(mut self, connectivity: Arc<dyn ConnectivityProbe>) -> Self {
        self.connectivity = Some(connectivity);
        self
    }

    /// Build the router
    ///
    /// If nothing is registered under the local provider id, a
    /// [`LocalProvider`] is registered there so fail-open always has a target.
    pub fn build(mut self) -> Router {
        let local = self.settings.local_provider().to_string();
        if !self.registry.contains(&local) {
            debug!(provider = %local, "Registering built-in local provider");
            self.registry
                .register_as(local.clone(), Arc::new(LocalProvider::named(local)));
        }

        let sink = self.sink.unwrap_or_else(|| Arc::new(NoopDecisionSink));

        Router {
            registry: self.registry,
            policy: self.policy,
            reporter: DecisionReporter::new(sink, self.settings.sink_timeout),
            settings: self.settings,
            circuit_breaker: self.circuit_breaker.unwrap_or_default(),
            admission: self.admission.unwrap_or_default(),
            connectivity: self
                .connectivity
                .unwrap_or_else(|| Arc::new(AlwaysReachable)),
        }
    }
}
