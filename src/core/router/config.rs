//! Router settings and per-call options

use super::policy::RoutingPolicy;
use super::selection::ChainSettings;
use crate::config::Config;
use std::time::Duration;

/// Router-wide settings fixed at construction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterSettings {
    /// Default for [`RouteOptions::strict_mode`]
    pub strict_mode: bool,
    /// Default for [`RouteOptions::fail_open`]
    pub fail_open: bool,
    /// Default for [`RouteOptions::deadline`]
    pub route_timeout: Option<Duration>,
    /// Upper bound on each decision sink call
    pub sink_timeout: Duration,
    pub chain: ChainSettings,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            strict_mode: false,
            fail_open: true,
            route_timeout: None,
            sink_timeout: Duration::from_millis(crate::config::default_sink_timeout_ms()),
            chain: ChainSettings::default(),
        }
    }
}

impl From<&Config> for RouterSettings {
    fn from(config: &Config) -> Self {
        Self {
            strict_mode: config.router.strict_mode,
            fail_open: config.router.fail_open,
            route_timeout: config.route_timeout(),
            sink_timeout: config.sink_timeout(),
            chain: ChainSettings {
                local_provider: config.router.local_provider.clone(),
                structured_output_provider: config.router.structured_output_provider.clone(),
            },
        }
    }
}

impl RouterSettings {
    pub fn local_provider(&self) -> &str {
        &self.chain.local_provider
    }
}

/// Options for a single route call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteOptions {
    /// Answer from the local provider when the chain is exhausted
    pub fail_open: bool,
    /// Fire a comparison call at the next eligible provider after a success
    pub shadow_mode: bool,
    /// Policy used instead of the router's baseline for this call
    pub policy_override: Option<RoutingPolicy>,
    /// Only try the first provider and never fail open
    pub strict_mode: bool,
    /// Allow response-format tailoring of the chain
    pub tailor_chain: bool,
    /// Overall bound on the chain walk
    pub deadline: Option<Duration>,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            fail_open: true,
            shadow_mode: false,
            policy_override: None,
            strict_mode: false,
            tailor_chain: true,
            deadline: None,
        }
    }
}

impl RouteOptions {
    pub fn with_fail_open(mut self, fail_open: bool) -> Self {
        self.fail_open = fail_open;
        self
    }

    pub fn with_shadow_mode(mut self, shadow_mode: bool) -> Self {
        self.shadow_mode = shadow_mode;
        self
    }

    pub fn with_policy(mut self, policy: RoutingPolicy) -> Self {
        self.policy_override = Some(policy);
        self
    }

    pub fn with_strict_mode(mut self, strict_mode: bool) -> Self {
        self.strict_mode = strict_mode;
        self
    }

    pub fn with_tailor_chain(mut self, tailor_chain: bool) -> Self {
        self.tailor_chain = tailor_chain;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Whether exhaustion falls back to the local provider
    pub fn allows_fail_open(&self) -> bool {
        self.fail_open && !self.strict_mode
    }
}
