//! Section validators

use super::Validate;
use crate::config::models::*;
use std::collections::HashSet;
use tracing::debug;

impl Validate for RoutingConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating routing configuration");

        if self.policy_id.trim().is_empty() {
            return Err("Routing policy_id cannot be empty".to_string());
        }

        if self.default_chain.is_empty() {
            return Err("Routing default_chain must name at least one provider".to_string());
        }

        let mut seen = HashSet::new();
        for provider in &self.default_chain {
            if provider.trim().is_empty() {
                return Err("Routing default_chain contains an empty provider id".to_string());
            }
            if !seen.insert(provider.as_str()) {
                return Err(format!(
                    "Routing default_chain lists provider '{}' more than once",
                    provider
                ));
            }
        }

        if self.circuit_fail_threshold == 0 {
            return Err("Circuit fail threshold must be greater than 0".to_string());
        }

        if self.circuit_cooldown_seconds == 0 {
            return Err("Circuit cooldown must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for RouterConfig {
    fn validate(&self) -> Result<(), String> {
        if self.local_provider.trim().is_empty() {
            return Err("Router local_provider cannot be empty".to_string());
        }

        if matches!(&self.structured_output_provider, Some(p) if p.trim().is_empty()) {
            return Err("Router structured_output_provider cannot be empty".to_string());
        }

        if self.sink_timeout_ms == 0 {
            return Err("Router sink_timeout_ms must be greater than 0".to_string());
        }

        if self.route_timeout_ms == Some(0) {
            return Err("Router route_timeout_ms must be greater than 0".to_string());
        }

        Ok(())
    }
}

impl Validate for QuotaConfig {
    fn validate(&self) -> Result<(), String> {
        if self.provider.trim().is_empty() {
            return Err("Quota provider cannot be empty".to_string());
        }

        if self.model.trim().is_empty() {
            return Err(format!("Quota model for '{}' cannot be empty", self.provider));
        }

        if self.max_calls == 0 {
            return Err(format!(
                "Quota max_calls for '{}/{}' must be greater than 0",
                self.provider, self.model
            ));
        }

        if self.window_seconds == 0 {
            return Err(format!(
                "Quota window_seconds for '{}/{}' must be greater than 0",
                self.provider, self.model
            ));
        }

        Ok(())
    }
}

impl Validate for [QuotaConfig] {
    fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for quota in self {
            quota.validate()?;
            if !seen.insert((quota.provider.as_str(), quota.model.as_str())) {
                return Err(format!(
                    "Quota for '{}/{}' is defined more than once",
                    quota.provider, quota.model
                ));
            }
        }
        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Logging level cannot be empty".to_string());
        }

        tracing_subscriber::EnvFilter::try_new(&self.level)
            .map_err(|e| format!("Invalid logging level '{}': {}", self.level, e))?;

        Ok(())
    }
}
