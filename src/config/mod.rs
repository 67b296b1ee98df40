//! Configuration management for the router
//!
//! Configuration is read from a YAML file (or built from defaults), then
//! `ROUTER_*` environment variables are applied on top, then every section is
//! validated.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{Result, RouterError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "ROUTER_";

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Baseline routing policy
    #[serde(default)]
    pub routing: RoutingConfig,
    /// Router defaults and collaborator settings
    #[serde(default)]
    pub router: RouterConfig,
    /// Admission quotas per (provider, model)
    #[serde(default)]
    pub quotas: Vec<QuotaConfig>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file, apply environment overrides and validate
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RouterError::Config(format!("Failed to read config file: {}", e)))?;

        let mut config = Self::from_yaml_str(&content)?;
        config.apply_env()?;
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Build configuration from defaults and environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when given, otherwise from the environment
    pub async fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path).await,
            None => Self::from_env(),
        }
    }

    /// Parse YAML without applying overrides or validating
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| RouterError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply `ROUTER_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides resolved through `lookup`
    ///
    /// Recognised keys (after [`ENV_PREFIX`]): `POLICY_ID`, `DEFAULT_CHAIN`
    /// (comma separated), `RETRIES_MAX`, `BACKOFF_MS` (comma separated),
    /// `CIRCUIT_FAIL_THRESHOLD`, `CIRCUIT_COOLDOWN_SECONDS`, `STRICT_MODE`,
    /// `FAIL_OPEN`, `LOCAL_PROVIDER`, `STRUCTURED_OUTPUT_PROVIDER`,
    /// `SINK_TIMEOUT_MS`, `ROUTE_TIMEOUT_MS`, `LOG_LEVEL`, `LOG_FORMAT`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(&format!("{}{}", ENV_PREFIX, name))
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(v) = get("POLICY_ID") {
            self.routing.policy_id = v;
        }
        if let Some(v) = get("DEFAULT_CHAIN") {
            self.routing.default_chain = split_list(&v);
        }
        if let Some(v) = get("RETRIES_MAX") {
            self.routing.retries_max = parse_var("RETRIES_MAX", &v)?;
        }
        if let Some(v) = get("BACKOFF_MS") {
            self.routing.backoff_ms = split_list(&v)
                .iter()
                .map(|item| parse_var("BACKOFF_MS", item))
                .collect::<Result<Vec<u64>>>()?;
        }
        if let Some(v) = get("CIRCUIT_FAIL_THRESHOLD") {
            self.routing.circuit_fail_threshold = parse_var("CIRCUIT_FAIL_THRESHOLD", &v)?;
        }
        if let Some(v) = get("CIRCUIT_COOLDOWN_SECONDS") {
            self.routing.circuit_cooldown_seconds = parse_var("CIRCUIT_COOLDOWN_SECONDS", &v)?;
        }
        if let Some(v) = get("STRICT_MODE") {
            self.router.strict_mode = parse_bool("STRICT_MODE", &v)?;
        }
        if let Some(v) = get("FAIL_OPEN") {
            self.router.fail_open = parse_bool("FAIL_OPEN", &v)?;
        }
        if let Some(v) = get("LOCAL_PROVIDER") {
            self.router.local_provider = v;
        }
        if let Some(v) = get("STRUCTURED_OUTPUT_PROVIDER") {
            self.router.structured_output_provider = Some(v);
        }
        if let Some(v) = get("SINK_TIMEOUT_MS") {
            self.router.sink_timeout_ms = parse_var("SINK_TIMEOUT_MS", &v)?;
        }
        if let Some(v) = get("ROUTE_TIMEOUT_MS") {
            self.router.route_timeout_ms = Some(parse_var("ROUTE_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = get("LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Some(v) = get("LOG_FORMAT") {
            self.logging.format = match v.to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                other => {
                    return Err(RouterError::Config(format!(
                        "{}LOG_FORMAT must be 'text' or 'json', got '{}'",
                        ENV_PREFIX, other
                    )));
                }
            };
        }

        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.routing
            .validate()
            .map_err(|e| RouterError::Config(format!("Routing config error: {}", e)))?;

        self.router
            .validate()
            .map_err(|e| RouterError::Config(format!("Router config error: {}", e)))?;

        self.quotas
            .as_slice()
            .validate()
            .map_err(|e| RouterError::Config(format!("Quota config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| RouterError::Config(format!("Logging config error: {}", e)))?;

        Ok(())
    }

    /// Sink call bound as a duration
    pub fn sink_timeout(&self) -> Duration {
        Duration::from_millis(self.router.sink_timeout_ms)
    }

    /// Default route deadline as a duration
    pub fn route_timeout(&self) -> Option<Duration> {
        self.router.route_timeout_ms.map(Duration::from_millis)
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| RouterError::Config(format!("Failed to serialize config to YAML: {}", e)))
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_var<T: std::str::FromStr>(name: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value.parse().map_err(|e| {
        RouterError::Config(format!(
            "Invalid value '{}' for {}{}: {}",
            value, ENV_PREFIX, name, e
        ))
    })
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(RouterError::Config(format!(
            "Invalid boolean '{}' for {}{}",
            value, ENV_PREFIX, name
        ))),
    }
}
