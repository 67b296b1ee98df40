//! Configuration integration tests
//!
//! Loads configuration files from disk and builds routers from them.

#[cfg(test)]
mod tests {
    use crate::common::ConfigFactory;
    use provider_router::config::LogFormat;
    use provider_router::{Config, Router};
    use std::collections::HashMap;
    use std::io::Write;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    /// Test loading a complete configuration file
    #[tokio::test]
    async fn test_load_config_file() {
        let file = write_config(ConfigFactory::yaml());

        let config = Config::from_file(file.path()).await.unwrap();

        assert_eq!(config.routing.policy_id, "integration");
        assert_eq!(
            config.routing.default_chain,
            vec!["primary", "secondary", "local"]
        );
        assert_eq!(config.routing.retries_max, 2);
        assert_eq!(config.quotas.len(), 1);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.route_timeout(), Some(Duration::from_secs(2)));
        assert_eq!(config.sink_timeout(), Duration::from_millis(100));
    }

    /// Test that a missing file is a configuration error
    #[tokio::test]
    async fn test_missing_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::from_file(dir.path().join("absent.yaml")).await;
        assert!(result.is_err());
    }

    /// Test that an invalid file is rejected at load time
    #[test]
    fn test_invalid_file_rejected() {
        let file = write_config(
            r#"
routing:
  default_chain: []
"#,
        );

        let result = tokio_test::block_on(Config::from_file(file.path()));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("Routing config error"), "{}", message);
    }

    /// Test that the router picks up policy and settings from configuration
    #[test]
    fn test_router_from_config() {
        let config = ConfigFactory::config();
        let router = Router::builder_from_config(&config).build();

        let policy = router.policy();
        assert_eq!(policy.policy_id, "integration");
        assert_eq!(policy.retries_max, 2);
        assert_eq!(policy.backoff_ms, vec![10, 20]);
        assert_eq!(policy.circuit_fail_threshold, 3);
        assert_eq!(policy.circuit_cooldown, Duration::from_secs(5));

        assert!(router.admission().has_limit("primary", "primary-model"));
        assert!(router.registry().contains("local"));

        let options = router.default_options();
        assert!(options.fail_open);
        assert_eq!(options.deadline, Some(Duration::from_secs(2)));
    }

    /// Test that overrides win over file values and are validated
    #[test]
    fn test_overrides_over_file_values() {
        let mut config = ConfigFactory::config();
        let vars: HashMap<&str, &str> = [
            ("ROUTER_DEFAULT_CHAIN", "secondary, local"),
            ("ROUTER_STRICT_MODE", "true"),
        ]
        .into_iter()
        .collect();

        config
            .apply_overrides(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        config.validate().unwrap();

        assert_eq!(config.routing.default_chain, vec!["secondary", "local"]);
        assert!(config.router.strict_mode);
    }

    /// Test that configuration survives a YAML round trip
    #[test]
    fn test_yaml_round_trip() {
        let config = ConfigFactory::config();
        let yaml = config.to_yaml().unwrap();
        assert_eq!(Config::from_yaml_str(&yaml).unwrap(), config);
    }
}
