//! Admission integration tests
//!
//! Quotas configured per (provider, model) gate every network call the
//! router makes.

#[cfg(test)]
mod tests {
    use crate::common::{ChatRequestFactory, ConfigFactory, FlakyProvider};
    use provider_router::{
        AdmissionController, AttemptStatus, MemoryDecisionSink, QuotaLimit, RouteOptions, Router,
    };
    use std::sync::Arc;
    use std::time::Duration;

    /// Test that an exhausted quota skips the provider without calling it
    #[tokio::test]
    async fn test_quota_from_config_skips_provider() {
        let mut config = ConfigFactory::config();
        config.routing.backoff_ms = Vec::new();

        let primary = Arc::new(FlakyProvider::healthy("primary"));
        let sink = Arc::new(MemoryDecisionSink::new());
        let router = Router::builder_from_config(&config)
            .provider(primary.clone())
            .provider(Arc::new(FlakyProvider::healthy("secondary")))
            .sink(sink.clone())
            .build();

        for _ in 0..2 {
            let response = router
                .route(ChatRequestFactory::simple(), RouteOptions::default())
                .await;
            assert_eq!(response.provider, "primary");
        }

        let response = router
            .route(ChatRequestFactory::traced("trace-quota"), RouteOptions::default())
            .await;

        assert_eq!(response.provider, "secondary");
        assert_eq!(primary.calls(), 2);

        let attempts = sink.attempts("trace-quota");
        assert_eq!(attempts[0].provider, "primary");
        assert_eq!(attempts[0].status, AttemptStatus::QuotaExceeded);
        assert_eq!(attempts[0].error_code.as_deref(), Some("quota_error"));

        let usage = router.admission().usage("primary", "primary-model").unwrap();
        assert_eq!(usage.calls, 2);
        assert_eq!(usage.max_calls, 2);
        assert!(usage.window_active);
    }

    /// Test that a retry denied by admission ends the provider's turn
    #[tokio::test]
    async fn test_quota_denies_retry() {
        let admission = Arc::new(AdmissionController::with_limits([QuotaLimit::new(
            "primary",
            "primary-model",
            1,
            Duration::from_secs(60),
        )]));
        let primary = Arc::new(FlakyProvider::failing_first("primary", 1));
        let sink = Arc::new(MemoryDecisionSink::new());
        let router = Router::builder(ConfigFactory::fast_policy(&["primary", "secondary"]))
            .provider(primary.clone())
            .provider(Arc::new(FlakyProvider::healthy("secondary")))
            .admission(admission)
            .sink(sink.clone())
            .build();

        let response = router
            .route(ChatRequestFactory::traced("trace-retry"), RouteOptions::default())
            .await;

        assert_eq!(response.provider, "secondary");
        assert_eq!(primary.calls(), 1);

        let attempts = sink.attempts("trace-retry");
        assert_eq!(attempts[0].status, AttemptStatus::Failed);
        assert_eq!(attempts[0].attempts, 1);
        assert_eq!(attempts[0].error_code.as_deref(), Some("server_error"));
    }

    /// Test that the window resets once it expires
    #[tokio::test]
    async fn test_quota_window_resets() {
        let admission = Arc::new(AdmissionController::with_limits([QuotaLimit::new(
            "primary",
            "primary-model",
            1,
            Duration::from_millis(100),
        )]));
        let router = Router::builder(ConfigFactory::fast_policy(&["primary"]))
            .provider(Arc::new(FlakyProvider::healthy("primary")))
            .admission(admission.clone())
            .build();

        let first = router
            .route(ChatRequestFactory::simple(), RouteOptions::default())
            .await;
        assert_eq!(first.provider, "primary");
        assert!(!admission.can_use("primary", "primary-model"));

        tokio::time::sleep(Duration::from_millis(200)).await;

        assert!(admission.can_use("primary", "primary-model"));
        let second = router
            .route(ChatRequestFactory::simple(), RouteOptions::default())
            .await;
        assert_eq!(second.provider, "primary");
    }

    /// Test that pairs without a configured limit are never denied
    #[test]
    fn test_unlimited_pairs_admitted() {
        let admission = AdmissionController::new();
        for _ in 0..100 {
            assert!(admission.register_use("anything", "any-model"));
        }
        assert!(admission.usage("anything", "any-model").is_none());
    }
}
