//! Router integration tests
//!
//! Routes requests across chains of scripted providers and checks the
//! response, circuit state and decision trace.

#[cfg(test)]
mod tests {
    use crate::common::{ChatRequestFactory, ConfigFactory, FlakyProvider, SlowProvider};
    use provider_router::{
        AttemptStatus, CircuitState, ErrorCode, LOCAL_PROVIDER, MemoryDecisionSink,
        ProviderError, RouteOptions, Router, StaticConnectivity,
    };
    use std::sync::Arc;
    use std::time::Duration;

    /// Test that a failing primary falls through to the next provider
    #[tokio::test]
    async fn test_failover_to_secondary() {
        let primary = Arc::new(FlakyProvider::broken("primary"));
        let sink = Arc::new(MemoryDecisionSink::new());
        let router = Router::builder(ConfigFactory::fast_policy(&["primary", "secondary"]))
            .provider(primary.clone())
            .provider(Arc::new(FlakyProvider::healthy("secondary")))
            .sink(sink.clone())
            .build();

        let response = router
            .route(ChatRequestFactory::traced("trace-failover"), RouteOptions::default())
            .await;

        assert!(response.success);
        assert_eq!(response.provider, "secondary");
        assert_eq!(response.text.as_deref(), Some("secondary answered"));
        assert_eq!(response.model.as_deref(), Some("secondary-model"));
        assert_eq!(response.trace_id, "trace-failover");
        assert_eq!(primary.calls(), 2);

        let attempts = sink.attempts("trace-failover");
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].provider, "primary");
        assert_eq!(attempts[0].status, AttemptStatus::Failed);
        assert_eq!(attempts[0].attempts, 2);
        assert_eq!(attempts[0].error_code.as_deref(), Some("server_error"));
        assert_eq!(attempts[1].status, AttemptStatus::Ok);
    }

    /// Test that a transient failure is retried on the same provider
    #[tokio::test]
    async fn test_retry_recovers_same_provider() {
        let primary = Arc::new(FlakyProvider::failing_first("primary", 1));
        let router = Router::builder(ConfigFactory::fast_policy(&["primary", "secondary"]))
            .provider(primary.clone())
            .provider(Arc::new(FlakyProvider::healthy("secondary")))
            .build();

        let response = router
            .route(ChatRequestFactory::simple(), RouteOptions::default())
            .await;

        assert!(response.success);
        assert_eq!(response.provider, "primary");
        assert_eq!(primary.calls(), 2);
        assert_eq!(router.circuit_breaker().failures("primary"), 0);
    }

    /// Test that non-retryable errors move on without a second call
    #[tokio::test]
    async fn test_auth_error_not_retried() {
        let primary = Arc::new(
            FlakyProvider::broken("primary")
                .with_error(ProviderError::authentication("primary", "bad key")),
        );
        let router = Router::builder(ConfigFactory::fast_policy(&["primary", "secondary"]))
            .provider(primary.clone())
            .provider(Arc::new(FlakyProvider::healthy("secondary")))
            .build();

        let response = router
            .route(ChatRequestFactory::simple(), RouteOptions::default())
            .await;

        assert_eq!(response.provider, "secondary");
        assert_eq!(primary.calls(), 1);
    }

    /// Test that repeated failures open the circuit and later runs skip the provider
    #[tokio::test]
    async fn test_circuit_opens_across_requests() {
        let primary = Arc::new(FlakyProvider::broken("primary"));
        let sink = Arc::new(MemoryDecisionSink::new());
        let router = Router::builder(ConfigFactory::fast_policy(&["primary", "secondary"]))
            .provider(primary.clone())
            .provider(Arc::new(FlakyProvider::healthy("secondary")))
            .sink(sink.clone())
            .build();

        // Two attempts per run, threshold 3: the second run opens the circuit
        for _ in 0..2 {
            router
                .route(ChatRequestFactory::simple(), RouteOptions::default())
                .await;
        }
        assert_eq!(router.circuit_breaker().state("primary"), CircuitState::Open);
        let calls_before = primary.calls();

        let response = router
            .route(ChatRequestFactory::traced("trace-open"), RouteOptions::default())
            .await;

        assert_eq!(response.provider, "secondary");
        assert_eq!(primary.calls(), calls_before);
        let attempts = sink.attempts("trace-open");
        assert_eq!(attempts[0].status, AttemptStatus::CircuitOpen);
        assert_eq!(attempts[0].attempts, 0);
    }

    /// Test that an exhausted chain is answered by the local provider
    #[tokio::test]
    async fn test_fail_open_serves_local_answer() {
        let router = Router::builder(ConfigFactory::fast_policy(&["primary"]))
            .provider(Arc::new(FlakyProvider::broken("primary")))
            .build();

        let response = router
            .route(ChatRequestFactory::simple(), RouteOptions::default())
            .await;

        assert!(response.success);
        assert_eq!(response.provider, LOCAL_PROVIDER);
        assert_eq!(response.error_code(), Some(ErrorCode::FailOpen));
        assert!(response.text.is_some());
    }

    /// Test that disabling fail-open yields a terminal response with the last error
    #[tokio::test]
    async fn test_terminal_response_without_fail_open() {
        let router = Router::builder(ConfigFactory::fast_policy(&["primary"]))
            .provider(Arc::new(FlakyProvider::broken("primary")))
            .build();

        let response = router
            .route(
                ChatRequestFactory::traced("trace-terminal"),
                RouteOptions::default().with_fail_open(false),
            )
            .await;

        assert!(!response.success);
        assert!(response.is_terminal());
        assert_eq!(response.error_code(), Some(ErrorCode::ServerError));
        assert_eq!(response.trace_id, "trace-terminal");
    }

    /// Test that strict mode only tries the head of the chain
    #[tokio::test]
    async fn test_strict_mode_single_provider() {
        let secondary = Arc::new(FlakyProvider::healthy("secondary"));
        let router = Router::builder(ConfigFactory::fast_policy(&["primary", "secondary"]))
            .provider(Arc::new(FlakyProvider::broken("primary")))
            .provider(secondary.clone())
            .build();

        let response = router
            .route(
                ChatRequestFactory::simple(),
                RouteOptions::default()
                    .with_strict_mode(true)
                    .with_fail_open(false),
            )
            .await;

        assert!(!response.success);
        assert_eq!(secondary.calls(), 0);
    }

    /// Test that an unreachable network routes straight to the local provider
    #[tokio::test]
    async fn test_offline_routes_to_local() {
        let primary = Arc::new(FlakyProvider::healthy("primary"));
        let router = Router::builder(ConfigFactory::fast_policy(&["primary", LOCAL_PROVIDER]))
            .provider(primary.clone())
            .connectivity(Arc::new(StaticConnectivity::new(false)))
            .build();

        let response = router
            .route(ChatRequestFactory::simple(), RouteOptions::default())
            .await;

        assert!(response.success);
        assert_eq!(response.provider, LOCAL_PROVIDER);
        assert_eq!(primary.calls(), 0);
    }

    /// Test that the route deadline cuts a slow provider short
    #[tokio::test]
    async fn test_deadline_interrupts_slow_provider() {
        let router = Router::builder(ConfigFactory::fast_policy(&["slow"]))
            .provider(Arc::new(SlowProvider::new("slow", Duration::from_secs(5))))
            .build();

        let response = router
            .route(
                ChatRequestFactory::simple(),
                RouteOptions::default()
                    .with_deadline(Duration::from_millis(50))
                    .with_fail_open(false),
            )
            .await;

        assert!(!response.success);
        assert_eq!(response.error_code(), Some(ErrorCode::Timeout));
        assert!(response.latency_ms < 5_000);
    }

    /// Test that a JSON request reaches the structured-output provider first
    #[tokio::test]
    async fn test_structured_request_prefers_structured_provider() {
        let mut config = ConfigFactory::config();
        config.router.structured_output_provider = Some("secondary".to_string());
        config.routing.backoff_ms = Vec::new();

        let router = Router::builder_from_config(&config)
            .provider(Arc::new(FlakyProvider::healthy("primary")))
            .provider(Arc::new(FlakyProvider::healthy("secondary")))
            .build();

        let response = router
            .route(ChatRequestFactory::structured(), router.default_options())
            .await;

        assert_eq!(response.provider, "secondary");
    }

    /// Test that concurrent routes through one router all get answers
    #[tokio::test]
    async fn test_concurrent_routes() {
        let router = Arc::new(
            Router::builder(ConfigFactory::fast_policy(&["primary"]))
                .provider(Arc::new(FlakyProvider::healthy("primary")))
                .build(),
        );

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let router = router.clone();
                tokio::spawn(async move {
                    router
                        .route(ChatRequestFactory::simple(), RouteOptions::default())
                        .await
                })
            })
            .collect();

        for handle in handles {
            let response = handle.await.unwrap();
            assert!(response.success);
            assert_eq!(response.provider, "primary");
        }
    }
}
