//! Route deadline tests

use super::mock::{Harness, ScriptedProvider, Step, fast_policy, server_error};
use crate::core::router::{RouteOptions, RouterSettings, RoutingPolicy};
use crate::core::traits::AttemptStatus;
use crate::core::types::ErrorCode;
use std::time::{Duration, Instant};

#[tokio::test]
async fn test_deadline_cuts_slow_provider_and_fails_open() {
    let slow = ScriptedProvider::scripted("slow", vec![Step::Sleep(Duration::from_secs(5))]);
    let harness = Harness::new(fast_policy(&["slow"]), vec![slow.clone()]);

    let started = Instant::now();
    let resp = harness
        .route(RouteOptions::default().with_deadline(Duration::from_millis(100)))
        .await;

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(resp.provider, "local");
    assert_eq!(resp.error_code(), Some(ErrorCode::FailOpen));
    assert!(resp.error.as_ref().unwrap().msg.contains("timeout"));

    let attempts = harness.attempts(&resp.trace_id);
    assert_eq!(attempts[0].provider, "slow");
    assert_eq!(attempts[0].status, AttemptStatus::Failed);
    assert_eq!(attempts[0].error_code.as_deref(), Some("timeout"));
    assert_eq!(attempts[0].attempts, 1);
}

#[tokio::test]
async fn test_deadline_without_fail_open_reports_timeout() {
    let slow = ScriptedProvider::scripted("slow", vec![Step::Sleep(Duration::from_secs(5))]);
    let harness = Harness::new(fast_policy(&["slow"]), vec![slow]);

    let resp = harness
        .route(
            RouteOptions::default()
                .with_deadline(Duration::from_millis(50))
                .with_fail_open(false),
        )
        .await;

    assert!(resp.is_terminal());
    assert_eq!(resp.error_code(), Some(ErrorCode::Timeout));
}

#[tokio::test]
async fn test_deadline_interrupts_backoff_sleep() {
    let a = ScriptedProvider::failing("a", server_error("a"));
    let policy = RoutingPolicy::with_chain(["a"])
        .with_retries(3, vec![10_000])
        .with_circuit(10, Duration::from_secs(30));
    let harness = Harness::new(policy, vec![a.clone()]);

    let started = Instant::now();
    let resp = harness
        .route(RouteOptions::default().with_deadline(Duration::from_millis(100)))
        .await;

    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(a.calls(), 1);
    // The failure recorded before the deadline stays recorded
    assert_eq!(harness.router.circuit_breaker().failures("a"), 1);
    assert_eq!(resp.provider, "local");
}

#[tokio::test]
async fn test_fast_answer_within_deadline() {
    let harness = Harness::new(fast_policy(&["a"]), vec![ScriptedProvider::ok("a")]);

    let resp = harness
        .route(RouteOptions::default().with_deadline(Duration::from_secs(5)))
        .await;

    assert_eq!(resp.provider, "a");
    assert!(resp.error.is_none());
}

#[tokio::test]
async fn test_configured_route_timeout_is_default_deadline() {
    let slow = ScriptedProvider::scripted("slow", vec![Step::Sleep(Duration::from_secs(5))]);
    let settings = RouterSettings {
        route_timeout: Some(Duration::from_millis(50)),
        ..RouterSettings::default()
    };
    let harness = Harness::with_settings(fast_policy(&["slow"]), vec![slow], settings);

    let options = harness.router.default_options();
    assert_eq!(options.deadline, Some(Duration::from_millis(50)));

    let resp = harness.router.route_with_defaults(super::mock::ping()).await;
    assert_eq!(resp.provider, "local");
}
