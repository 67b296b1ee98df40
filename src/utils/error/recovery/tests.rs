//! Tests for error recovery utilities working together

#[cfg(test)]
mod tests {
    use super::super::{BackoffSchedule, CircuitBreaker, CircuitSettings, CircuitState};
    use std::time::Duration;

    #[test]
    fn test_retry_turn_feeds_breaker() {
        // A provider failing on every attempt of a 3-attempt turn records three failures
        let cb = CircuitBreaker::new();
        let settings = CircuitSettings::new(5, Duration::from_secs(30));

        for _ in 0..BackoffSchedule::max_attempts(2) {
            cb.record_failure("openai", &settings);
        }

        assert_eq!(cb.failures("openai"), 3);
        assert_eq!(cb.state("openai"), CircuitState::Closed);

        for _ in 0..2 {
            cb.record_failure("openai", &settings);
        }
        assert_eq!(cb.state("openai"), CircuitState::Open);
    }

    #[tokio::test]
    async fn test_backoff_sleep_is_cancellable() {
        let schedule = BackoffSchedule::from_millis(&[10_000]);
        let sleep = tokio::time::sleep(schedule.delay_for(1));

        let result = tokio::time::timeout(Duration::from_millis(20), sleep).await;
        assert!(result.is_err());
    }
}
