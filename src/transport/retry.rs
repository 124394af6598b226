//! Retry policy applied by the transport adapter.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a request is retried: attempt budget, exponential backoff and
/// which outcomes count as transient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts including the first one.
    pub max_attempts: u32,
    pub min_delay_ms: u64,
    pub max_delay_ms: u64,
    pub retry_on_status: Vec<u16>,
    pub retry_on_transport_error: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_delay_ms: 500,
            max_delay_ms: 10_000,
            retry_on_status: vec![429, 500, 502, 503, 504],
            retry_on_transport_error: true,
        }
    }
}

impl RetryPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    pub fn with_delays(mut self, min: Duration, max: Duration) -> Self {
        self.min_delay_ms = min.as_millis() as u64;
        self.max_delay_ms = max.as_millis() as u64;
        self
    }

    pub fn with_retry_on_status(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.retry_on_status = statuses.into_iter().collect();
        self
    }

    pub fn with_retry_on_transport_error(mut self, enable: bool) -> Self {
        self.retry_on_transport_error = enable;
        self
    }

    pub fn retries_status(&self, status: u16) -> bool {
        self.retry_on_status.contains(&status)
    }

    /// Delay before the retry following failed attempt `attempt` (0-based):
    /// `min_delay * 2^attempt`, capped at `max_delay`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let delay = self.min_delay_ms.saturating_mul(factor).min(self.max_delay_ms);
        Duration::from_millis(delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert!(policy.retries_status(503));
        assert!(!policy.retries_status(404));
        assert!(policy.retry_on_transport_error);
    }

    #[test]
    fn test_backoff_is_exponential_and_capped() {
        let policy = RetryPolicy::new()
            .with_delays(Duration::from_millis(100), Duration::from_millis(350));
        assert_eq!(policy.backoff(0), Duration::from_millis(100));
        assert_eq!(policy.backoff(1), Duration::from_millis(200));
        assert_eq!(policy.backoff(2), Duration::from_millis(350));
        assert_eq!(policy.backoff(70), Duration::from_millis(350));
    }

    #[test]
    fn test_max_attempts_is_at_least_one() {
        assert_eq!(RetryPolicy::new().with_max_attempts(0).max_attempts, 1);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let policy: RetryPolicy =
            serde_yaml::from_str("max_attempts: 5\nmin_delay_ms: 10").unwrap();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.min_delay_ms, 10);
        assert_eq!(policy.max_delay_ms, 10_000);
        assert_eq!(policy.retry_on_status, vec![429, 500, 502, 503, 504]);
    }
}
