//! Retry policy for usage requests.

use std::time::Duration;

use crate::error::FetchError;

/// Default number of attempts, including the first.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);

/// Default upper bound for a single backoff sleep.
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(60);

/// Policy for retrying failed requests with exponential backoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
    /// Cap on any single delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy with the given attempt count and default delays.
    ///
    /// An attempt count of 0 behaves like 1.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }

    /// Single attempt, no retries.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Sets the base delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the delay cap.
    pub fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Number of attempts actually made, never less than one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay to wait after the failed attempt with 0-based index `attempt`.
    ///
    /// `base_delay * 2^attempt`, capped at `max_delay`.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .unwrap_or(Duration::MAX)
            .min(self.max_delay)
    }

    /// Whether a failed attempt may be retried.
    ///
    /// Transport errors and non-200 statuses are transient; a body that does
    /// not decode is a contract mismatch and is returned as-is.
    pub fn should_retry(&self, error: &FetchError) -> bool {
        matches!(
            error,
            FetchError::Network(_) | FetchError::UnexpectedStatus { .. }
        )
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff() {
        let policy = RetryPolicy::default();

        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(400));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(800));
    }

    #[test]
    fn test_max_delay_cap() {
        let policy = RetryPolicy::new(10)
            .with_base_delay(Duration::from_secs(10))
            .with_max_delay(Duration::from_secs(60));

        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(40));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(60));
        // No overflow panic for absurd indices
        assert_eq!(policy.delay_for_attempt(200), Duration::from_secs(60));
    }

    #[test]
    fn test_no_retry_is_single_attempt() {
        let policy = RetryPolicy::no_retry();
        assert_eq!(policy.attempts(), 1);
        assert_eq!(policy.delay_for_attempt(0), Duration::ZERO);
    }

    #[test]
    fn test_zero_attempts_still_tries_once() {
        assert_eq!(RetryPolicy::new(0).attempts(), 1);
    }

    #[test]
    fn test_should_retry_classification() {
        let policy = RetryPolicy::default();
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();

        assert!(policy.should_retry(&FetchError::UnexpectedStatus { code: 500 }));
        assert!(policy.should_retry(&FetchError::UnexpectedStatus { code: 404 }));
        let transport_err = reqwest::Client::new().get("not a url").build().unwrap_err();
        assert!(policy.should_retry(&FetchError::Network(transport_err)));
        assert!(!policy.should_retry(&FetchError::Decode(json_err)));
        assert!(!policy.should_retry(&FetchError::Cancelled));
        assert!(!policy.should_retry(&FetchError::Config("bad".to_string())));
    }
}
