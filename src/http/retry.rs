//! Retry policies for HTTP requests.
//!
//! The price-fetch path always runs with [`RetryPolicy::None`]: a failed poll
//! is displayed as-is and the next timer tick or manual refresh is the retry.
//! Other read paths may opt into [`RetryPolicy::Idempotent`].

use std::time::Duration;

/// Retry policy for an HTTP request.
#[derive(Debug, Clone, Default)]
pub enum RetryPolicy {
    /// Single attempt — the default, and the only policy used by fetch
    /// cycles.
    #[default]
    None,
    /// Retry transport failures and 502/503/504, with backoff on 429.
    Idempotent,
    /// Caller-provided retry behavior.
    Custom(RetryConfig),
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the initial request. Never less than one.
    pub max_attempts: u32,
    /// Delay before the first retry; doubles on each subsequent retry.
    pub base_delay: Duration,
    /// Upper bound for the computed delay.
    pub max_delay: Duration,
    /// Add up to ±25% random jitter to each delay.
    pub jitter: bool,
    /// HTTP status codes that trigger a retry.
    pub retryable_statuses: Vec<u16>,
}

impl RetryConfig {
    /// The default config for idempotent (GET) requests.
    pub fn idempotent() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(200),
            max_delay: Duration::from_secs(10),
            jitter: true,
            retryable_statuses: vec![429, 502, 503, 504],
        }
    }

    /// Number of retries after the initial attempt.
    pub fn retries(&self) -> u32 {
        self.max_attempts.saturating_sub(1)
    }

    /// Delay before retry number `retry` (0-indexed): exponential doubling
    /// capped at `max_delay`, optionally jittered.
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let base = self.base_delay.as_millis() as f64 * 2f64.powi(retry as i32);
        let capped = base.min(self.max_delay.as_millis() as f64);

        let final_ms = if self.jitter {
            let spread = capped * 0.25;
            let offset = (rand::random::<f64>() - 0.5) * 2.0 * spread;
            (capped + offset).max(0.0)
        } else {
            capped
        };

        Duration::from_millis(final_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_is_none() {
        assert!(matches!(RetryPolicy::default(), RetryPolicy::None));
    }

    #[test]
    fn test_idempotent_config_statuses() {
        let config = RetryConfig::idempotent();
        for status in [429, 502, 503, 504] {
            assert!(config.retryable_statuses.contains(&status));
        }
        assert!(!config.retryable_statuses.contains(&500));
    }

    #[test]
    fn test_delay_doubles_without_jitter() {
        let config = RetryConfig {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            jitter: false,
            retryable_statuses: vec![],
        };
        assert_eq!(config.delay_for_retry(0).as_millis(), 100);
        assert_eq!(config.delay_for_retry(1).as_millis(), 200);
        assert_eq!(config.delay_for_retry(2).as_millis(), 400);
    }

    #[test]
    fn test_delay_caps_at_max() {
        let config = RetryConfig {
            max_attempts: 6,
            base_delay: Duration::from_millis(1000),
            max_delay: Duration::from_millis(1500),
            jitter: false,
            retryable_statuses: vec![],
        };
        assert_eq!(config.delay_for_retry(4).as_millis(), 1500);
    }

    #[test]
    fn test_retries_never_underflow() {
        let mut config = RetryConfig::idempotent();
        assert_eq!(config.retries(), 3);
        config.max_attempts = 0;
        assert_eq!(config.retries(), 0);
    }
}
