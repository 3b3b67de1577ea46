//! Retry-with-backoff for outbound HTTP calls.
//!
//! A response whose status is one of [`RETRYABLE_STATUSES`] is retried up to
//! `max_attempts` total attempts, sleeping `base_delay * 2^attempt` plus a
//! random jitter in `0..max_jitter` between attempts. After the last attempt
//! the final response is returned as-is, successful or not. Transport errors
//! are not retried.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

/// Status codes that indicate a transient upstream failure.
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Anything carrying an HTTP status code can be retried.
pub trait HasStatus {
    fn status_code(&self) -> u16;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(500),
            max_jitter: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// A policy that retries immediately. Used by tests.
    pub fn no_delay(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: Duration::ZERO,
            max_jitter: Duration::ZERO,
        }
    }

    pub fn is_retryable(status: u16) -> bool {
        RETRYABLE_STATUSES.contains(&status)
    }

    /// Delay to wait after the zero-based `attempt` failed.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.min(16);
        let jitter_ms = self.max_jitter.as_millis() as u64;
        let jitter = if jitter_ms == 0 {
            0
        } else {
            rand::thread_rng().gen_range(0..jitter_ms)
        };
        self.base_delay.saturating_mul(factor) + Duration::from_millis(jitter)
    }

    /// Run `call` until it yields a non-retryable status or attempts run out.
    ///
    /// `call` receives the zero-based attempt number.
    pub async fn run<F, Fut, T, E>(&self, mut call: F) -> Result<T, E>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        T: HasStatus,
    {
        let attempts = self.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            let response = call(attempt).await?;
            let status = response.status_code();

            if !Self::is_retryable(status) || attempt + 1 >= attempts {
                return Ok(response);
            }

            let delay = self.delay_for(attempt);
            tracing::warn!(
                status,
                attempt = attempt + 1,
                max_attempts = attempts,
                delay_ms = delay.as_millis() as u64,
                "Retryable upstream status, backing off"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    struct Status(u16);

    impl HasStatus for Status {
        fn status_code(&self) -> u16 {
            self.0
        }
    }

    async fn run_sequence(policy: &RetryPolicy, statuses: Vec<u16>) -> (u16, u32) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let result: Result<Status, ()> = policy
            .run(|attempt| {
                counter.fetch_add(1, Ordering::SeqCst);
                let status = statuses[(attempt as usize).min(statuses.len() - 1)];
                async move { Ok(Status(status)) }
            })
            .await;
        (result.unwrap().0, calls.load(Ordering::SeqCst))
    }

    #[test]
    fn test_retryable_statuses() {
        for status in [429, 500, 502, 503, 504] {
            assert!(RetryPolicy::is_retryable(status));
        }
        for status in [200, 201, 301, 400, 401, 404, 501] {
            assert!(!RetryPolicy::is_retryable(status));
        }
    }

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 4);
        assert_eq!(policy.base_delay, Duration::from_millis(500));
        assert_eq!(policy.max_jitter, Duration::from_millis(250));
    }

    #[test]
    fn test_delay_grows_exponentially_within_jitter() {
        let policy = RetryPolicy::default();
        for attempt in 0..3 {
            let floor = Duration::from_millis(500 * 2u64.pow(attempt));
            let delay = policy.delay_for(attempt);
            assert!(delay >= floor, "attempt {attempt}: {delay:?} < {floor:?}");
            assert!(delay < floor + Duration::from_millis(250));
        }
    }

    #[test]
    fn test_zero_jitter_is_exact() {
        let policy = RetryPolicy {
            max_attempts: 4,
            base_delay: Duration::from_millis(10),
            max_jitter: Duration::ZERO,
        };
        assert_eq!(policy.delay_for(0), Duration::from_millis(10));
        assert_eq!(policy.delay_for(2), Duration::from_millis(40));
    }

    #[tokio::test]
    async fn test_returns_success_after_three_retries() {
        let policy = RetryPolicy::no_delay(4);
        let (status, calls) = run_sequence(&policy, vec![503, 503, 503, 200]).await;
        assert_eq!(status, 200);
        assert_eq!(calls, 4);
    }

    #[tokio::test]
    async fn test_non_retryable_returns_immediately() {
        let policy = RetryPolicy::no_delay(4);
        let (status, calls) = run_sequence(&policy, vec![404, 200]).await;
        assert_eq!(status, 404);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_exhausted_attempts_return_last_response() {
        let policy = RetryPolicy::no_delay(4);
        let (status, calls) = run_sequence(&policy, vec![500, 502, 429, 504, 200]).await;
        assert_eq!(status, 504);
        assert_eq!(calls, 4);
    }

    #[tokio::test]
    async fn test_transport_error_is_not_retried() {
        let policy = RetryPolicy::no_delay(4);
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let result: Result<Status, &str> = policy
            .run(|_| {
                counter.fetch_add(1, Ordering::SeqCst);
                async { Err("connection refused") }
            })
            .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
