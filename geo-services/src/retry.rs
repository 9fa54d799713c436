//! Bounded fixed-delay retry.
//!
//! Only used for static asset loading. Data queries (search, geocode, route)
//! are never retried.

use std::{future::Future, time::Duration};

use tracing::{error, warn};

/// Attempt ceiling and fixed pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            delay: Duration::from_millis(1000),
        }
    }
}

/// Runs `op` until it succeeds, `is_retryable` rejects the error, or the
/// attempt ceiling is reached. The last error is returned on exhaustion.
pub async fn retry_with_policy<T, E, Op, Fut, P>(
    policy: RetryPolicy,
    is_retryable: P,
    mut op: Op,
) -> Result<T, E>
where
    Op: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: Fn(&E) -> bool,
    E: std::fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;
    loop {
        match op(attempt).await {
            Ok(v) => return Ok(v),
            Err(e) if attempt < max_attempts && is_retryable(&e) => {
                warn!(
                    attempt,
                    max_attempts,
                    delay_ms = policy.delay.as_millis() as u64,
                    error = %e,
                    "retryable failure, retrying"
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
            Err(e) => {
                error!(attempt, error = %e, "giving up");
                return Err(e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ProviderError;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn stops_at_attempt_ceiling() {
        let calls = AtomicU32::new(0);
        let started = tokio::time::Instant::now();

        let res: Result<(), ProviderError> = retry_with_policy(
            RetryPolicy::default(),
            ProviderError::is_rate_limited,
            |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(ProviderError::RateLimited {
                        retry_after_secs: None,
                    })
                }
            },
        )
        .await;

        assert!(matches!(res, Err(ProviderError::RateLimited { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(started.elapsed(), Duration::from_millis(4000));
    }

    #[tokio::test(start_paused = true)]
    async fn non_retryable_fails_immediately() {
        let calls = AtomicU32::new(0);
        let res: Result<(), ProviderError> =
            retry_with_policy(RetryPolicy::default(), ProviderError::is_rate_limited, |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(ProviderError::NotFound) }
            })
            .await;

        assert_eq!(res, Err(ProviderError::NotFound));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_transient_rate_limit() {
        let res: Result<u32, ProviderError> =
            retry_with_policy(RetryPolicy::default(), ProviderError::is_rate_limited, |n| async move {
                if n < 3 {
                    Err(ProviderError::RateLimited {
                        retry_after_secs: Some(1),
                    })
                } else {
                    Ok(n)
                }
            })
            .await;

        assert_eq!(res, Ok(3));
    }
}
