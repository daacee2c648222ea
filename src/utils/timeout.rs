use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, warn};

use crate::errors::{FundError, Result};

/// Configuration for timeout handling
#[derive(Debug, Clone)]
pub struct TimeoutConfig {
    /// Timeout applied to each individual request
    pub request_timeout: Duration,
    /// Number of retries after the first attempt
    pub retry_count: u32,
    /// Delay before the first retry
    pub initial_backoff: Duration,
    /// Backoff multiplier for retries
    pub backoff_multiplier: f64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(15),
            retry_count: 2,
            initial_backoff: Duration::from_millis(250),
            backoff_multiplier: 2.0,
        }
    }
}

/// Execute a future with a timeout. Logging is left to the caller, which
/// knows whether the operation will be retried.
pub async fn with_timeout<F, T>(future: F, duration: Duration, operation_name: &str) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    timeout(duration, future).await.unwrap_or_else(|_| {
        Err(FundError::Timeout {
            operation: operation_name.to_string(),
            seconds: duration.as_secs(),
        })
    })
}

/// Execute an operation with a per-attempt timeout and bounded retries.
///
/// Only transient failures are retried; anything else is returned as soon as
/// it is seen.
pub async fn with_timeout_retry<F, Fut, T>(
    mut operation: F,
    config: &TimeoutConfig,
    operation_name: &str,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut retry_delay = config.initial_backoff;
    let attempts = config.retry_count + 1;
    let mut attempt = 0;

    loop {
        attempt += 1;

        match with_timeout(operation(), config.request_timeout, operation_name).await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_transient() => return Err(e),
            Err(e) if attempt >= attempts => {
                error!(
                    "Operation '{}' failed after {} attempts: {}",
                    operation_name, attempts, e
                );
                return Err(e);
            }
            Err(e) => {
                warn!(
                    "Retrying operation '{}' (attempt {}/{}): {}",
                    operation_name,
                    attempt + 1,
                    attempts,
                    e
                );
                tokio::time::sleep(retry_delay).await;
                retry_delay =
                    Duration::from_secs_f64(retry_delay.as_secs_f64() * config.backoff_multiplier);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt};
    use tracing_subscriber::Layer;

    /// Records the level of every event it sees
    #[derive(Clone, Default)]
    struct LevelLog(Arc<Mutex<Vec<Level>>>);

    impl LevelLog {
        fn count(&self, level: Level) -> usize {
            self.0.lock().unwrap().iter().filter(|l| **l == level).count()
        }
    }

    impl<S: Subscriber> Layer<S> for LevelLog {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.lock().unwrap().push(*event.metadata().level());
        }
    }

    async fn times_out_first(calls: &AtomicU32, slow_attempts: u32) -> Result<String> {
        let attempt = calls.fetch_add(1, Ordering::SeqCst);
        if attempt < slow_attempts {
            tokio::time::sleep(Duration::from_secs(2)).await;
        }
        Ok("success".to_string())
    }

    fn fast_config(retry_count: u32) -> TimeoutConfig {
        TimeoutConfig {
            request_timeout: Duration::from_millis(100),
            retry_count,
            initial_backoff: Duration::from_millis(1),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_successful_operation() {
        async fn quick_operation() -> Result<String> {
            Ok("success".to_string())
        }

        let result = with_timeout(quick_operation(), Duration::from_secs(1), "test_operation").await;

        assert_eq!(result.unwrap(), "success");
    }

    #[tokio::test]
    async fn test_timeout() {
        async fn slow_operation() -> Result<String> {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Ok("success".to_string())
        }

        let result =
            with_timeout(slow_operation(), Duration::from_millis(100), "test_operation").await;

        assert!(matches!(result, Err(FundError::Timeout { .. })));
    }

    #[tokio::test]
    async fn test_retry_after_timeout() {
        let calls = AtomicU32::new(0);

        let result = with_timeout_retry(
            || {
                let attempt = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt == 0 {
                        tokio::time::sleep(Duration::from_secs(2)).await;
                    }
                    Ok("success".to_string())
                }
            },
            &fast_config(2),
            "test_operation",
        )
        .await;

        assert_eq!(result.unwrap(), "success");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retries_are_bounded() {
        let calls = AtomicU32::new(0);

        let result: Result<()> = with_timeout_retry(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(FundError::Status {
                        url: "https://example.com".into(),
                        status: 503,
                    })
                }
            },
            &fast_config(2),
            "test_operation",
        )
        .await;

        assert!(matches!(result, Err(FundError::Status { status: 503, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_permanent_errors_are_not_retried() {
        let calls = AtomicU32::new(0);

        let result: Result<()> = with_timeout_retry(
            || {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(FundError::fetch("field not found")) }
            },
            &fast_config(3),
            "test_operation",
        )
        .await;

        assert!(matches!(result, Err(FundError::Fetch(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_recovered_timeout_only_warns() {
        let log = LevelLog::default();
        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(log.clone()));
        let calls = AtomicU32::new(0);

        let result = with_timeout_retry(|| times_out_first(&calls, 1), &fast_config(2), "price:005930").await;

        assert_eq!(result.unwrap(), "success");
        assert_eq!(log.count(Level::ERROR), 0);
        assert_eq!(log.count(Level::WARN), 1);
    }

    #[tokio::test]
    async fn test_exhausted_timeouts_log_one_error() {
        let log = LevelLog::default();
        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(log.clone()));
        let calls = AtomicU32::new(0);

        let result = with_timeout_retry(|| times_out_first(&calls, 3), &fast_config(2), "price:005930").await;

        assert!(matches!(result, Err(FundError::Timeout { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(log.count(Level::ERROR), 1);
        assert_eq!(log.count(Level::WARN), 2);
    }
}
