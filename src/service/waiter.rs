//! Blocks the run until the database accepts a connection or the wait
//! ceiling is reached.

use crate::error::SmokeError;
use backon::{ConstantBuilder, Retryable};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{info, warn};

pub const RETRY_INTERVAL: Duration = Duration::from_secs(2);
pub const MAXIMUM_WAIT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Pause between a failed attempt and the next one.
    pub interval: Duration,
    /// Once this much time has passed since the first attempt, a failure is final.
    pub ceiling: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            interval: RETRY_INTERVAL,
            ceiling: MAXIMUM_WAIT,
        }
    }
}

impl WaitPolicy {
    fn backoff(&self) -> ConstantBuilder {
        ConstantBuilder::default()
            .with_delay(self.interval)
            .with_max_times(usize::MAX)
    }
}

/// Run `attempt` until it succeeds. Every error is treated as transient; the
/// elapsed-time check happens after each failure, before sleeping.
pub async fn wait_for<T, F, Fut>(policy: &WaitPolicy, mut attempt: F) -> Result<T, SmokeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let start = Instant::now();
    let mut attempts = 0usize;

    let result = (|| {
        attempts += 1;
        attempt()
    })
    .retry(policy.backoff())
    .sleep(tokio::time::sleep)
    .when(|_: &sqlx::Error| start.elapsed() < policy.ceiling)
    .notify(|err: &sqlx::Error, dur: Duration| {
        warn!(error = %err, "database not reachable yet, retrying in {:?}", dur);
    })
    .await;

    let elapsed = start.elapsed();
    match result {
        Ok(value) => {
            info!(attempts, elapsed = ?elapsed, "database connection established");
            Ok(value)
        }
        Err(source) => Err(SmokeError::ConnectTimeout {
            attempts,
            elapsed,
            source,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io;

    fn refused() -> sqlx::Error {
        sqlx::Error::Io(io::Error::from(io::ErrorKind::ConnectionRefused))
    }

    #[tokio::test(start_paused = true)]
    async fn first_success_needs_no_retry() {
        let calls = Cell::new(0);
        let value = wait_for(&WaitPolicy::default(), || {
            calls.set(calls.get() + 1);
            async { Ok::<_, sqlx::Error>("conn") }
        })
        .await
        .expect("connection should succeed");

        assert_eq!(value, "conn");
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_two_failures() {
        let calls = Cell::new(0);
        let start = Instant::now();
        let value = wait_for(&WaitPolicy::default(), || {
            let n = calls.get() + 1;
            calls.set(n);
            async move { if n <= 2 { Err(refused()) } else { Ok(n) } }
        })
        .await
        .expect("third attempt should succeed");

        assert_eq!(value, 3);
        assert_eq!(calls.get(), 3);
        assert_eq!(start.elapsed(), 2 * RETRY_INTERVAL);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_once_the_ceiling_is_reached() {
        let calls = Cell::new(0);
        let start = Instant::now();
        let err = wait_for(&WaitPolicy::default(), || {
            calls.set(calls.get() + 1);
            async { Err::<(), _>(refused()) }
        })
        .await
        .expect_err("an unreachable database must time out");

        // Attempts at 0s, 2s, ..., 30s; the failure at 30s is final.
        assert_eq!(calls.get(), 16);
        assert_eq!(start.elapsed(), MAXIMUM_WAIT);
        match err {
            SmokeError::ConnectTimeout {
                attempts, elapsed, ..
            } => {
                assert_eq!(attempts, 16);
                assert_eq!(elapsed, MAXIMUM_WAIT);
            }
            other => panic!("expected ConnectTimeout, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn honours_a_custom_policy() {
        let policy = WaitPolicy {
            interval: Duration::from_millis(500),
            ceiling: Duration::from_secs(1),
        };
        let calls = Cell::new(0);
        let result = wait_for(&policy, || {
            calls.set(calls.get() + 1);
            async { Err::<(), _>(refused()) }
        })
        .await;

        assert!(matches!(result, Err(SmokeError::ConnectTimeout { .. })));
        assert_eq!(calls.get(), 3);
    }
}
