use std::collections::hash_map::RandomState;
use std::future::Future;
use std::hash::BuildHasher;
use std::time::Duration;
use tracing::{error, warn};

/// Exponential backoff between connection attempts.
///
/// `retries` bounds the number of sleeps, so an operation runs at most
/// `retries + 1` times. Each delay doubles from `first` up to `ceiling`.
#[derive(Debug, Clone)]
pub struct Backoff {
    pub retries: u32,
    pub first: Duration,
    pub ceiling: Duration,
    /// Draw each sleep uniformly from the upper half of its nominal delay
    pub jitter: bool,
}

impl Default for Backoff {
    /// 5 retries from 200ms, capped at 5s, jittered.
    fn default() -> Self {
        Self {
            retries: 5,
            first: Duration::from_millis(200),
            ceiling: Duration::from_secs(5),
            jitter: true,
        }
    }
}

impl Backoff {
    /// Nominal delays before each retry, in order.
    pub fn delays(&self) -> impl Iterator<Item = Duration> + '_ {
        let first = self.first.min(self.ceiling);
        std::iter::successors(Some(first), move |prev| {
            Some(prev.saturating_mul(2).min(self.ceiling))
        })
        .take(self.retries as usize)
    }

    /// What the retry loop actually sleeps: [`delays`](Self::delays),
    /// jittered when enabled.
    fn schedule(&self) -> impl Iterator<Item = Duration> + '_ {
        let hasher = RandomState::new();
        self.delays().enumerate().map(move |(n, delay)| {
            if self.jitter {
                upper_half(delay, hasher.hash_one(n))
            } else {
                delay
            }
        })
    }
}

/// A point in `[delay / 2, delay]` picked by `seed`.
fn upper_half(delay: Duration, seed: u64) -> Duration {
    let fraction = (seed % 1_000) as f64 / 1_000.0;
    delay / 2 + (delay / 2).mul_f64(fraction)
}

/// Run `operation` until it succeeds or `policy` runs out of delays.
///
/// The error of the final attempt is returned unchanged.
///
/// ```ignore
/// let client = retry_with_backoff(&Backoff::default(), || connect(&config)).await?;
/// ```
pub async fn retry_with_backoff<F, Fut, T, E>(policy: &Backoff, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut delays = policy.schedule();
    let mut attempt = 1u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        let Some(delay) = delays.next() else {
            error!(attempt, error = %err, "Giving up");
            return Err(err);
        };

        warn!(attempt, error = %err, retry_in = ?delay, "Attempt failed");
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn quick(retries: u32) -> Backoff {
        Backoff {
            retries,
            first: Duration::from_millis(1),
            ceiling: Duration::from_millis(4),
            jitter: false,
        }
    }

    #[test]
    fn test_delays_double_until_ceiling() {
        let policy = Backoff {
            retries: 5,
            first: Duration::from_millis(100),
            ceiling: Duration::from_millis(350),
            jitter: false,
        };

        let millis: Vec<u128> = policy.delays().map(|d| d.as_millis()).collect();
        assert_eq!(millis, vec![100, 200, 350, 350, 350]);
    }

    #[test]
    fn test_zero_retries_has_no_delays() {
        assert_eq!(quick(0).delays().count(), 0);
    }

    #[test]
    fn test_jittered_schedule_stays_in_upper_half() {
        let policy = Backoff {
            retries: 20,
            first: Duration::from_millis(1000),
            ceiling: Duration::from_millis(1000),
            jitter: true,
        };

        for delay in policy.schedule() {
            assert!(delay >= Duration::from_millis(500));
            assert!(delay <= Duration::from_millis(1000));
        }
    }

    #[tokio::test]
    async fn test_recovers_after_transient_failures() {
        let calls = AtomicU32::new(0);

        let result = retry_with_backoff(&quick(3), || {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if call < 2 {
                    Err(format!("server selection timeout #{}", call + 1))
                } else {
                    Ok("connected")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "connected");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_returns_last_error_when_exhausted() {
        let calls = AtomicU32::new(0);

        let result = retry_with_backoff(&quick(2), || {
            let call = calls.fetch_add(1, Ordering::SeqCst);
            async move { Err::<(), _>(format!("connection refused #{}", call + 1)) }
        })
        .await;

        assert_eq!(result.unwrap_err(), "connection refused #3");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
