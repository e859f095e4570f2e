use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Delays between attempts of a retried request.
///
/// The first attempt runs immediately. Each entry of `delays` buys one more
/// attempt after that pause; `tail_retries` further attempts follow at
/// `tail_delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Backoff {
    delays: Vec<Duration>,
    tail_retries: usize,
    tail_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self::new(vec![
            Duration::from_millis(500),
            Duration::from_secs(1),
            Duration::from_secs(2),
        ])
    }
}

impl Backoff {
    #[must_use]
    pub const fn new(delays: Vec<Duration>) -> Self {
        Self {
            delays,
            tail_retries: 0,
            tail_delay: Duration::ZERO,
        }
    }

    /// Single attempt, no retries.
    #[must_use]
    pub const fn none() -> Self {
        Self::new(Vec::new())
    }

    #[must_use]
    pub const fn with_tail(mut self, retries: usize, delay: Duration) -> Self {
        self.tail_retries = retries;
        self.tail_delay = delay;
        self
    }

    /// Total number of attempts, the first one included.
    #[must_use]
    pub fn attempts(&self) -> usize {
        1 + self.delays.len() + self.tail_retries
    }

    /// Pause before retry number `retry` (0-based), or `None` once exhausted.
    fn delay_before(&self, retry: usize) -> Option<Duration> {
        self.delays.get(retry).copied().or_else(|| {
            (retry < self.delays.len() + self.tail_retries).then_some(self.tail_delay)
        })
    }
}

/// Run `operation` until it succeeds or `backoff` is exhausted. The last
/// error is returned.
pub async fn retry_with_backoff<F, Fut, T, E>(backoff: &Backoff, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
{
    let total = backoff.attempts();
    let mut retry = 0;
    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                let Some(delay) = backoff.delay_before(retry) else {
                    return Err(e);
                };
                retry += 1;
                warn!(
                    "Request failed (attempt {retry}/{total}): {e}. Retrying after {}ms...",
                    delay.as_millis()
                );
                sleep(delay).await;
            }
        }
    }
}
