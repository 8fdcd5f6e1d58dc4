use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use log::warn;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::time::sleep;

use super::cancel::{CancelSignal, Cancelled};

/// Exponential backoff with jitter.
///
/// The `n`th retry (counting from 0) waits `base_delay * 2^n` plus a
/// uniformly drawn jitter in `0..=max_jitter`. An operation is invoked at
/// most `max_retries + 1` times; the last error is returned unchanged.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    max_jitter: Duration,
    rng: Option<Arc<Mutex<StdRng>>>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
            max_jitter: Duration::from_millis(1000),
            rng: None,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries,
            base_delay,
            ..Self::default()
        }
    }

    /// A policy that makes exactly one attempt
    pub fn none() -> Self {
        Self::new(0, Duration::ZERO)
    }

    pub fn with_max_jitter(mut self, max_jitter: Duration) -> Self {
        self.max_jitter = max_jitter;
        self
    }

    /// Draw jitter from a seeded generator instead of the thread RNG
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Some(Arc::new(Mutex::new(StdRng::seed_from_u64(seed))));
        self
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Delay before retry number `attempt` (0-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        self.base_delay.saturating_mul(factor) + self.jitter()
    }

    fn jitter(&self) -> Duration {
        let max = self.max_jitter.as_millis() as u64;
        if max == 0 {
            return Duration::ZERO;
        }
        let millis = match &self.rng {
            Some(rng) => match rng.lock() {
                Ok(mut rng) => rng.gen_range(0..=max),
                Err(poisoned) => poisoned.into_inner().gen_range(0..=max),
            },
            None => rand::thread_rng().gen_range(0..=max),
        };
        Duration::from_millis(millis)
    }

    /// Run `operation` until it succeeds or the retries are used up.
    pub async fn execute<F, Fut, T, E>(&self, mut operation: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let mut attempt = 0;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt >= self.max_retries => {
                    if self.max_retries > 0 {
                        warn!("Operation failed after {} attempts: {}", attempt + 1, err);
                    }
                    return Err(err);
                }
                Err(err) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        "Operation failed (attempt {}): {}, retrying in {:?}",
                        attempt + 1,
                        err,
                        delay
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Like [`execute`](Self::execute), but stops as soon as `cancel`
    /// fires and reports each scheduled retry to `on_retry` with the
    /// 1-based retry number.
    pub async fn execute_with<F, Fut, T, E, R>(
        &self,
        cancel: &CancelSignal,
        mut on_retry: R,
        mut operation: F,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display + From<Cancelled>,
        R: FnMut(u32, &E),
    {
        let mut attempt = 0;
        loop {
            let result = cancel.guard(operation()).await?;
            match result {
                Ok(value) => return Ok(value),
                Err(err) if attempt >= self.max_retries => {
                    if self.max_retries > 0 {
                        warn!("Operation failed after {} attempts: {}", attempt + 1, err);
                    }
                    return Err(err);
                }
                Err(err) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        "Operation failed (attempt {}): {}, retrying in {:?}",
                        attempt + 1,
                        err,
                        delay
                    );
                    attempt += 1;
                    on_retry(attempt, &err);
                    cancel.guard(sleep(delay)).await?;
                }
            }
        }
    }
}
