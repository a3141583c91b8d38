//! Bounded retry with exponential backoff and jitter
//!
//! The delay for attempt `n` is `min(ceiling, 2^(n/2))` units plus a uniform
//! jitter in `[0, max_jitter)` units. It is slept after every attempt,
//! successful ones included, so consecutive page requests are paced too.
//! Only retryable errors lead to another attempt.

use crate::config::MAX_ATTEMPTS;
use crate::error::{Error, Result};
use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Shape of the backoff curve
#[derive(Debug, Clone, PartialEq)]
pub struct BackoffConfig {
    /// Length of one backoff unit
    pub unit: Duration,
    /// Upper bound of the exponential term, in units
    pub ceiling: f64,
    /// Exclusive upper bound of the jitter term, in units
    pub max_jitter: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            unit: Duration::from_secs(1),
            ceiling: 30.0,
            max_jitter: 5.0,
        }
    }
}

impl BackoffConfig {
    /// A curve that never sleeps
    pub fn immediate() -> Self {
        Self {
            unit: Duration::ZERO,
            ..Self::default()
        }
    }

    /// Largest delay this curve can produce, in units
    pub fn max_delay_units(&self) -> f64 {
        self.ceiling + self.max_jitter
    }

    /// Exponential term for an attempt, in units
    pub fn exponential_units(&self, attempt: u32) -> f64 {
        2f64.powf(f64::from(attempt) / 2.0).min(self.ceiling)
    }

    /// Delay for an attempt given an explicit jitter (in units)
    ///
    /// Jitter outside `[0, max_jitter)` is clamped.
    pub fn delay_with_jitter(&self, attempt: u32, jitter: f64) -> Duration {
        let jitter = jitter.clamp(0.0, self.max_jitter.max(0.0));
        self.unit.mul_f64(self.exponential_units(attempt) + jitter)
    }

    /// Delay for an attempt with random jitter
    pub fn delay(&self, attempt: u32) -> Duration {
        let jitter = if self.max_jitter > 0.0 {
            rand::thread_rng().gen_range(0.0..self.max_jitter)
        } else {
            0.0
        };
        self.delay_with_jitter(attempt, jitter)
    }
}

/// Runs a fallible async operation up to `max_attempts` times
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    backoff: BackoffConfig,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS, BackoffConfig::default())
    }
}

impl RetryPolicy {
    /// Create a policy; `max_attempts` below one is treated as one
    pub fn new(max_attempts: u32, backoff: BackoffConfig) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Maximum number of attempts
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Backoff curve
    pub fn backoff(&self) -> &BackoffConfig {
        &self.backoff
    }

    /// Execute `operation`, passing it the 1-based attempt number
    ///
    /// Returns the first success. A non-retryable error is returned as is;
    /// a retryable error on the last attempt is wrapped in
    /// `Error::RetriesExhausted`.
    ///
    /// The backoff delay is slept after every attempt except the last
    /// failed one, which returns right away.
    pub async fn execute<F, Fut, T>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;

        loop {
            let outcome = operation(attempt).await;

            match outcome {
                Ok(value) => {
                    let delay = self.backoff.delay(attempt);
                    debug!(attempt, delay_ms = delay.as_millis() as u64, "Attempt succeeded");
                    tokio::time::sleep(delay).await;
                    return Ok(value);
                }
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) if attempt >= self.max_attempts => {
                    return Err(Error::RetriesExhausted {
                        attempts: attempt,
                        source: Box::new(e),
                    });
                }
                Err(e) => {
                    let delay = self.backoff.delay(attempt);
                    warn!(
                        error = %e,
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        "Attempt failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}
