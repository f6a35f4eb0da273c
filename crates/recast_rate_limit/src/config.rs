//! Rate limit and retry settings.

use crate::{RateLimitError, RateLimitErrorKind};
use derive_getters::Getters;
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};

/// Provider quota. `None` means unlimited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_", strip_option)]
pub struct RateLimitConfig {
    /// Requests per minute
    #[serde(default)]
    rpm: Option<u32>,
    /// Tokens per minute
    #[serde(default)]
    tpm: Option<u64>,
    /// Requests per day
    #[serde(default)]
    rpd: Option<u32>,
    /// Concurrent in-flight requests
    #[serde(default)]
    max_concurrent: Option<u32>,
}

impl RateLimitConfig {
    /// A configuration that never blocks.
    pub fn unlimited() -> Self {
        Self::default()
    }

    /// Rejects limits of zero, which would block forever.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitErrorKind::InvalidLimit`] naming the first zero limit.
    pub fn validate(&self) -> Result<(), RateLimitError> {
        let zero = [
            ("rpm", self.rpm.map(u64::from)),
            ("tpm", self.tpm),
            ("rpd", self.rpd.map(u64::from)),
            ("max_concurrent", self.max_concurrent.map(u64::from)),
        ]
        .into_iter()
        .find(|(_, value)| *value == Some(0));

        match zero {
            Some((name, _)) => Err(RateLimitError::new(RateLimitErrorKind::InvalidLimit {
                name: name.to_string(),
            })),
            None => Ok(()),
        }
    }
}

fn default_max_retries() -> usize {
    3
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

fn default_max_backoff_ms() -> u64 {
    30_000
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// Retry and timeout policy applied to every generator call.
///
/// # Examples
///
/// ```
/// use recast_rate_limit::RetryConfig;
///
/// let retry = RetryConfig::default().with_max_retries(5usize);
/// assert_eq!(*retry.max_retries(), 5);
/// assert_eq!(retry.delays().count(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, Setters)]
#[setters(prefix = "with_")]
pub struct RetryConfig {
    /// Retries after the first attempt
    #[serde(default = "default_max_retries")]
    max_retries: usize,
    /// Delay before the first retry
    #[serde(default = "default_initial_backoff_ms")]
    initial_backoff_ms: u64,
    /// Cap on any single delay
    #[serde(default = "default_max_backoff_ms")]
    max_backoff_ms: u64,
    /// Deadline for a single attempt
    #[serde(default = "default_request_timeout_secs")]
    request_timeout_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl RetryConfig {
    /// A policy that makes exactly one attempt.
    pub fn no_retries() -> Self {
        Self::default().with_max_retries(0)
    }

    /// Deadline for a single attempt.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Checks that the delays and timeout are usable.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitErrorKind::InvalidRetry`] for a zero timeout or a
    /// cap below the initial delay.
    pub fn validate(&self) -> Result<(), RateLimitError> {
        if self.request_timeout_secs == 0 {
            return Err(RateLimitError::new(RateLimitErrorKind::InvalidRetry(
                "request_timeout_secs must be greater than zero".to_string(),
            )));
        }
        if self.max_backoff_ms < self.initial_backoff_ms {
            return Err(RateLimitError::new(RateLimitErrorKind::InvalidRetry(format!(
                "max_backoff_ms ({}) is below initial_backoff_ms ({})",
                self.max_backoff_ms, self.initial_backoff_ms
            ))));
        }
        Ok(())
    }

    /// Delays between attempts: exponential from `initial_backoff_ms`,
    /// doubled each time, capped at `max_backoff_ms`, with full jitter.
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        // from_millis(2) doubles per step; the factor scales the first delay.
        ExponentialBackoff::from_millis(2)
            .factor((self.initial_backoff_ms / 2).max(1))
            .max_delay(Duration::from_millis(self.max_backoff_ms))
            .map(jitter)
            .take(self.max_retries)
    }
}
