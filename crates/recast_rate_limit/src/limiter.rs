//! Rate limiter implementation using governor and Tokio Semaphore.
//!
//! Request and token quotas are enforced with governor's GCRA limiters;
//! concurrent in-flight requests are bounded with a semaphore.

use crate::{RateLimitConfig, RateLimitError, RateLimitErrorKind};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tracing::{debug, instrument, warn};

type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

const SECONDS_PER_DAY: u64 = 86_400;

/// Rate limiter that enforces every quota in a [`RateLimitConfig`].
///
/// # Example
///
/// ```
/// use recast_rate_limit::{RateLimitConfig, RateLimiter};
///
/// let limiter = RateLimiter::new(&RateLimitConfig::unlimited().with_max_concurrent(1));
/// let guard = limiter.try_acquire(10).expect("first slot is free");
/// assert!(limiter.try_acquire(10).is_none());
/// drop(guard);
/// assert!(limiter.try_acquire(10).is_some());
/// ```
pub struct RateLimiter {
    rpm_limiter: Option<DirectRateLimiter>,
    tpm_limiter: Option<DirectRateLimiter>,
    rpd_limiter: Option<DirectRateLimiter>,
    /// Largest single TPM reservation governor will accept
    tpm_capacity: Option<NonZeroU32>,
    concurrent_semaphore: Arc<Semaphore>,
}

impl RateLimiter {
    /// Create a limiter enforcing every non-`None` limit in `config`.
    ///
    /// Zero limits are treated as unlimited; call
    /// [`RateLimitConfig::validate`] first to reject them.
    pub fn new(config: &RateLimitConfig) -> Self {
        let rpm_limiter = config
            .rpm()
            .and_then(NonZeroU32::new)
            .map(|n| GovernorRateLimiter::direct(Quota::per_minute(n)));

        // Governor counts in u32; very large TPM values are capped.
        let tpm_capacity = config
            .tpm()
            .and_then(|tpm| NonZeroU32::new(tpm.min(u32::MAX as u64) as u32));
        let tpm_limiter =
            tpm_capacity.map(|n| GovernorRateLimiter::direct(Quota::per_minute(n)));

        // Whole daily allowance available as a burst, replenished evenly over 24h.
        let rpd_limiter = config.rpd().and_then(NonZeroU32::new).and_then(|n| {
            Quota::with_period(Duration::from_secs(SECONDS_PER_DAY) / n.get())
                .map(|quota| GovernorRateLimiter::direct(quota.allow_burst(n)))
        });

        let max_concurrent = config
            .max_concurrent()
            .filter(|n| *n > 0)
            .map(|n| n as usize)
            .unwrap_or(Semaphore::MAX_PERMITS);

        debug!(
            rpm = ?config.rpm(),
            tpm = ?config.tpm(),
            rpd = ?config.rpd(),
            max_concurrent,
            "Created rate limiter"
        );

        Self {
            rpm_limiter,
            tpm_limiter,
            rpd_limiter,
            tpm_capacity,
            concurrent_semaphore: Arc::new(Semaphore::new(max_concurrent)),
        }
    }

    /// Wait until every limit allows a request of `estimated_tokens`.
    ///
    /// The concurrency slot is acquired last so a waiting request does not hold
    /// a slot while it sleeps on a quota.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitErrorKind::Closed`] if the semaphore was closed.
    #[instrument(skip(self))]
    pub async fn acquire(&self, estimated_tokens: u64) -> Result<RateLimiterGuard, RateLimitError> {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.until_ready().await;
        }

        if let Some(limiter) = &self.tpm_limiter {
            let tokens = self.clamp_tokens(estimated_tokens);
            if limiter.until_n_ready(tokens).await.is_err() {
                warn!(estimated_tokens, "Request exceeds TPM burst capacity, not throttling");
            }
        }

        if let Some(limiter) = &self.rpd_limiter {
            limiter.until_ready().await;
        }

        let permit = self
            .concurrent_semaphore
            .clone()
            .acquire_owned()
            .await
            .map_err(|_| RateLimitError::new(RateLimitErrorKind::Closed))?;

        Ok(RateLimiterGuard { _permit: permit })
    }

    /// Try to acquire without waiting.
    ///
    /// Returns `None` if any limit would block.
    pub fn try_acquire(&self, estimated_tokens: u64) -> Option<RateLimiterGuard> {
        if let Some(limiter) = &self.rpm_limiter {
            limiter.check().ok()?;
        }

        if let Some(limiter) = &self.tpm_limiter {
            let tokens = self.clamp_tokens(estimated_tokens);
            limiter.check_n(tokens).ok()?.ok()?;
        }

        if let Some(limiter) = &self.rpd_limiter {
            limiter.check().ok()?;
        }

        let permit = self.concurrent_semaphore.clone().try_acquire_owned().ok()?;
        Some(RateLimiterGuard { _permit: permit })
    }

    /// Number of free concurrency slots.
    pub fn available_slots(&self) -> usize {
        self.concurrent_semaphore.available_permits()
    }

    fn clamp_tokens(&self, estimated_tokens: u64) -> NonZeroU32 {
        let requested = estimated_tokens.clamp(1, u32::MAX as u64) as u32;
        let requested = NonZeroU32::new(requested).unwrap_or(NonZeroU32::MIN);
        match self.tpm_capacity {
            Some(capacity) if requested > capacity => capacity,
            _ => requested,
        }
    }
}

/// RAII guard releasing the concurrency slot when dropped, even if the
/// request fails or panics.
#[derive(Debug)]
pub struct RateLimiterGuard {
    _permit: OwnedSemaphorePermit,
}
