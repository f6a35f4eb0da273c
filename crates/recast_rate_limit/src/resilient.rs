//! Timeout, retry and rate limiting around any text generator.

use crate::{RateLimitError, RateLimitErrorKind, RateLimiter, RetryConfig, estimate_tokens};
use async_trait::async_trait;
use recast_core::Role;
use recast_error::{GenerationError, GenerationErrorKind, RetryableError};
use recast_interface::TextGenerator;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, instrument, warn};

/// A closed limiter never reopens and is reported as permanent.
#[track_caller]
fn limiter_error(err: RateLimitError) -> GenerationError {
    match err.kind() {
        RateLimitErrorKind::Closed => GenerationError::new(GenerationErrorKind::LimiterClosed),
        _ => GenerationError::new(GenerationErrorKind::RateLimited(err.to_string())),
    }
}

/// Decorates a [`TextGenerator`] with production safeguards.
///
/// Each attempt waits for a rate limit permit (when a limiter is attached),
/// runs under the configured timeout, and retryable failures are retried with
/// jittered exponential backoff. Permanent failures return immediately.
pub struct ResilientGenerator<G> {
    inner: G,
    retry: RetryConfig,
    limiter: Option<Arc<RateLimiter>>,
}

impl<G: TextGenerator> ResilientGenerator<G> {
    /// Wraps `inner` with the given retry policy and no rate limiter.
    pub fn new(inner: G, retry: RetryConfig) -> Self {
        Self {
            inner,
            retry,
            limiter: None,
        }
    }

    /// Attaches a rate limiter, which may be shared with other generators.
    pub fn with_rate_limiter(mut self, limiter: Arc<RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// The wrapped generator.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// The retry policy.
    pub fn retry(&self) -> &RetryConfig {
        &self.retry
    }

    async fn attempt(&self, role: &Role, instruction: &str) -> Result<String, GenerationError> {
        let _guard = match &self.limiter {
            Some(limiter) => {
                let tokens = estimate_tokens(instruction) + estimate_tokens(role.persona());
                let guard = limiter.acquire(tokens).await.map_err(limiter_error)?;
                Some(guard)
            }
            None => None,
        };

        let timeout = self.retry.request_timeout();
        match tokio::time::timeout(timeout, self.inner.generate(role, instruction)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::new(GenerationErrorKind::Timeout(
                timeout.as_millis() as u64,
            ))),
        }
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for ResilientGenerator<G> {
    #[instrument(
        skip(self, role, instruction),
        fields(
            provider = self.inner.provider_name(),
            role = %role.name(),
            instruction_len = instruction.len()
        )
    )]
    async fn generate(&self, role: &Role, instruction: &str) -> Result<String, GenerationError> {
        let attempts = AtomicUsize::new(0);
        let attempts = &attempts;

        let result = Retry::spawn(self.retry.delays(), move || async move {
            let attempt = attempts.fetch_add(1, Ordering::Relaxed) + 1;
            match self.attempt(role, instruction).await {
                Ok(text) => Ok(text),
                Err(e) if e.is_retryable() => {
                    warn!(attempt, error = %e, "Generation failed, will retry if attempts remain");
                    Err(RetryError::transient(e))
                }
                Err(e) => {
                    debug!(attempt, error = %e, "Generation failed permanently");
                    Err(RetryError::permanent(e))
                }
            }
        })
        .await;

        let attempts = attempts.load(Ordering::Relaxed);
        if attempts > 1 {
            debug!(attempts, success = result.is_ok(), "Generation finished after retries");
        }
        result
    }

    fn provider_name(&self) -> &str {
        self.inner.provider_name()
    }

    fn model_name(&self) -> &str {
        self.inner.model_name()
    }
}
