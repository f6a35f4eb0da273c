//! Trait definitions for the recast content pipeline.
//!
//! The pipeline only ever talks to a language model through [`TextGenerator`],
//! so provider clients, resilience decorators and test stubs are interchangeable.

use async_trait::async_trait;
use recast_core::Role;
use recast_error::GenerationError;
use std::sync::Arc;

/// A capability that turns a role and an instruction into generated text.
///
/// Implementations are opaque network calls with their own latency and
/// failure characteristics. Retries, timeouts and rate limiting belong to
/// implementations (or decorators around them), never to callers.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `instruction` while speaking as `role`.
    ///
    /// # Errors
    ///
    /// Returns a [`GenerationError`] on network, quota or response failures.
    async fn generate(&self, role: &Role, instruction: &str) -> Result<String, GenerationError>;

    /// Provider name for logging.
    fn provider_name(&self) -> &str;

    /// Model name for logging.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    async fn generate(&self, role: &Role, instruction: &str) -> Result<String, GenerationError> {
        (**self).generate(role, instruction).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}

#[async_trait]
impl<T: TextGenerator + ?Sized> TextGenerator for Box<T> {
    async fn generate(&self, role: &Role, instruction: &str) -> Result<String, GenerationError> {
        (**self).generate(role, instruction).await
    }

    fn provider_name(&self) -> &str {
        (**self).provider_name()
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
