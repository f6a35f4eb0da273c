//! The coordinator over a retrying generator.

use async_trait::async_trait;
use recast_core::{Platform, Role};
use recast_error::{GenerationError, GenerationErrorKind};
use recast_interface::TextGenerator;
use recast_pipeline::PipelineCoordinator;
use recast_rate_limit::{RateLimitConfig, RateLimiter, ResilientGenerator, RetryConfig};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// The first attempt at every distinct instruction fails with 503.
#[derive(Default)]
struct UnstableGenerator {
    seen: Mutex<HashSet<String>>,
    calls: AtomicUsize,
}

#[async_trait]
impl TextGenerator for UnstableGenerator {
    async fn generate(&self, role: &Role, instruction: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let first_attempt = self.seen.lock().unwrap().insert(instruction.to_string());
        if first_attempt {
            return Err(GenerationError::new(GenerationErrorKind::Http {
                status_code: 503,
                message: "overloaded".to_string(),
            }));
        }
        Ok(format!("{} output", role.name()))
    }

    fn provider_name(&self) -> &str {
        "unstable"
    }

    fn model_name(&self) -> &str {
        "unstable-1"
    }
}

#[tokio::test]
async fn test_transient_failures_absorbed_below_pipeline() {
    let retry = RetryConfig::default()
        .with_max_retries(3usize)
        .with_initial_backoff_ms(2u64)
        .with_max_backoff_ms(10u64);
    let limiter = Arc::new(RateLimiter::new(
        &RateLimitConfig::unlimited().with_max_concurrent(2),
    ));
    let generator =
        ResilientGenerator::new(UnstableGenerator::default(), retry).with_rate_limiter(limiter);
    let pipeline = PipelineCoordinator::new(generator).unwrap();

    let result = pipeline.process("Big news: we're hiring!").await.unwrap();

    assert_eq!(result.len(), 3);
    assert_eq!(
        result.get(Platform::LinkedIn),
        Some("LinkedIn Content Editor output")
    );
    // Nine steps, each failing once before succeeding.
    let calls = pipeline.generator().inner().calls.load(Ordering::SeqCst);
    assert_eq!(calls, 18);
}
