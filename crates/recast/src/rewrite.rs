//! Single-call entry point from settings to platform outputs.

use crate::{RecastConfig, build_generator};
use recast_core::RunResult;
use recast_error::RecastResult;
use recast_pipeline::PipelineCoordinator;
use tracing::{debug, instrument};

/// Rewrites `content` for every platform in the default catalogue using the
/// generator and pipeline settings from `config`.
///
/// Empty content returns an empty result before any generator is built, so
/// it succeeds even without credentials.
///
/// # Errors
///
/// Returns a [`recast_error::RecastError`] wrapping the generator
/// construction failure or the pipeline failure selected by the configured
/// failure policy.
#[instrument(skip_all, fields(content_len = content.len()))]
pub async fn rewrite(config: &RecastConfig, content: &str) -> RecastResult<RunResult> {
    if content.is_empty() {
        debug!("Empty content, nothing to rewrite");
        return Ok(RunResult::new());
    }

    let generator = build_generator(config)?;
    let pipeline = PipelineCoordinator::new(generator)?.with_config(config.pipeline().clone());
    Ok(pipeline.process(content).await?)
}
