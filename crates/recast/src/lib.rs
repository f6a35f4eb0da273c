//! Rewrite one piece of content for several social platforms.
//!
//! Each platform gets its own generate → critique → rewrite sequence run
//! against a language model. This crate ties the workspace together:
//! configuration loading, generator construction, logging setup and output
//! rendering, plus re-exports of the member crates.
//!
//! ```no_run
//! use recast::{RecastConfig, RecastResult, rewrite};
//!
//! # async fn demo() -> RecastResult<()> {
//! let config = RecastConfig::load(None)?;
//! let result = rewrite(&config, "We just shipped version 2.0!").await?;
//! for (platform, text) in result.iter() {
//!     println!("{}: {}", platform.output_key(), text);
//! }
//! # Ok(())
//! # }
//! ```

mod generator;
mod logging;
mod output;
mod rewrite;
mod settings;

pub use generator::build_generator;
pub use logging::{LogFormat, init_logging};
pub use output::{OutputFormat, render};
pub use rewrite::rewrite;
pub use settings::{DEFAULT_API_KEY_ENV, FALLBACK_API_KEY_ENV, Provider, RecastConfig};

pub use recast_core::*;
pub use recast_error::*;
pub use recast_interface::*;
pub use recast_models::{GeminiClient, OpenAICompatibleClient};
pub use recast_pipeline::{
    FailurePolicy, PipelineConfig, PipelineCoordinator, PlatformProfile, RunReport,
    SequenceExecution, SequenceRunner, StepExecution, catalog,
};
pub use recast_rate_limit::{
    RateLimitConfig, RateLimiter, ResilientGenerator, RetryConfig, estimate_tokens,
};
