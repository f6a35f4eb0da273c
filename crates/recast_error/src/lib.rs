//! Error types for the recast content pipeline.
//!
//! Every error records the source location where it was constructed, so a
//! failure deep inside a platform sequence can be traced back without a backtrace.

mod config;
mod generation;
mod model;
mod pipeline;

pub use config::ConfigError;
pub use generation::{GenerationError, GenerationErrorKind, RetryableError};
pub use model::{ModelError, ModelErrorKind};
pub use pipeline::{PipelineError, PipelineErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum RecastErrorKind {
    /// Startup configuration error
    Config(ConfigError),
    /// Text generation failed
    Generation(GenerationError),
    /// Role, step or sequence construction failed
    Model(ModelError),
    /// Pipeline coordination failed
    Pipeline(PipelineError),
}

impl std::fmt::Display for RecastErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecastErrorKind::Config(e) => write!(f, "{}", e),
            RecastErrorKind::Generation(e) => write!(f, "{}", e),
            RecastErrorKind::Model(e) => write!(f, "{}", e),
            RecastErrorKind::Pipeline(e) => write!(f, "{}", e),
        }
    }
}

/// Recast error with kind discrimination.
///
/// # Examples
///
/// ```
/// use recast_error::{ConfigError, RecastError, RecastErrorKind};
///
/// let err: RecastError = ConfigError::invalid("model", "cannot be empty").into();
/// assert!(matches!(err.kind(), RecastErrorKind::Config(_)));
/// ```
#[derive(Debug)]
pub struct RecastError(Box<RecastErrorKind>);

impl RecastError {
    /// Create a new error from a kind.
    pub fn new(kind: RecastErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RecastErrorKind {
        &self.0
    }
}

impl std::fmt::Display for RecastError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Recast Error: {}", self.0)
    }
}

impl std::error::Error for RecastError {}

impl<T> From<T> for RecastError
where
    T: Into<RecastErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for recast operations.
pub type RecastResult<T> = std::result::Result<T, RecastError>;
