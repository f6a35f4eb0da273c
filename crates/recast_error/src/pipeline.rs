//! Pipeline coordination errors.

use crate::GenerationError;

/// Specific error conditions for pipeline runs.
#[derive(Debug, Clone, derive_more::Display)]
pub enum PipelineErrorKind {
    /// Content was empty and the caller asked for strict validation
    #[display("Content cannot be empty")]
    EmptyContent,
    /// A step of a platform sequence failed
    #[display("Platform '{platform}' failed at step {step} ({step_kind}): {source}")]
    Sequence {
        /// Platform whose sequence failed
        platform: String,
        /// Zero-based index of the failing step
        step: usize,
        /// Kind of the failing step
        step_kind: String,
        /// Underlying generator failure
        source: GenerationError,
    },
    /// A spawned sequence task panicked or was aborted
    #[display("Sequence task for '{platform}' did not complete: {message}")]
    TaskJoin {
        /// Platform whose task was lost
        platform: String,
        /// Join failure description
        message: String,
    },
}

/// Pipeline error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Pipeline Error: {} at line {} in {}", kind, line, file)]
pub struct PipelineError {
    /// The specific error condition
    pub kind: PipelineErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl PipelineError {
    /// Create a new PipelineError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PipelineErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &PipelineErrorKind {
        &self.kind
    }

    /// The generator error behind a sequence failure, if any.
    pub fn generation_error(&self) -> Option<&GenerationError> {
        match &self.kind {
            PipelineErrorKind::Sequence { source, .. } => Some(source),
            _ => None,
        }
    }
}
