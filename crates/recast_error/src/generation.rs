//! Text generation errors and retry classification.

/// Failure conditions reported by a text generator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API key not found in the environment; holds the variable name
    #[display("API key not set (looked in {_0})")]
    MissingApiKey(String),
    /// Provider answered with a non-success status
    #[display("HTTP {status_code} error: {message}")]
    Http {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason
        message: String,
    },
    /// Request never reached the provider or the connection dropped
    #[display("Transport error: {_0}")]
    Transport(String),
    /// The call exceeded its deadline
    #[display("Generation timed out after {_0} ms")]
    Timeout(u64),
    /// Local rate limiter refused the request
    #[display("Rate limited: {_0}")]
    RateLimited(String),
    /// Response body could not be interpreted
    #[display("Malformed response: {_0}")]
    MalformedResponse(String),
    /// Response contained no text
    #[display("Provider returned no text")]
    EmptyResponse,
    /// Request body could not be assembled before sending
    #[display("Invalid request: {_0}")]
    InvalidRequest(String),
    /// The shared rate limiter was shut down and will not admit requests
    #[display("Rate limiter closed")]
    LimiterClosed,
}

impl GenerationErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            GenerationErrorKind::Http { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            GenerationErrorKind::Transport(_) => true,
            GenerationErrorKind::Timeout(_) => true,
            GenerationErrorKind::RateLimited(_) => true,
            _ => false,
        }
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use recast_error::{GenerationError, GenerationErrorKind, RetryableError};
///
/// let err = GenerationError::new(GenerationErrorKind::Http {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
/// assert!(err.is_retryable());
/// assert!(format!("{}", err).contains("HTTP 503"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &GenerationErrorKind {
        &self.kind
    }
}

/// Errors that know whether another attempt could succeed.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors (429, 503, timeouts, dropped connections) return true.
    /// Permanent errors (401, 400, malformed responses) return false.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for GenerationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
