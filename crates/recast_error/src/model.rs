//! Errors raised while constructing roles, steps and sequences.

/// Specific error conditions for model construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ModelErrorKind {
    /// Role identifier was empty or whitespace
    #[display("Role identifier cannot be empty")]
    EmptyRoleName,
    /// Role persona was empty or whitespace
    #[display("Role '{_0}' has an empty persona")]
    EmptyPersona(String),
    /// Step instruction template was empty
    #[display("Step for role '{_0}' has an empty instruction template")]
    EmptyTemplate(String),
    /// Sequence had no steps
    #[display("Sequence '{_0}' must contain at least one step")]
    EmptySequence(String),
    /// Two profiles targeted the same platform
    #[display("Platform '{_0}' is configured more than once")]
    DuplicatePlatform(String),
}

/// Model construction error with location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Model Error: {} at line {} in {}", kind, line, file)]
pub struct ModelError {
    /// The specific error condition
    pub kind: ModelErrorKind,
    /// Line number where the error occurred
    pub line: u32,
    /// Source file where the error occurred
    pub file: &'static str,
}

impl ModelError {
    /// Create a new ModelError with automatic location tracking.
    ///
    /// # Examples
    ///
    /// ```
    /// use recast_error::{ModelError, ModelErrorKind};
    ///
    /// let err = ModelError::new(ModelErrorKind::EmptyRoleName);
    /// assert!(format!("{}", err).contains("cannot be empty"));
    /// ```
    #[track_caller]
    pub fn new(kind: ModelErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
