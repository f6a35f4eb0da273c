//! Startup configuration errors.

/// A setting that could not be loaded or failed validation.
///
/// Raised while loading settings and building the generator, never per
/// request. `setting` names the offending key (dotted for nested sections,
/// e.g. `retry.max_retries`) when the problem is tied to one.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Error)]
pub struct ConfigError {
    /// Offending setting, if the problem is tied to one
    pub setting: Option<String>,
    /// What is wrong with it
    pub message: String,
    /// Line number where the error was raised
    pub line: u32,
    /// File where the error was raised
    pub file: &'static str,
}

impl ConfigError {
    /// A problem with the configuration as a whole (unreadable file, bad syntax).
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        Self::build(None, message.into())
    }

    /// A problem with one setting.
    ///
    /// # Examples
    ///
    /// ```
    /// use recast_error::ConfigError;
    ///
    /// let err = ConfigError::invalid("model", "cannot be empty");
    /// assert_eq!(err.setting.as_deref(), Some("model"));
    /// assert!(err.to_string().contains("`model` cannot be empty"));
    /// ```
    #[track_caller]
    pub fn invalid(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self::build(Some(setting.into()), message.into())
    }

    #[track_caller]
    fn build(setting: Option<String>, message: String) -> Self {
        let location = std::panic::Location::caller();
        Self {
            setting,
            message,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.setting {
            Some(setting) => write!(f, "Configuration Error: `{}` {}", setting, self.message)?,
            None => write!(f, "Configuration Error: {}", self.message)?,
        }
        write!(f, " at line {} in {}", self.line, self.file)
    }
}
