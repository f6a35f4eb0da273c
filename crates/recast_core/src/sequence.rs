//! Ordered chains of steps.

use crate::Step;
use recast_error::{ModelError, ModelErrorKind};

/// A non-empty, ordered list of steps executed one after another.
#[derive(Debug, Clone)]
pub struct Sequence {
    name: String,
    steps: Vec<Step>,
}

impl Sequence {
    /// Creates a sequence.
    ///
    /// # Errors
    ///
    /// Returns [`ModelErrorKind::EmptySequence`] when `steps` is empty.
    #[track_caller]
    pub fn new(name: impl Into<String>, steps: Vec<Step>) -> Result<Self, ModelError> {
        let name = name.into();
        if steps.is_empty() {
            return Err(ModelError::new(ModelErrorKind::EmptySequence(name)));
        }
        Ok(Self { name, steps })
    }

    /// Name used in logs, usually the platform.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Steps in execution order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
