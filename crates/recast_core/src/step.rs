//! A single generate-and-receive-text unit of work.

use crate::Role;
use derive_getters::Getters;
use recast_error::{ModelError, ModelErrorKind};
use std::sync::Arc;

/// Heading placed between a step's template and the context it receives.
const DEFAULT_CONTEXT_HEADING: &str = "Given Content:";

/// Position of a step in the generate → critique → rewrite chain.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr, strum::EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum StepKind {
    /// Produce a first platform-specific draft from the user's content
    Generate,
    /// Critique the draft
    Critique,
    /// Revise the draft using the critique
    Rewrite,
}

/// A role plus an instruction template.
///
/// The instruction sent to the generator is the template followed by the
/// context heading and whatever context the sequence runner hands the step.
/// No escaping or length limiting is applied.
#[derive(Debug, Clone, Getters)]
pub struct Step {
    /// Role that answers this step
    role: Arc<Role>,
    /// Chain position
    kind: StepKind,
    /// Fixed instruction text
    template: String,
    /// Heading placed in front of the context
    context_heading: String,
    /// Whether the original content is appended to this step's output
    carry_original: bool,
    /// Description of the expected output (documentation only)
    expected_output: String,
}

impl Step {
    /// Creates a step with the default context heading.
    ///
    /// # Errors
    ///
    /// Returns [`ModelErrorKind::EmptyTemplate`] if the template is blank.
    #[track_caller]
    pub fn new(
        kind: StepKind,
        role: Arc<Role>,
        template: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let template = template.into();
        if template.trim().is_empty() {
            return Err(ModelError::new(ModelErrorKind::EmptyTemplate(
                role.name().to_string(),
            )));
        }

        Ok(Self {
            role,
            kind,
            template,
            context_heading: DEFAULT_CONTEXT_HEADING.to_string(),
            carry_original: false,
            expected_output: String::new(),
        })
    }

    /// Sets the heading placed in front of the context.
    pub fn with_context_heading(mut self, heading: impl Into<String>) -> Self {
        self.context_heading = heading.into();
        self
    }

    /// Sets whether the original content travels on with this step's output.
    pub fn with_carry_original(mut self, carry_original: bool) -> Self {
        self.carry_original = carry_original;
        self
    }

    /// Sets the expected-output description.
    pub fn with_expected_output(mut self, expected_output: impl Into<String>) -> Self {
        self.expected_output = expected_output.into();
        self
    }

    /// Builds the full instruction for this step.
    ///
    /// ```
    /// use recast_core::{Role, Step, StepKind};
    /// use std::sync::Arc;
    ///
    /// let role = Arc::new(Role::new("Editor", "Edit", "Careful editor").unwrap());
    /// let step = Step::new(StepKind::Generate, role, "Make it shine.").unwrap();
    /// assert_eq!(step.render("hello"), "Make it shine.\n\nGiven Content:\nhello");
    /// ```
    pub fn render(&self, context: &str) -> String {
        format!("{}\n\n{}\n{}", self.template, self.context_heading, context)
    }
}
