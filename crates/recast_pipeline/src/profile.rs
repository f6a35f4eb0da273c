//! Per-platform sequence definitions.

use crate::catalog::{CRITIQUE_TEMPLATE, REWRITE_PREAMBLE};
use derive_getters::Getters;
use recast_core::{Platform, Role, Sequence, Step, StepKind};
use recast_error::ModelError;
use std::sync::Arc;

/// Everything needed to build one platform's generate → critique → rewrite chain.
///
/// The editor role drafts and revises; the critic role is supplied when the
/// sequence is built so every platform shares the same critic.
#[derive(Debug, Clone, Getters)]
pub struct PlatformProfile {
    platform: Platform,
    editor: Arc<Role>,
    brief: String,
    expected_output: String,
}

impl PlatformProfile {
    /// Creates a profile with an editor role and its drafting brief.
    pub fn new(platform: Platform, editor: Arc<Role>, brief: impl Into<String>) -> Self {
        Self {
            platform,
            editor,
            brief: brief.into(),
            expected_output: format!(
                "Content well suited for {}.",
                platform.display_name()
            ),
        }
    }

    /// Overrides the expected-output description.
    pub fn with_expected_output(mut self, expected_output: impl Into<String>) -> Self {
        self.expected_output = expected_output.into();
        self
    }

    /// Builds the three-step sequence for this platform.
    ///
    /// The critique step carries the original content forward so the rewrite
    /// sees the feedback followed by the text it applies to. The rewrite
    /// instruction repeats the brief after [`REWRITE_PREAMBLE`].
    ///
    /// # Errors
    ///
    /// Returns a [`ModelError`] if the brief is blank.
    pub fn build_sequence(&self, critic: &Arc<Role>) -> Result<Sequence, ModelError> {
        let generate = Step::new(StepKind::Generate, Arc::clone(&self.editor), &self.brief)?
            .with_expected_output(&self.expected_output);

        let critique = Step::new(StepKind::Critique, Arc::clone(critic), CRITIQUE_TEMPLATE)?
            .with_context_heading("Content to review:")
            .with_carry_original(true)
            .with_expected_output(
                "Constructive feedback for the content followed by the given content.",
            );

        let rewrite = Step::new(
            StepKind::Rewrite,
            Arc::clone(&self.editor),
            format!("{}\n\n{}", REWRITE_PREAMBLE, self.brief.trim()),
        )?
        .with_context_heading("Feedback:")
        .with_expected_output(&self.expected_output);

        Sequence::new(self.platform.as_ref(), vec![generate, critique, rewrite])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role(name: &str) -> Arc<Role> {
        Arc::new(Role::new(name, "goal", "persona").unwrap())
    }

    #[test]
    fn test_sequence_shape() {
        let profile = PlatformProfile::new(Platform::LinkedIn, role("Editor"), "Be professional.");
        let sequence = profile.build_sequence(&role("Critic")).unwrap();

        assert_eq!(sequence.name(), "linkedin");
        let kinds: Vec<_> = sequence.steps().iter().map(|s| *s.kind()).collect();
        assert_eq!(
            kinds,
            vec![StepKind::Generate, StepKind::Critique, StepKind::Rewrite]
        );
        assert_eq!(sequence.steps()[1].role().name(), "Critic");
        assert_eq!(sequence.steps()[2].role().name(), "Editor");
        assert!(*sequence.steps()[1].carry_original());
    }

    #[test]
    fn test_rewrite_template_repeats_brief() {
        let profile = PlatformProfile::new(Platform::TikTok, role("Editor"), "Keep it short.");
        let sequence = profile.build_sequence(&role("Critic")).unwrap();

        let rewrite = &sequence.steps()[2];
        assert!(rewrite.template().starts_with(REWRITE_PREAMBLE));
        assert!(rewrite.template().ends_with("Keep it short."));
        assert!(rewrite.template().len() > sequence.steps()[0].template().len());
    }

    #[test]
    fn test_blank_brief_rejected() {
        let profile = PlatformProfile::new(Platform::Instagram, role("Editor"), "  ");
        assert!(profile.build_sequence(&role("Critic")).is_err());
    }
}
