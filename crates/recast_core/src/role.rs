//! Persona bundles bound to the text generator.

use derive_getters::Getters;
use recast_error::{ModelError, ModelErrorKind};
use serde::Serialize;

/// An immutable persona: who the generator should be while answering.
///
/// Roles are created once per platform configuration and shared read-only
/// across every step that speaks with that voice.
///
/// # Examples
///
/// ```
/// use recast_core::Role;
///
/// let role = Role::new(
///     "Content Critic",
///     "Criticize the given content",
///     "You have a keen eye for grammar and clarity.",
/// )
/// .unwrap();
/// assert_eq!(role.name(), "Content Critic");
/// assert!(role.system_prompt().starts_with("You are Content Critic."));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Getters)]
pub struct Role {
    /// Identifier, e.g. "Instagram Content Editor"
    name: String,
    /// What the role is trying to achieve
    goal: String,
    /// Backstory describing the persona
    persona: String,
}

impl Role {
    /// Creates a role, rejecting an empty identifier or persona.
    ///
    /// # Errors
    ///
    /// Returns [`ModelErrorKind::EmptyRoleName`] or [`ModelErrorKind::EmptyPersona`].
    #[track_caller]
    pub fn new(
        name: impl Into<String>,
        goal: impl Into<String>,
        persona: impl Into<String>,
    ) -> Result<Self, ModelError> {
        let name = name.into();
        let persona = persona.into();

        if name.trim().is_empty() {
            return Err(ModelError::new(ModelErrorKind::EmptyRoleName));
        }
        if persona.trim().is_empty() {
            return Err(ModelError::new(ModelErrorKind::EmptyPersona(name)));
        }

        Ok(Self {
            name,
            goal: goal.into(),
            persona,
        })
    }

    /// Renders the role as a system prompt for chat-style providers.
    pub fn system_prompt(&self) -> String {
        let mut prompt = format!("You are {}.", self.name);
        if !self.goal.trim().is_empty() {
            prompt.push_str(&format!(" Your goal: {}.", self.goal.trim_end_matches('.')));
        }
        prompt.push('\n');
        prompt.push_str(self.persona.trim());
        prompt
    }
}
