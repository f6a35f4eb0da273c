//! Provider-neutral request and response types.

use crate::{Message, Role, Speaker, TokenUsageData};
use serde::{Deserialize, Serialize};

/// Generation request handed to a provider adapter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, derive_getters::Getters)]
pub struct GenerateRequest {
    /// Conversation, system message first
    messages: Vec<Message>,
    /// Maximum tokens to generate
    max_tokens: Option<u32>,
    /// Sampling temperature
    temperature: Option<f32>,
}

impl GenerateRequest {
    /// Builds the two-message conversation for one step: the role as system
    /// prompt followed by the instruction as the user turn.
    pub fn for_role(role: &Role, instruction: &str) -> Self {
        Self {
            messages: vec![
                Message::new(Speaker::System, role.system_prompt()),
                Message::new(Speaker::User, instruction),
            ],
            max_tokens: None,
            temperature: None,
        }
    }

    /// Sets sampling parameters.
    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// The system message text, if present.
    pub fn system_text(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| *m.speaker() == Speaker::System)
            .map(|m| m.content().as_str())
    }
}

/// Text returned by a provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct GenerateResponse {
    /// Generated text
    text: String,
    /// Token accounting, when the provider reports it
    usage: Option<TokenUsageData>,
}

impl GenerateResponse {
    /// Creates a response.
    pub fn new(text: impl Into<String>, usage: Option<TokenUsageData>) -> Self {
        Self {
            text: text.into(),
            usage,
        }
    }

    /// Consumes the response, returning the text.
    pub fn into_text(self) -> String {
        self.text
    }
}
