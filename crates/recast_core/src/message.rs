//! Chat messages exchanged with providers.

use serde::{Deserialize, Serialize};

/// Who authored a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Speaker {
    System,
    User,
    Assistant,
}

/// A text message in a provider conversation.
///
/// # Examples
///
/// ```
/// use recast_core::{Message, Speaker};
///
/// let message = Message::new(Speaker::User, "Hello!");
/// assert_eq!(*message.speaker(), Speaker::User);
/// assert_eq!(message.content(), "Hello!");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, derive_getters::Getters)]
pub struct Message {
    /// The author of the message
    speaker: Speaker,
    /// Message text
    content: String,
}

impl Message {
    /// Creates a new message.
    pub fn new(speaker: Speaker, content: impl Into<String>) -> Self {
        Self {
            speaker,
            content: content.into(),
        }
    }
}
