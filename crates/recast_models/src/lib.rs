//! Language model provider clients for recast.
//!
//! Each client implements [`recast_interface::TextGenerator`]: it renders the
//! role as a system prompt, sends the instruction as the user turn and returns
//! the text of the first candidate.

mod gemini;
mod openai_compat;

pub use gemini::{DEFAULT_GEMINI_BASE_URL, GeminiClient, GeminiRequest, GeminiResponse};
pub use openai_compat::{ChatMessage, ChatRequest, ChatResponse, ChatRole, OpenAICompatibleClient};
