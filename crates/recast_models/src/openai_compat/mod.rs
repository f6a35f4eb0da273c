//! Generic OpenAI-compatible chat completions client.
//!
//! Works with any provider that follows the OpenAI chat completions format
//! (Groq, HuggingFace router, local servers such as vLLM or llama.cpp).

mod client;
mod conversions;
mod dto;

pub use client::OpenAICompatibleClient;
pub use dto::{ChatMessage, ChatRequest, ChatResponse, ChatRole};
