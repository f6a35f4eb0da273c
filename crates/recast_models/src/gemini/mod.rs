//! Google Gemini `generateContent` REST client.

mod client;
mod conversions;
mod dto;

pub use client::{DEFAULT_GEMINI_BASE_URL, GeminiClient};
pub use dto::{GeminiRequest, GeminiResponse};
