//! Mapping between recast requests and chat completions payloads.

use super::dto::{ApiErrorEnvelope, ChatMessage, ChatRequest, ChatResponse};
use recast_core::{GenerateRequest, GenerateResponse, TokenUsageData};
use recast_error::{GenerationError, GenerationErrorKind};

/// Builds the chat payload: one protocol message per request message.
pub fn to_chat_request(req: &GenerateRequest, model: &str) -> Result<ChatRequest, GenerationError> {
    let messages: Vec<ChatMessage> = req
        .messages()
        .iter()
        .map(|msg| ChatMessage {
            role: (*msg.speaker()).into(),
            content: Some(msg.content().clone()),
        })
        .collect();

    ChatRequest::builder()
        .model(model)
        .messages(messages)
        .temperature(*req.temperature())
        .max_tokens(*req.max_tokens())
        .build()
        .map_err(|e| {
            GenerationError::new(GenerationErrorKind::InvalidRequest(format!(
                "Failed to build chat request: {}",
                e
            )))
        })
}

/// Extracts the first choice's text.
///
/// # Errors
///
/// `MalformedResponse` when there are no choices, `EmptyResponse` when the
/// first choice carries no text.
pub fn from_chat_response(response: &ChatResponse) -> Result<GenerateResponse, GenerationError> {
    let choice = response.choices.first().ok_or_else(|| {
        GenerationError::new(GenerationErrorKind::MalformedResponse(
            "response contained no choices".to_string(),
        ))
    })?;

    let text = choice.message.content.as_deref().unwrap_or_default();
    if text.trim().is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::EmptyResponse));
    }

    let usage = response.usage.map(|u| {
        TokenUsageData::new(u.prompt_tokens, u.completion_tokens, u.total_tokens)
    });

    Ok(GenerateResponse::new(text, usage))
}

/// Pulls the human-readable message out of an error body, falling back to
/// the raw body.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.kind {
            Some(kind) => format!("{}: {}", kind, envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => body.to_string(),
    }
}
