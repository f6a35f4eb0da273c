//! Type conversions between recast and Gemini formats.

use super::dto::{Content, ErrorEnvelope, GeminiRequest, GeminiResponse, GenerationConfig};
use recast_core::{GenerateRequest, GenerateResponse, Speaker, TokenUsageData};
use recast_error::{GenerationError, GenerationErrorKind};

/// Converts a recast request to a Gemini request body.
///
/// System messages become the `systemInstruction`; assistant turns use the
/// `model` role.
pub fn to_gemini_request(req: &GenerateRequest) -> Result<GeminiRequest, GenerationError> {
    let mut system_parts = Vec::new();
    let mut contents = Vec::new();

    for msg in req.messages() {
        match msg.speaker() {
            Speaker::System => system_parts.push(msg.content().clone()),
            Speaker::User => contents.push(Content::text(Some("user"), msg.content().clone())),
            Speaker::Assistant => {
                contents.push(Content::text(Some("model"), msg.content().clone()))
            }
        }
    }

    let system_instruction = if system_parts.is_empty() {
        None
    } else {
        Some(Content::text(None, system_parts.join("\n\n")))
    };

    let generation_config = if req.temperature().is_some() || req.max_tokens().is_some() {
        Some(GenerationConfig {
            temperature: *req.temperature(),
            max_output_tokens: *req.max_tokens(),
        })
    } else {
        None
    };

    GeminiRequest::builder()
        .system_instruction(system_instruction)
        .contents(contents)
        .generation_config(generation_config)
        .build()
        .map_err(|e| {
            GenerationError::new(GenerationErrorKind::InvalidRequest(format!(
                "Failed to build request: {}",
                e
            )))
        })
}

/// Converts a Gemini response to a recast response.
///
/// Concatenates the text parts of the first candidate.
pub fn from_gemini_response(response: &GeminiResponse) -> Result<GenerateResponse, GenerationError> {
    let Some(candidate) = response.candidates.first() else {
        let reason = response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
            .map(|r| format!("prompt blocked: {}", r))
            .unwrap_or_else(|| "no candidates in response".to_string());
        return Err(GenerationError::new(GenerationErrorKind::MalformedResponse(
            reason,
        )));
    };

    let text: String = candidate
        .content
        .as_ref()
        .map(|c| {
            c.parts
                .iter()
                .filter_map(|p| p.text.as_deref())
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(GenerationError::new(GenerationErrorKind::EmptyResponse));
    }

    let usage = response.usage_metadata.as_ref().and_then(|u| {
        match (u.prompt_token_count, u.candidates_token_count, u.total_token_count) {
            (Some(input), Some(output), Some(total)) => {
                Some(TokenUsageData::new(input, output, total))
            }
            _ => None,
        }
    });

    Ok(GenerateResponse::new(text, usage))
}

/// Extracts a readable message from an error body, falling back to the raw text.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => match envelope.error.status {
            Some(status) => format!("{}: {}", status, envelope.error.message),
            None => envelope.error.message,
        },
        Err(_) => body.to_string(),
    }
}
