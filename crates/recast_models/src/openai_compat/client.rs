//! Generic client for OpenAI-compatible APIs.

use super::conversions;
use super::dto::ChatResponse;
use async_trait::async_trait;
use recast_core::{GenerateRequest, Role};
use recast_error::{ConfigError, GenerationError, GenerationErrorKind};
use recast_interface::TextGenerator;
use reqwest::Client;
use tracing::{debug, error, instrument};

/// Client for any API following the OpenAI chat completions format.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAICompatibleClient {
    /// Creates a client for the server at `base_url`
    /// (e.g. `http://localhost:11434/v1`). An empty `api_key` sends no
    /// `Authorization` header, which local servers expect.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the model name or base URL is empty.
    #[instrument(skip(api_key), fields(model = %model))]
    pub fn new(api_key: String, model: String, base_url: String) -> Result<Self, ConfigError> {
        if model.trim().is_empty() {
            return Err(ConfigError::invalid("model", "must not be empty"));
        }
        if base_url.trim().is_empty() {
            return Err(ConfigError::invalid("base_url", "is required for openai_compat"));
        }

        debug!(model = %model, url = %base_url, "Created OpenAI-compatible client");

        Ok(Self {
            client: Client::new(),
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            temperature: None,
            max_tokens: None,
        })
    }

    /// Sets sampling parameters applied to every call.
    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Full chat completions URL.
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Sends one request and returns the text of the first choice.
    ///
    /// # Errors
    ///
    /// `Transport` when the server is unreachable, `Http` for non-2xx
    /// statuses, `MalformedResponse` or `EmptyResponse` for unusable bodies.
    #[instrument(skip(self, req), fields(model = %self.model))]
    pub async fn send(&self, req: &GenerateRequest) -> Result<String, GenerationError> {
        let chat_request = conversions::to_chat_request(req, &self.model)?;

        debug!(url = %self.endpoint(), "Posting chat completion");

        let mut request = self.client.post(self.endpoint()).json(&chat_request);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await.map_err(|e| {
            error!(error = ?e, "HTTP request failed");
            GenerationError::new(GenerationErrorKind::Transport(e.to_string()))
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = conversions::error_message(&body);
            error!(status = %status, error = %message, "Chat completions request rejected");

            return Err(GenerationError::new(GenerationErrorKind::Http {
                status_code: status.as_u16(),
                message,
            }));
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse response");
            GenerationError::new(GenerationErrorKind::MalformedResponse(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        let parsed = conversions::from_chat_response(&chat_response)?;
        if let Some(usage) = parsed.usage() {
            debug!(total_tokens = *usage.total_tokens(), "Chat completion received");
        }
        Ok(parsed.into_text())
    }
}

#[async_trait]
impl TextGenerator for OpenAICompatibleClient {
    async fn generate(&self, role: &Role, instruction: &str) -> Result<String, GenerationError> {
        let req = GenerateRequest::for_role(role, instruction)
            .with_sampling(self.temperature, self.max_tokens);
        self.send(&req).await
    }

    fn provider_name(&self) -> &str {
        "openai_compat"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
