//! HTTP client for the Gemini `generateContent` endpoint.

use super::conversions;
use super::dto::GeminiResponse;
use async_trait::async_trait;
use recast_core::{GenerateRequest, Role};
use recast_error::{ConfigError, GenerationError, GenerationErrorKind};
use recast_interface::TextGenerator;
use reqwest::Client;
use tracing::{debug, error, instrument};

/// Public Gemini API endpoint.
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini client bound to one model.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl GeminiClient {
    /// Creates a client for `model` against the public endpoint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the API key or model name is empty.
    #[instrument(skip(api_key), fields(model = %model))]
    pub fn new(api_key: String, model: String) -> Result<Self, ConfigError> {
        if api_key.trim().is_empty() {
            return Err(ConfigError::invalid("api_key", "must not be empty"));
        }
        if model.trim().is_empty() || model.contains('/') {
            return Err(ConfigError::invalid(
                "model",
                format!("is not a valid Gemini model name: '{}'", model),
            ));
        }

        debug!(model = %model, "Created Gemini client");

        Ok(Self {
            client: Client::new(),
            api_key,
            model,
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            temperature: None,
            max_tokens: None,
        })
    }

    /// Overrides the API base URL (proxies, regional endpoints).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Sets sampling parameters applied to every call.
    pub fn with_sampling(mut self, temperature: Option<f32>, max_tokens: Option<u32>) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// Full `generateContent` URL for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Sends one request and returns the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, the provider answers with a
    /// non-success status, or the response has no text.
    #[instrument(skip(self, req), fields(model = %self.model))]
    pub async fn send(&self, req: &GenerateRequest) -> Result<String, GenerationError> {
        let body = conversions::to_gemini_request(req)?;

        debug!(
            model = %self.model,
            turns = body.contents().len(),
            "Sending request"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                GenerationError::new(GenerationErrorKind::Transport(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = conversions::error_message(&error_text);
            error!(status = %status, error = %message, "API error");

            return Err(GenerationError::new(GenerationErrorKind::Http {
                status_code: status.as_u16(),
                message,
            }));
        }

        let parsed: GeminiResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse response");
            GenerationError::new(GenerationErrorKind::MalformedResponse(format!(
                "Failed to parse JSON: {}",
                e
            )))
        })?;

        let generated = conversions::from_gemini_response(&parsed)?;
        debug!(
            text_len = generated.text().len(),
            usage = ?generated.usage(),
            "Received response"
        );

        Ok(generated.into_text())
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, role: &Role, instruction: &str) -> Result<String, GenerationError> {
        let req = GenerateRequest::for_role(role, instruction)
            .with_sampling(self.temperature, self.max_tokens);
        self.send(&req).await
    }

    fn provider_name(&self) -> &str {
        "gemini"
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
