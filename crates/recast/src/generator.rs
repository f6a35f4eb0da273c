//! Builds the configured text generator.

use crate::{Provider, RecastConfig};
use recast_error::{ConfigError, GenerationError, GenerationErrorKind, RecastResult};
use recast_interface::TextGenerator;
use recast_models::{GeminiClient, OpenAICompatibleClient};
use recast_rate_limit::{RateLimiter, ResilientGenerator};
use std::sync::Arc;
use tracing::info;

/// Creates the provider client described by `config`, wrapped with the
/// configured timeout, retry policy and rate limiter.
///
/// # Errors
///
/// Returns [`GenerationErrorKind::MissingApiKey`] when Gemini is selected and
/// no key was found, or a [`ConfigError`] if the client rejects the model
/// name or endpoint.
pub fn build_generator(config: &RecastConfig) -> RecastResult<Arc<dyn TextGenerator>> {
    let temperature = Some(*config.temperature() as f32);
    let max_tokens = *config.max_tokens();
    let limiter = Arc::new(RateLimiter::new(config.rate_limit()));
    let retry = config.retry().clone();

    let generator: Arc<dyn TextGenerator> = match config.provider() {
        Provider::Gemini => {
            let api_key = config.api_key().ok_or_else(|| {
                GenerationError::new(GenerationErrorKind::MissingApiKey(
                    config.api_key_env().clone(),
                ))
            })?;
            let mut client = GeminiClient::new(api_key.to_string(), config.model().clone())?
                .with_sampling(temperature, max_tokens);
            if let Some(base_url) = config.base_url() {
                client = client.with_base_url(base_url.clone());
            }
            Arc::new(ResilientGenerator::new(client, retry).with_rate_limiter(limiter))
        }
        Provider::OpenAiCompat => {
            let base_url = config.base_url().clone().ok_or_else(|| {
                ConfigError::invalid("base_url", "is required for the openai_compat provider")
            })?;
            let client = OpenAICompatibleClient::new(
                config.api_key().unwrap_or_default().to_string(),
                config.model().clone(),
                base_url,
            )?
            .with_sampling(temperature, max_tokens);
            Arc::new(ResilientGenerator::new(client, retry).with_rate_limiter(limiter))
        }
    };

    info!(
        provider = generator.provider_name(),
        model = generator.model_name(),
        "Text generator ready"
    );
    Ok(generator)
}
