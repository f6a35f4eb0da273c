//! Layered configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional TOML file
//! (`recast.toml` in the working directory or an explicit path), then
//! environment variables prefixed `RECAST_` with `__` between sections, e.g.
//! `RECAST_PIPELINE__MAX_CONCURRENT_SEQUENCES=1`.

use config::{Config, Environment, File, FileFormat};
use derive_getters::Getters;
use recast_error::ConfigError;
use recast_pipeline::PipelineConfig;
use recast_rate_limit::{RateLimitConfig, RetryConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Environment variable holding the API key unless overridden.
pub const DEFAULT_API_KEY_ENV: &str = "GOOGLE_GEMINI_API_KEY";

/// Checked when the default key variable is unset.
pub const FALLBACK_API_KEY_ENV: &str = "GEMINI_API_KEY";

const DEFAULT_CONFIG_FILE: &str = "recast.toml";
const ENV_PREFIX: &str = "RECAST";

/// Language model backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Provider {
    /// Google Gemini REST API
    #[default]
    #[serde(rename = "gemini")]
    Gemini,
    /// Any server speaking the OpenAI chat completions protocol
    #[serde(rename = "openai_compat")]
    OpenAiCompat,
}

impl Provider {
    /// Configuration name of the provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Gemini => "gemini",
            Provider::OpenAiCompat => "openai_compat",
        }
    }
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_temperature() -> f64 {
    0.1
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

/// Effective configuration for a recast process.
#[derive(Debug, Clone, Serialize, Deserialize, Getters)]
pub struct RecastConfig {
    /// Language model backend
    #[serde(default)]
    provider: Provider,
    /// Model name passed to the provider
    #[serde(default = "default_model")]
    model: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    temperature: f64,
    /// Output token cap
    #[serde(default)]
    max_tokens: Option<u32>,
    /// Endpoint override; required for `openai_compat`
    #[serde(default)]
    base_url: Option<String>,
    /// Environment variable the API key is read from
    #[serde(default = "default_api_key_env")]
    api_key_env: String,
    /// Provider quota
    #[serde(default)]
    rate_limit: RateLimitConfig,
    /// Per-call timeout and retry policy
    #[serde(default)]
    retry: RetryConfig,
    /// Coordinator tuning
    #[serde(default)]
    pipeline: PipelineConfig,
    /// Resolved at load time, never serialized
    #[serde(skip)]
    #[getter(skip)]
    api_key: Option<String>,
}

impl Default for RecastConfig {
    fn default() -> Self {
        Self {
            provider: Provider::default(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: None,
            base_url: None,
            api_key_env: default_api_key_env(),
            rate_limit: RateLimitConfig::default(),
            retry: RetryConfig::default(),
            pipeline: PipelineConfig::default(),
            api_key: None,
        }
    }
}

impl RecastConfig {
    /// Loads configuration from the file and the process environment.
    ///
    /// Without `path`, `recast.toml` in the working directory is used if it
    /// exists. An explicit path must exist.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if a source cannot be read or parsed, or the
    /// result fails [`validate`](Self::validate).
    #[tracing::instrument(skip_all, fields(path = ?path))]
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_from(path, None)
    }

    /// Like [`load`](Self::load) but reads variables from `env` instead of
    /// the process environment.
    pub fn load_from(
        path: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let environment = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .source(env.clone());

        let mut config: Self = Config::builder()
            .add_source(file)
            .add_source(environment)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to read configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        config.api_key = match &env {
            Some(vars) => config.lookup_api_key(|name| vars.get(name).cloned()),
            None => config.lookup_api_key(|name| std::env::var(name).ok()),
        };

        config.validate()?;
        tracing::debug!(
            provider = config.provider.as_str(),
            model = %config.model,
            api_key_set = config.api_key.is_some(),
            "Configuration loaded"
        );
        Ok(config)
    }

    fn lookup_api_key(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        let found = lookup(&self.api_key_env).or_else(|| {
            if self.api_key_env == DEFAULT_API_KEY_ENV {
                lookup(FALLBACK_API_KEY_ENV)
            } else {
                None
            }
        });
        found.filter(|key| !key.trim().is_empty())
    }

    /// Rejects settings that would fail at first use.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] describing the first invalid setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model.trim().is_empty() {
            return Err(ConfigError::invalid("model", "cannot be empty"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::invalid(
                "temperature",
                format!("must be between 0.0 and 2.0, got {}", self.temperature),
            ));
        }
        if self.max_tokens == Some(0) {
            return Err(ConfigError::invalid("max_tokens", "must be greater than zero"));
        }
        if self.provider == Provider::OpenAiCompat && self.base_url.is_none() {
            return Err(ConfigError::invalid(
                "base_url",
                "is required for the openai_compat provider",
            ));
        }
        if *self.pipeline.max_concurrent_sequences() == 0 {
            return Err(ConfigError::invalid(
                "pipeline.max_concurrent_sequences",
                "must be greater than zero",
            ));
        }
        self.rate_limit
            .validate()
            .map_err(|e| ConfigError::invalid("rate_limit", e.kind().to_string()))?;
        self.retry
            .validate()
            .map_err(|e| ConfigError::invalid("retry", e.kind().to_string()))?;
        Ok(())
    }

    /// The resolved API key, if any.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Sets the API key directly.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Replaces the coordinator tuning.
    pub fn with_pipeline(mut self, pipeline: PipelineConfig) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Renders the configuration as TOML with the API key redacted.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if serialization fails.
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        let body = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to render configuration: {}", e)))?;
        let key = if self.api_key.is_some() {
            "<redacted>"
        } else {
            "<not set>"
        };
        Ok(format!("# api key ({}): {}\n{}", self.api_key_env, key, body))
    }
}
