//! Completion provider configuration.

use crate::config::ConfigError;
use serde::Deserialize;
use url::Url;

/// Groq's OpenAI-compatible endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";

/// Sampling temperature used when none is configured.
pub const DEFAULT_TEMPERATURE: f64 = 0.8;

/// Output token ceiling used when none is configured.
pub const DEFAULT_MAX_TOKENS: u32 = 2500;

/// Environment variables checked for an API key, in order.
pub(crate) const API_KEY_ENVS: [&str; 2] = ["GROQ_API_KEY", "OPENAI_API_KEY"];

/// `[llm]` section of `config.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct LlmConfig {
    /// Base URL of an OpenAI-compatible API.
    #[serde(default = "default_base_url")]
    pub(crate) base_url: String,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub(crate) model: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub(crate) temperature: f64,

    /// Maximum output tokens.
    #[serde(default = "default_max_tokens")]
    pub(crate) max_tokens: u32,

    /// Request timeout in seconds (optional, transport default otherwise).
    pub(crate) timeout_secs: Option<u64>,

    /// API key (optional, falls back to GROQ_API_KEY then OPENAI_API_KEY).
    pub(crate) api_key: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: None,
            api_key: None,
        }
    }
}

impl LlmConfig {
    /// Returns the API base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Returns the sampling temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    /// Returns the output token ceiling.
    pub fn max_tokens(&self) -> u32 {
        self.max_tokens
    }

    /// Returns the request timeout, if one is configured.
    pub fn timeout_secs(&self) -> Option<u64> {
        self.timeout_secs
    }

    /// Returns the configured API key.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Sets the API base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the API key, ignoring blank values.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        if !api_key.trim().is_empty() {
            self.api_key = Some(api_key);
        }
        self
    }

    /// Fills a missing API key from the environment.
    pub(crate) fn with_env_api_key(self) -> Self {
        if self.api_key.is_some() {
            return self;
        }
        match env_api_key() {
            Some(key) => self.with_api_key(key),
            None => self,
        }
    }

    /// Checks that the values can be used to build a client.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ValidationError`] for a malformed base URL, a
    /// temperature outside 0.0-2.0 or a zero token ceiling.
    pub fn validate(&self) -> Result<(), ConfigError> {
        Url::parse(&self.base_url).map_err(|e| ConfigError::ValidationError {
            field: "llm.base-url".to_string(),
            message: format!("'{}' is not a valid URL: {e}", self.base_url),
        })?;

        if !is_valid_temperature(self.temperature) {
            return Err(ConfigError::ValidationError {
                field: "llm.temperature".to_string(),
                message: format!("{} must be finite and in range 0.0-2.0", self.temperature),
            });
        }

        if self.max_tokens == 0 {
            return Err(ConfigError::ValidationError {
                field: "llm.max-tokens".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

/// Returns true if a temperature value is finite and within 0.0-2.0.
pub(crate) fn is_valid_temperature(value: f64) -> bool {
    value.is_finite() && (0.0..=2.0).contains(&value)
}

/// Gets the first non-blank API key from the environment.
fn env_api_key() -> Option<String> {
    API_KEY_ENVS
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find(|key| !key.trim().is_empty())
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f64 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}
