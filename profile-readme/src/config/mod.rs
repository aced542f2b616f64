//! Configuration loading.
//!
//! Settings come from an optional `config.toml` with `[github]` and `[llm]`
//! sections, then environment overrides. Callers layer CLI flags on top with
//! the `with_*` builders.
//!
//! ```toml
//! [github]
//! base-uri = "https://api.github.com"
//!
//! [llm]
//! base-url = "https://api.groq.com/openai/v1"
//! model = "llama-3.3-70b-versatile"
//! temperature = 0.8
//! max-tokens = 2500
//! ```

mod error;
mod github;

pub use error::ConfigError;
pub use github::GitHubConfig;

use crate::llm::config::is_valid_temperature;
use crate::llm::LlmConfig;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// Overrides the configured model.
pub const MODEL_ENV: &str = "PROFILE_README_LLM_MODEL";

/// Overrides the configured temperature.
pub const TEMPERATURE_ENV: &str = "PROFILE_README_LLM_TEMPERATURE";

/// Top-level structure of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// GitHub client settings.
    #[serde(default)]
    pub github: GitHubConfig,

    /// Completion provider settings.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl AppConfig {
    /// Applies environment overrides for the model, temperature and API key.
    ///
    /// Environment variables take precedence over the config file. An
    /// unparseable or out-of-range temperature is ignored with a warning.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.trim().is_empty() {
                self.llm = self.llm.with_model(model);
            }
        }

        if let Ok(value) = std::env::var(TEMPERATURE_ENV) {
            match value.parse::<f64>() {
                Ok(temperature) if is_valid_temperature(temperature) => {
                    self.llm.temperature = temperature;
                }
                _ => warn!(
                    value = %value,
                    "Invalid temperature from environment variable: must be finite and in range 0.0-2.0"
                ),
            }
        }

        self.llm = self.llm.with_env_api_key();
        self
    }
}

/// Loads `config.toml`, or the defaults if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read, parsed or
/// validated.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        debug!(path = %path.display(), "Config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    let config: AppConfig = toml::from_str(&contents).map_err(|source| ConfigError::TomlError {
        path: path.display().to_string(),
        source,
    })?;
    config.llm.validate()?;

    debug!(path = %path.display(), "Loaded config file");
    Ok(config)
}
