//! The README generation pipeline.
//!
//! One call to [`ReadmeGenerator::generate`] parses the profile URL, fetches
//! the profile, renders the prompt, requests a completion and sanitizes the
//! result. Nothing is cached or retried between calls.

mod error;

pub use error::{ErrorKind, GenerateError};

use crate::config::AppConfig;
use crate::github::{is_valid_login, parse_profile_url, GitHubClient};
use crate::llm::CompletionClient;
use crate::prompt::PromptRenderer;
use crate::sanitize::sanitize;
use tracing::{info, info_span, Instrument};

/// Generates profile READMEs. Cheap to share behind an `Arc`.
pub struct ReadmeGenerator {
    github: GitHubClient,
    completion: CompletionClient,
    renderer: PromptRenderer,
}

impl ReadmeGenerator {
    /// Builds the GitHub and completion clients from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`] if either client cannot be built or the
    /// prompt templates fail to register.
    pub fn new(config: &AppConfig) -> Result<Self, GenerateError> {
        let github = GitHubClient::new(&config.github)?;
        let completion = CompletionClient::new(&config.llm)?;
        Self::from_parts(github, completion)
    }

    /// Assembles a generator from existing clients.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError::Template`] if the prompt templates fail to
    /// register.
    pub fn from_parts(
        github: GitHubClient,
        completion: CompletionClient,
    ) -> Result<Self, GenerateError> {
        Ok(Self {
            github,
            completion,
            renderer: PromptRenderer::new()?,
        })
    }

    /// Returns the GitHub client.
    pub fn github(&self) -> &GitHubClient {
        &self.github
    }

    /// Returns true if the completion client has an API key.
    pub fn has_api_key(&self) -> bool {
        self.completion.has_api_key()
    }

    /// Generates a README for the user named by `profile_url`.
    ///
    /// `profile_url` may be a full profile URL, a scheme-less `github.com/<user>`
    /// or a bare username. A missing API key is reported before any upstream
    /// call is made.
    ///
    /// # Errors
    ///
    /// Returns [`GenerateError`]; use [`GenerateError::kind`] to classify it.
    pub async fn generate(&self, profile_url: &str) -> Result<String, GenerateError> {
        let profile_url = profile_url.trim();
        if profile_url.is_empty() {
            return Err(GenerateError::MissingProfileUrl);
        }
        if !self.completion.has_api_key() {
            return Err(crate::llm::LlmError::MissingApiKey.into());
        }

        let username = parse_profile_url(profile_url)
            .ok_or_else(|| GenerateError::InvalidProfileUrl(profile_url.to_string()))?;
        if !is_valid_login(&username) {
            return Err(GenerateError::InvalidUsername(username));
        }

        let span = info_span!("generate", username = %username);
        async {
            let bundle = self.github.fetch_profile(&username).await?;
            let prompt = self.renderer.render(&bundle)?;
            let raw = self.completion.complete(&prompt).await?;
            let readme = sanitize(&raw, &bundle.top_languages);

            info!(chars = readme.len(), "README generated");
            Ok(readme)
        }
        .instrument(span)
        .await
    }
}
