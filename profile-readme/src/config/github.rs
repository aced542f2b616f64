//! GitHub client configuration.

use serde::Deserialize;

/// `[github]` section of `config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct GitHubConfig {
    /// API base URI (optional, defaults to `https://api.github.com`).
    base_uri: Option<String>,

    /// Personal access token (optional, raises the rate limit).
    token: Option<String>,
}

impl GitHubConfig {
    /// Returns the configured API base URI.
    pub fn base_uri(&self) -> Option<&str> {
        self.base_uri.as_deref()
    }

    /// Returns the configured token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Sets the API base URI.
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Sets the token, ignoring blank values.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        if !token.trim().is_empty() {
            self.token = Some(token);
        }
        self
    }
}
