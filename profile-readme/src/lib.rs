#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod config;
pub mod generator;
pub mod github;
pub mod llm;
pub mod prompt;
pub mod sanitize;

pub use config::{load_config, AppConfig, ConfigError, GitHubConfig};
pub use generator::{ErrorKind, GenerateError, ReadmeGenerator};
pub use github::{
    is_valid_login, parse_profile_url, parse_repo_url, GitHubClient, LanguageFrequency,
    ProfileBundle, ProfileError, RateLimitInfo, RepoRef, RepositorySummary, UserProfile,
};
pub use llm::{CompletionClient, LlmConfig, LlmError};
pub use prompt::{build_context, build_system_prompt, Prompt, PromptRenderer, TemplateError};
pub use sanitize::{sanitize, Step};

/// Installs the process-wide rustls crypto provider.
///
/// Safe to call more than once; later calls are ignored.
pub fn install_crypto_provider() {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
}
