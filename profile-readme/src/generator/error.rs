//! Generation pipeline error types.

use crate::github::ProfileError;
use crate::llm::LlmError;
use crate::prompt::TemplateError;

/// Broad category of a [`GenerateError`], used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing credentials or a client that could not be set up.
    Configuration,
    /// The caller sent input that cannot name a GitHub user.
    Validation,
    /// The profile could not be fetched.
    NotFound,
    /// The completion provider failed.
    Upstream,
    /// No usable README came out of the pipeline.
    Generation,
}

/// Errors that can occur while generating a README.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// No profile URL was given.
    #[error("GitHub profile URL is required")]
    MissingProfileUrl,

    /// The input does not look like a profile URL or username.
    #[error("Invalid GitHub profile URL: '{0}'")]
    InvalidProfileUrl(String),

    /// The extracted username is not a valid GitHub login.
    #[error("Invalid GitHub username: '{0}'")]
    InvalidUsername(String),

    /// Fetching the profile failed.
    #[error("GitHub profile not found or could not be fetched: {0}")]
    Profile(#[from] ProfileError),

    /// The completion request failed.
    #[error(transparent)]
    Llm(#[from] LlmError),

    /// Prompt rendering failed.
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl GenerateError {
    /// Classifies the error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingProfileUrl | Self::InvalidProfileUrl(_) | Self::InvalidUsername(_) => {
                ErrorKind::Validation
            }
            Self::Profile(ProfileError::Client(_)) => ErrorKind::Configuration,
            Self::Profile(_) => ErrorKind::NotFound,
            Self::Llm(LlmError::MissingApiKey | LlmError::Client(_)) => ErrorKind::Configuration,
            Self::Llm(LlmError::Transport(_) | LlmError::Status { .. }) => ErrorKind::Upstream,
            Self::Llm(LlmError::EmptyCompletion) | Self::Template(_) => ErrorKind::Generation,
        }
    }
}
