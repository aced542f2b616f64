//! GitHub client error types.

use thiserror::Error;

/// Errors that can occur while talking to the GitHub API.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// Failed to build the GitHub client.
    #[error("Failed to build GitHub client: {0}")]
    Client(#[source] octocrab::Error),

    /// Failed to fetch the user profile.
    #[error("Failed to fetch GitHub profile '{username}': {source}")]
    User {
        username: String,
        #[source]
        source: octocrab::Error,
    },

    /// Failed to list the user's repositories.
    #[error("Failed to list repositories for '{username}': {source}")]
    Repositories {
        username: String,
        #[source]
        source: octocrab::Error,
    },

    /// Failed to read the rate limit.
    #[error("Failed to read GitHub rate limit: {0}")]
    RateLimit(#[source] octocrab::Error),
}
