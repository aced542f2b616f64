//! GitHub profile fetching.
//!
//! This module wraps an [`Octocrab`] client and fetches the two resources a
//! profile README needs: the user's profile and their most recently updated
//! repositories. Language statistics are derived locally.

mod error;
mod profile;
mod rate_limit;
pub mod url;

pub use error::ProfileError;
pub use profile::{
    LanguageCount, LanguageFrequency, ProfileBundle, RepositorySummary, UserProfile,
    MAX_REPOSITORIES, MAX_TOP_LANGUAGES,
};
pub use rate_limit::RateLimitInfo;
pub use url::{is_valid_login, parse_profile_url, parse_repo_url, RepoRef};

use crate::config::GitHubConfig;
use octocrab::Octocrab;
use serde::Serialize;
use tracing::{debug, info, info_span, Instrument};

/// Repositories requested per profile.
const REPOS_PER_PAGE: u8 = 30;

/// Query for `GET /users/{username}/repos`.
#[derive(Debug, Serialize)]
struct ListReposParams {
    sort: &'static str,
    per_page: u8,
    #[serde(rename = "type")]
    kind: &'static str,
}

/// GitHub API client shared by all requests.
#[derive(Clone)]
pub struct GitHubClient {
    octocrab: Octocrab,
}

impl GitHubClient {
    /// Builds a client from configuration.
    ///
    /// The token is optional; unauthenticated clients get a lower rate limit.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Client`] if the base URI is invalid or the
    /// HTTP client cannot be built.
    pub fn new(config: &GitHubConfig) -> Result<Self, ProfileError> {
        let mut builder = Octocrab::builder();
        if let Some(token) = config.token() {
            builder = builder.personal_token(token.to_string());
        }
        if let Some(base_uri) = config.base_uri() {
            builder = builder
                .base_uri(base_uri.to_string())
                .map_err(ProfileError::Client)?;
        }
        let octocrab = builder.build().map_err(ProfileError::Client)?;
        Ok(Self { octocrab })
    }

    /// Wraps an existing [`Octocrab`] instance.
    #[must_use]
    pub fn from_octocrab(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }

    /// Fetches a user's profile and repositories and derives language stats.
    ///
    /// Makes two sequential calls: the profile, then up to 30 repositories
    /// sorted by most recently updated. Neither is retried.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] if either call fails.
    pub async fn fetch_profile(&self, username: &str) -> Result<ProfileBundle, ProfileError> {
        let span = info_span!("fetch_profile", username = %username);

        async {
            info!("Fetching GitHub profile");

            let profile: UserProfile = self
                .octocrab
                .get(format!("/users/{username}"), None::<&()>)
                .await
                .map_err(|source| ProfileError::User {
                    username: username.to_string(),
                    source,
                })?;

            let params = ListReposParams {
                sort: "updated",
                per_page: REPOS_PER_PAGE,
                kind: "all",
            };
            let repositories: Vec<RepositorySummary> = self
                .octocrab
                .get(format!("/users/{username}/repos"), Some(&params))
                .await
                .map_err(|source| ProfileError::Repositories {
                    username: username.to_string(),
                    source,
                })?;
            debug!(count = repositories.len(), "Fetched repositories");

            let bundle = ProfileBundle::from_parts(profile, repositories);
            info!(
                repositories = bundle.repositories.len(),
                languages = bundle.languages.len(),
                "Profile fetched"
            );
            Ok(bundle)
        }
        .instrument(span)
        .await
    }

    /// Reads the core API rate limit.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::RateLimit`] if the rate limit call fails.
    pub async fn rate_limit(&self) -> Result<RateLimitInfo, ProfileError> {
        let rate_limit = self
            .octocrab
            .ratelimit()
            .get()
            .await
            .map_err(ProfileError::RateLimit)?;
        let core = &rate_limit.resources.core;

        Ok(RateLimitInfo {
            remaining: core.remaining as u32,
            reset: core.reset,
            limit: core.limit as u32,
        })
    }
}
