//! Profile and repository snapshots and the statistics derived from them.

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Maximum repositories kept in a [`ProfileBundle`].
pub const MAX_REPOSITORIES: usize = 10;

/// Maximum languages kept in [`ProfileBundle::top_languages`].
pub const MAX_TOP_LANGUAGES: usize = 10;

/// A GitHub user's public profile, as returned by `GET /users/{username}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique handle.
    pub login: String,

    /// Display name.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub name: Option<String>,

    /// Profile bio.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub bio: Option<String>,

    /// Avatar image URL.
    #[serde(default)]
    pub avatar_url: String,

    /// Free-form location.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub location: Option<String>,

    /// Company or organization.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub company: Option<String>,

    /// Website or blog URL. GitHub sends `""` when unset.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub blog: Option<String>,

    /// Twitter/X handle without the leading `@`.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub twitter_username: Option<String>,

    /// Number of public repositories.
    pub public_repos: u32,

    /// Number of followers.
    pub followers: u32,

    /// Number of followed accounts.
    pub following: u32,

    /// Account creation time.
    pub created_at: DateTime<Utc>,
}

impl UserProfile {
    /// Calendar year the account was created.
    #[must_use]
    pub fn member_since(&self) -> i32 {
        self.created_at.year()
    }
}

/// A repository entry from `GET /users/{username}/repos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySummary {
    /// Repository name.
    pub name: String,

    /// Short description.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub description: Option<String>,

    /// Primary language as detected by GitHub.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub language: Option<String>,

    /// Star count.
    pub stargazers_count: u32,

    /// Fork count.
    pub forks_count: u32,

    /// Topic tags.
    #[serde(default)]
    pub topics: Vec<String>,

    /// Repository page URL.
    pub html_url: String,
}

/// Count of repositories using a language as their primary language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageCount {
    /// Language name.
    pub language: String,

    /// Number of repositories.
    pub count: usize,
}

/// Language name to repository count, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct LanguageFrequency(Vec<LanguageCount>);

impl LanguageFrequency {
    /// Counts primary languages. Repositories without one are skipped.
    #[must_use]
    pub fn from_repositories(repositories: &[RepositorySummary]) -> Self {
        let mut frequency = Self::default();
        for language in repositories.iter().filter_map(|r| r.language.as_deref()) {
            frequency.increment(language);
        }
        frequency
    }

    fn increment(&mut self, language: &str) {
        match self.0.iter_mut().find(|entry| entry.language == language) {
            Some(entry) => entry.count += 1,
            None => self.0.push(LanguageCount {
                language: language.to_string(),
                count: 1,
            }),
        }
    }

    /// Returns the count for `language`, if any repository uses it.
    #[must_use]
    pub fn get(&self, language: &str) -> Option<usize> {
        self.0
            .iter()
            .find(|entry| entry.language == language)
            .map(|entry| entry.count)
    }

    /// Number of distinct languages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no repository has a primary language.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates entries in first-appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &LanguageCount> {
        self.0.iter()
    }

    /// Language names by descending count, at most `limit`.
    ///
    /// The sort is stable, so equal counts keep first-appearance order.
    #[must_use]
    pub fn top(&self, limit: usize) -> Vec<String> {
        let mut entries: Vec<&LanguageCount> = self.0.iter().collect();
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries
            .into_iter()
            .take(limit)
            .map(|entry| entry.language.clone())
            .collect()
    }
}

impl FromIterator<(String, usize)> for LanguageFrequency {
    fn from_iter<I: IntoIterator<Item = (String, usize)>>(iter: I) -> Self {
        let mut frequency = Self::default();
        for (language, count) in iter {
            match frequency.0.iter_mut().find(|entry| entry.language == language) {
                Some(entry) => entry.count += count,
                None => frequency.0.push(LanguageCount { language, count }),
            }
        }
        frequency
    }
}

/// Everything fetched for one user, ready for prompt rendering.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileBundle {
    /// The user's profile.
    pub profile: UserProfile,

    /// Up to [`MAX_REPOSITORIES`] repositories by star count.
    pub repositories: Vec<RepositorySummary>,

    /// Language counts over every fetched repository.
    pub languages: LanguageFrequency,

    /// Up to [`MAX_TOP_LANGUAGES`] language names by frequency.
    pub top_languages: Vec<String>,
}

impl ProfileBundle {
    /// Derives language statistics and the star-ranked repository list.
    ///
    /// Languages are counted over all `repositories` before they are
    /// truncated. The star sort is stable, so ties keep fetch order.
    #[must_use]
    pub fn from_parts(profile: UserProfile, mut repositories: Vec<RepositorySummary>) -> Self {
        let languages = LanguageFrequency::from_repositories(&repositories);
        let top_languages = languages.top(MAX_TOP_LANGUAGES);

        repositories.sort_by(|a, b| b.stargazers_count.cmp(&a.stargazers_count));
        repositories.truncate(MAX_REPOSITORIES);

        Self {
            profile,
            repositories,
            languages,
            top_languages,
        }
    }
}

/// Deserializes a missing, null or empty string as `None`.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
