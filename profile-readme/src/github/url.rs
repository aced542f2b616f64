//! Username and repository extraction from free-form GitHub URLs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Leading `http://` or `https://`.
static SCHEME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://").expect("valid regex"));

/// Profile URL shapes, tried in order.
static PROFILE_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"^github\.com/([^/]+)$").expect("valid regex"),
        Regex::new(r"^github\.com/([^/]+)/?$").expect("valid regex"),
        Regex::new(r"^([^/]+)$").expect("valid regex"),
    ]
});

/// Repository URL shapes, tried in order.
static REPO_PATTERNS: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"^github\.com/([^/]+)/([^/]+)").expect("valid regex"),
        Regex::new(r"^([^/]+)\.github\.io/([^/]+)").expect("valid regex"),
        Regex::new(r"^([^/]+)/([^/]+)$").expect("valid regex"),
    ]
});

/// Longest login GitHub accepts.
const MAX_LOGIN_LEN: usize = 39;

/// Owner and name of a repository parsed from a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepoRef {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name without a `.git` suffix.
    pub repo: String,
}

/// Strips surrounding whitespace, the scheme and a single trailing slash.
fn clean_url(input: &str) -> String {
    let trimmed = input.trim();
    let without_scheme = SCHEME.replace(trimmed, "");
    let without_scheme: &str = &without_scheme;
    without_scheme
        .strip_suffix('/')
        .unwrap_or(without_scheme)
        .to_string()
}

/// Extracts a GitHub username from a profile URL, partial URL or bare username.
///
/// Accepts `https://github.com/octocat`, `github.com/octocat/` and `octocat`.
/// Returns `None` when nothing matches; malformed input is never an error.
#[must_use]
pub fn parse_profile_url(input: &str) -> Option<String> {
    let clean = clean_url(input);

    PROFILE_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(&clean))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|name| !name.is_empty())
}

/// Extracts owner and repository name from a repository URL.
///
/// Accepts `github.com/owner/repo[/...]`, `owner.github.io/repo` and
/// `owner/repo`. A trailing `.git` is removed from the repository name.
#[must_use]
pub fn parse_repo_url(input: &str) -> Option<RepoRef> {
    let clean = clean_url(input);

    REPO_PATTERNS
        .iter()
        .find_map(|pattern| pattern.captures(&clean))
        .map(|caps| {
            let repo = &caps[2];
            RepoRef {
                owner: caps[1].to_string(),
                repo: repo.strip_suffix(".git").unwrap_or(repo).to_string(),
            }
        })
}

/// Returns true if `name` could be a GitHub login.
///
/// Logins are 1-39 ASCII alphanumerics or hyphens. Anything else is rejected
/// before it is placed in an API path.
#[must_use]
pub fn is_valid_login(name: &str) -> bool {
    !name.is_empty()
        && name.len() <= MAX_LOGIN_LEN
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}
