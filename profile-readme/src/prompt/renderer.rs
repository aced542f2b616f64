//! Prompt renderer.

use super::{Prompt, TemplateError, MAX_PROMPT_REPOSITORIES};
use crate::github::ProfileBundle;
use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde_json::{json, Value};

const CONTEXT_TEMPLATE: &str = "context";
const SYSTEM_TEMPLATE: &str = "system";

// `{{inc @index}}` numbers list entries from 1.
handlebars_helper!(inc: |n: u64| n + 1);

/// Creates a configured Handlebars registry with custom helpers.
///
/// The registry is configured with:
/// - No HTML escaping (the output is markdown and plain text)
/// - Strict mode (catches missing variables)
/// - `inc` helper for one-based numbering
#[must_use]
pub fn create_handlebars_registry() -> Handlebars<'static> {
    let mut hbs = Handlebars::new();
    hbs.register_escape_fn(no_escape);
    hbs.set_strict_mode(true);
    hbs.register_helper("inc", Box::new(inc));
    hbs
}

/// Renders the system and user prompts for a profile.
pub struct PromptRenderer {
    handlebars: Handlebars<'static>,
}

impl PromptRenderer {
    /// Creates a renderer with the built-in templates registered.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RegistrationError`] if a template fails to parse.
    pub fn new() -> Result<Self, TemplateError> {
        let mut handlebars = create_handlebars_registry();
        handlebars.register_template_string(CONTEXT_TEMPLATE, include_str!("context.hbs"))?;
        handlebars.register_template_string(SYSTEM_TEMPLATE, include_str!("system.hbs"))?;
        Ok(Self { handlebars })
    }

    /// Renders both prompts.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RenderError`] if rendering fails.
    pub fn render(&self, bundle: &ProfileBundle) -> Result<Prompt, TemplateError> {
        Ok(Prompt {
            system: self.render_system(bundle)?,
            user: self.render_context(bundle)?,
        })
    }

    /// Renders the profile context block sent as the user message.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RenderError`] if rendering fails.
    pub fn render_context(&self, bundle: &ProfileBundle) -> Result<String, TemplateError> {
        let rendered = self
            .handlebars
            .render(CONTEXT_TEMPLATE, &context_data(bundle))?;
        Ok(rendered.trim().to_string())
    }

    /// Renders the fixed instructions sent as the system message.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError::RenderError`] if rendering fails.
    pub fn render_system(&self, bundle: &ProfileBundle) -> Result<String, TemplateError> {
        let profile = &bundle.profile;
        let data = json!({
            "login": profile.login,
            "twitter_username": profile.twitter_username.as_deref().unwrap_or("username"),
        });
        Ok(self.handlebars.render(SYSTEM_TEMPLATE, &data)?)
    }
}

/// Flattens a bundle into template data, substituting fallback text for
/// absent fields.
fn context_data(bundle: &ProfileBundle) -> Value {
    let profile = &bundle.profile;
    let repositories: Vec<Value> = bundle
        .repositories
        .iter()
        .take(MAX_PROMPT_REPOSITORIES)
        .map(|repo| {
            json!({
                "name": repo.name,
                "description": repo.description.as_deref().unwrap_or("No description"),
                "stars": repo.stargazers_count,
                "forks": repo.forks_count,
                "language": repo.language.as_deref().unwrap_or_default(),
            })
        })
        .collect();

    json!({
        "login": profile.login,
        "name": profile.name.as_deref().unwrap_or("Not provided"),
        "bio": profile.bio.as_deref().unwrap_or("No bio available"),
        "location": profile.location.as_deref().unwrap_or("Not specified"),
        "company": profile.company.as_deref().unwrap_or("Not specified"),
        "blog": profile.blog.as_deref().unwrap_or("Not provided"),
        "twitter": profile
            .twitter_username
            .as_deref()
            .map_or_else(|| "Not provided".to_string(), |handle| format!("@{handle}")),
        "member_since": profile.member_since(),
        "public_repos": profile.public_repos,
        "followers": profile.followers,
        "following": profile.following,
        "top_languages": bundle.top_languages.join(", "),
        "repositories": repositories,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{RepositorySummary, UserProfile};

    fn bundle(repository_count: u32) -> ProfileBundle {
        let profile: UserProfile = serde_json::from_value(json!({
            "login": "octocat",
            "name": "The Octocat",
            "bio": "I <3 open source",
            "location": "San Francisco",
            "company": null,
            "blog": "https://github.blog",
            "twitter_username": "github",
            "public_repos": 8,
            "followers": 1000,
            "following": 9,
            "created_at": "2011-01-25T18:44:36Z"
        }))
        .unwrap();

        let repositories = (0..repository_count)
            .map(|i| RepositorySummary {
                name: format!("repo-{i}"),
                description: (i % 2 == 0).then(|| format!("Repository number {i}")),
                language: (i == 0).then(|| "Python".to_string()),
                stargazers_count: 100 - i,
                forks_count: i,
                topics: Vec::new(),
                html_url: format!("https://github.com/octocat/repo-{i}"),
            })
            .collect();

        ProfileBundle::from_parts(profile, repositories)
    }

    #[test]
    fn context_lists_profile_fields() {
        let renderer = PromptRenderer::new().unwrap();
        let context = renderer.render_context(&bundle(2)).unwrap();

        assert!(context.starts_with("GitHub Profile Information:"));
        assert!(context.contains("- Username: @octocat"));
        assert!(context.contains("- Full Name: The Octocat"));
        assert!(context.contains("- Company: Not specified"));
        assert!(context.contains("- Twitter: @github"));
        assert!(context.contains("- GitHub Member Since: 2011"));
        assert!(context.contains("Top Programming Languages: Python"));
    }

    #[test]
    fn context_numbers_repositories_and_omits_missing_language() {
        let renderer = PromptRenderer::new().unwrap();
        let context = renderer.render_context(&bundle(2)).unwrap();
        let lines: Vec<&str> = context.lines().collect();

        assert!(lines.contains(&"1. repo-0 - Repository number 0 (⭐ 100, 🍴 0) [Python]"));
        assert!(lines.contains(&"2. repo-1 - No description (⭐ 99, 🍴 1)"));
    }

    #[test]
    fn context_lists_at_most_eight_repositories() {
        let renderer = PromptRenderer::new().unwrap();
        let context = renderer.render_context(&bundle(10)).unwrap();

        assert!(context.contains("8. repo-7 - No description"));
        assert!(!context.contains("repo-8"));
        assert!(!context.contains("9. "));
    }

    #[test]
    fn does_not_escape_html() {
        let renderer = PromptRenderer::new().unwrap();
        let context = renderer.render_context(&bundle(0)).unwrap();

        assert!(context.contains("- Bio: I <3 open source"));
    }

    #[test]
    fn system_prompt_links_the_user() {
        let renderer = PromptRenderer::new().unwrap();
        let system = renderer.render_system(&bundle(0)).unwrap();

        assert!(system.contains("](https://github.com/octocat)"));
        assert!(system.contains("](https://twitter.com/github)"));
        assert!(system.contains("#### Data Science"));
    }
}
