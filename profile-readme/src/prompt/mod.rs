//! Prompt construction.
//!
//! A [`Prompt`] pairs fixed writing instructions (the system message) with a
//! plain-text summary of one profile (the user message). Both are rendered
//! from Handlebars templates compiled into the binary.

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::{create_handlebars_registry, PromptRenderer};

use crate::github::ProfileBundle;

/// Maximum repositories listed in the profile context.
pub const MAX_PROMPT_REPOSITORIES: usize = 8;

/// A system + user message pair for one completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Writing instructions.
    pub system: String,

    /// Profile context.
    pub user: String,
}

impl Prompt {
    /// Renders the prompt for a profile with a fresh [`PromptRenderer`].
    ///
    /// Builds a new template registry on every call; hold a [`PromptRenderer`]
    /// when rendering repeatedly.
    ///
    /// # Errors
    ///
    /// Returns [`TemplateError`] if the templates fail to register or render.
    pub fn build(bundle: &ProfileBundle) -> Result<Self, TemplateError> {
        PromptRenderer::new()?.render(bundle)
    }
}

/// Renders the profile context block for `bundle`.
///
/// Builds a new template registry on every call; hold a [`PromptRenderer`]
/// when rendering repeatedly.
///
/// # Errors
///
/// Returns [`TemplateError`] if the templates fail to register or render.
pub fn build_context(bundle: &ProfileBundle) -> Result<String, TemplateError> {
    PromptRenderer::new()?.render_context(bundle)
}

/// Renders the writing instructions for `bundle`.
///
/// Builds a new template registry on every call; hold a [`PromptRenderer`]
/// when rendering repeatedly.
///
/// # Errors
///
/// Returns [`TemplateError`] if the templates fail to register or render.
pub fn build_system_prompt(bundle: &ProfileBundle) -> Result<String, TemplateError> {
    PromptRenderer::new()?.render_system(bundle)
}
