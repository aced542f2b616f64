//! Cleanup of generated README text.
//!
//! Model output is passed through an ordered list of [`Step`]s. Each step is
//! a pure rewrite that is a no-op on its own output, and [`sanitize`] repeats
//! the full list until a pass changes nothing, so sanitizing twice gives the
//! same result as sanitizing once.

mod badges;
mod steps;

pub use badges::{ensure_language_badges, BadgeRule, BADGE_RULES};
pub use steps::{
    collapse_blank_lines, join_adjacent_images, recollapse_blank_lines,
    strip_animation_references, strip_html_wrappers, title_case_greeting,
};

use tracing::debug;

/// A named rewrite in the sanitizer pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    StripAnimationReferences,
    CollapseBlankLines,
    TitleCaseGreeting,
    StripHtmlWrappers,
    RecollapseBlankLines,
    JoinAdjacentImages,
    EnsureLanguageBadges,
}

impl Step {
    /// Every step, in the order [`sanitize`] runs them.
    pub const ALL: [Step; 7] = [
        Step::StripAnimationReferences,
        Step::CollapseBlankLines,
        Step::TitleCaseGreeting,
        Step::StripHtmlWrappers,
        Step::RecollapseBlankLines,
        Step::JoinAdjacentImages,
        Step::EnsureLanguageBadges,
    ];

    /// Snake-case name used in logs.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Step::StripAnimationReferences => "strip_animation_references",
            Step::CollapseBlankLines => "collapse_blank_lines",
            Step::TitleCaseGreeting => "title_case_greeting",
            Step::StripHtmlWrappers => "strip_html_wrappers",
            Step::RecollapseBlankLines => "recollapse_blank_lines",
            Step::JoinAdjacentImages => "join_adjacent_images",
            Step::EnsureLanguageBadges => "ensure_language_badges",
        }
    }

    /// Applies this step to `text`.
    #[must_use]
    pub fn apply(self, text: &str, top_languages: &[String]) -> String {
        match self {
            Step::StripAnimationReferences => strip_animation_references(text),
            Step::CollapseBlankLines => collapse_blank_lines(text),
            Step::TitleCaseGreeting => title_case_greeting(text),
            Step::StripHtmlWrappers => strip_html_wrappers(text),
            Step::RecollapseBlankLines => recollapse_blank_lines(text),
            Step::JoinAdjacentImages => join_adjacent_images(text),
            Step::EnsureLanguageBadges => ensure_language_badges(text, top_languages),
        }
    }
}

fn run_pass(text: &str, top_languages: &[String]) -> String {
    Step::ALL.iter().fold(text.to_string(), |current, step| {
        let next = step.apply(&current, top_languages);
        if next != current {
            debug!(step = step.name(), "Sanitizer step rewrote text");
        }
        next
    })
}

/// Cleans generated README text.
///
/// `top_languages` decides which language badges must be present.
#[must_use]
pub fn sanitize(text: &str, top_languages: &[String]) -> String {
    let mut current = text.to_string();
    let mut passes = 1;
    loop {
        let next = run_pass(&current, top_languages);
        if next == current {
            debug!(passes, "Sanitizer reached a fixed point");
            return current;
        }
        current = next;
        passes += 1;
    }
}
