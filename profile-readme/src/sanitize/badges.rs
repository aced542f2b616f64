//! Guarantees a badge for languages the model tends to leave out.

/// A badge that must appear when a language is among the top languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeRule {
    /// Lowercase substring matched against top language names.
    pub language: &'static str,

    /// Heading line of the subsection the badge belongs in, matched
    /// ignoring ASCII case.
    pub section: &'static str,

    /// Text whose presence means the badge is already there.
    pub marker: &'static str,

    /// Markdown image inserted when the marker is missing.
    pub badge: &'static str,
}

impl BadgeRule {
    fn applies(&self, text: &str, top_languages: &[String]) -> bool {
        !text.contains(self.marker)
            && top_languages
                .iter()
                .any(|language| language.to_lowercase().contains(self.language))
    }
}

const PYTHON_BADGE: &str =
    "![Python](https://img.shields.io/badge/Python-3776AB?style=for-the-badge&logo=python&logoColor=white)";

/// Known language badges.
pub const BADGE_RULES: &[BadgeRule] = &[BadgeRule {
    language: "python",
    section: "#### Data Science",
    marker: "3776AB",
    badge: PYTHON_BADGE,
}];

/// Inserts missing badges at the end of the first paragraph of every
/// matching subsection. Documents without the subsection are left as is.
pub fn ensure_language_badges(text: &str, top_languages: &[String]) -> String {
    BADGE_RULES.iter().fold(text.to_string(), |current, rule| {
        if rule.applies(&current, top_languages) {
            insert_badge(&current, rule)
        } else {
            current
        }
    })
}

fn insert_badge(text: &str, rule: &BadgeRule) -> String {
    let positions: Vec<usize> = line_starts(text)
        .filter(|&start| {
            text[start..]
                .get(..rule.section.len())
                .is_some_and(|heading| heading.eq_ignore_ascii_case(rule.section))
        })
        .map(|start| badge_position(text, start))
        .collect();

    let mut output = text.to_string();
    for &position in positions.iter().rev() {
        let mut insertion = String::new();
        if position > 0 && !text[..position].ends_with('\n') {
            insertion.push('\n');
        }
        insertion.push_str(rule.badge);
        if position < text.len() && !text[position..].starts_with('\n') {
            insertion.push('\n');
        }
        output.insert_str(position, &insertion);
    }
    output
}

fn line_starts(text: &str) -> impl Iterator<Item = usize> + '_ {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(index, _)| index + 1))
        .filter(move |&start| start < text.len())
}

/// Byte offset just past the first paragraph of the subsection whose heading
/// starts at `heading_start`. The subsection ends at the next `##` heading.
fn badge_position(text: &str, heading_start: usize) -> usize {
    let heading_end = text[heading_start..]
        .find('\n')
        .map_or(text.len(), |offset| heading_start + offset);
    let section_end = text[heading_end..]
        .find("\n##")
        .map_or(text.len(), |offset| heading_end + offset);

    let body = &text[heading_end..section_end];
    let content = body.trim_start();
    if content.is_empty() {
        return heading_end;
    }

    let content_start = heading_end + (body.len() - content.len());
    let paragraph_len = content.find("\n\n").unwrap_or(content.len());
    content_start + content[..paragraph_len].trim_end().len()
}
