//! Text rewrites applied to model output.
//!
//! Each function is pure and returns its input unchanged when re-applied to
//! its own output.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ANIMATION_IMAGES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)!\[(?:Typing SVG|GitHub Stats|GitHub Streak|Top Languages|Snake animation)\]\([^)]*\)",
    )
    .expect("valid regex")
});

static ANIMATION_LABELS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Typing SVG|GitHub Stats|GitHub Streak|Top Languages|Snake animation")
        .expect("valid regex")
});

static BLANK_LINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

static GREETING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)#[ \t]*(Merhaba,|Hi,|Hello,)[ \t]*Ben[ \t]+(\p{L}[\p{L} \t]*)(?:🌟)?")
        .expect("valid regex")
});

static HTML_OPENING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<(?:div|p|center)(?:\s[^>]*)?>\s*").expect("valid regex")
});

static HTML_CLOSING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\s*</(?:div|p|center)\s*>").expect("valid regex"));

static IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]+\]\([^)]+\)").expect("valid regex"));

/// Applies `rewrite` until the text stops changing.
fn until_stable(text: &str, rewrite: impl Fn(&str) -> String) -> String {
    let mut current = text.to_string();
    loop {
        let next = rewrite(&current);
        if next == current {
            return current;
        }
        current = next;
    }
}

/// Removes animated stats images and their bare labels.
pub fn strip_animation_references(text: &str) -> String {
    until_stable(text, |current| {
        let without_images = ANIMATION_IMAGES.replace_all(current, "");
        ANIMATION_LABELS.replace_all(&without_images, "").into_owned()
    })
}

/// Collapses three or more consecutive newlines into one blank line.
pub fn collapse_blank_lines(text: &str) -> String {
    BLANK_LINE_RUNS.replace_all(text, "\n\n").into_owned()
}

/// Title-cases the name in a `# Hi, Ben <name>` style heading and appends 🌟.
pub fn title_case_greeting(text: &str) -> String {
    GREETING
        .replace_all(text, |caps: &Captures| {
            let name = caps[2]
                .split_whitespace()
                .map(capitalize)
                .collect::<Vec<_>>()
                .join(" ");
            format!("# {} Ben {name} 🌟", &caps[1])
        })
        .into_owned()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Removes `div`, `p` and `center` wrappers, leaving a paragraph break where
/// each closing tag was.
pub fn strip_html_wrappers(text: &str) -> String {
    until_stable(text, |current| {
        let without_opening = HTML_OPENING.replace_all(current, "");
        HTML_CLOSING
            .replace_all(&without_opening, "\n\n")
            .into_owned()
    })
}

/// Collapses the blank line runs left behind by [`strip_html_wrappers`].
pub fn recollapse_blank_lines(text: &str) -> String {
    collapse_blank_lines(text)
}

/// Puts images separated only by whitespace spanning a line break on
/// consecutive lines.
pub fn join_adjacent_images(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut last_end = 0;
    let mut previous_image_end: Option<usize> = None;

    for image in IMAGE.find_iter(text) {
        if let Some(end) = previous_image_end {
            let gap = &text[end..image.start()];
            if gap.contains('\n') && gap.chars().all(char::is_whitespace) {
                output.push_str(&text[last_end..end]);
                output.push('\n');
                last_end = image.start();
            }
        }
        previous_image_end = Some(image.end());
    }

    output.push_str(&text[last_end..]);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_idempotent(step: fn(&str) -> String, input: &str) {
        let once = step(input);
        assert_eq!(step(&once), once, "not idempotent for {input:?}");
    }

    #[test]
    fn strips_animation_images_and_labels() {
        let input = "Intro\n![Typing SVG](https://readme-typing-svg.demolab.com?lines=Hi)\n![github stats](https://github-readme-stats.vercel.app/api?username=x)\nMy Top Languages are here";

        let output = strip_animation_references(input);

        assert_eq!(output, "Intro\n\n\nMy  are here");
        assert_idempotent(strip_animation_references, input);
    }

    #[test]
    fn strips_labels_exposed_by_removal() {
        assert_eq!(strip_animation_references("GitHub GitHub StatsStats"), "");
    }

    #[test]
    fn collapses_blank_line_runs() {
        assert_eq!(collapse_blank_lines("a\n\n\n\n\nb\n\nc"), "a\n\nb\n\nc");
        assert_idempotent(collapse_blank_lines, "a\n\n\n\n\nb");
    }

    #[test]
    fn title_cases_greeting_name() {
        assert_eq!(
            title_case_greeting("# Merhaba, Ben onur eren ejder\n\nText"),
            "# Merhaba, Ben Onur Eren Ejder 🌟\n\nText"
        );
        assert_eq!(
            title_case_greeting("# Hi, Ben ada 🌟"),
            "# Hi, Ben Ada 🌟"
        );
        assert_idempotent(title_case_greeting, "# Hello, Ben grace hopper! 🚀\nnext line");
    }

    #[test]
    fn lowercases_the_rest_of_each_name_word() {
        assert_eq!(
            title_case_greeting("# Hi, Ben aDA LOVELACE\n"),
            "# Hi, Ben Ada Lovelace 🌟\n"
        );
        assert_idempotent(title_case_greeting, "# hello, ben GRACE hOPPER");
    }

    #[test]
    fn greeting_name_stays_on_heading_line() {
        let output = title_case_greeting("# Hi, Ben ada\nlovelace wrote code");
        assert_eq!(output, "# Hi, Ben Ada 🌟\nlovelace wrote code");
    }

    #[test]
    fn leaves_other_headings_alone() {
        let input = "# Hi, I'm Ada\n## About Me";
        assert_eq!(title_case_greeting(input), input);
    }

    #[test]
    fn strips_html_wrappers() {
        let input = "<div align=\"center\">\n  ![A](a.svg)\n</div>\n<p>Hello</p><center>x</center>";

        let output = strip_html_wrappers(input);

        assert_eq!(output, "![A](a.svg)\n\n\nHello\n\nx\n\n");
        assert!(!output.contains('<'));
        assert_idempotent(strip_html_wrappers, input);
    }

    #[test]
    fn keeps_pre_and_picture_tags() {
        let input = "<pre>code</pre>\n<picture><source srcset=\"a.svg\"></picture>";
        assert_eq!(strip_html_wrappers(input), input);
    }

    #[test]
    fn joins_images_split_across_blank_lines() {
        let input = "![A](a.svg)\n\n   ![B](b.svg) ![C](c.svg)\n![D](d.svg)";

        let output = join_adjacent_images(input);

        assert_eq!(output, "![A](a.svg)\n![B](b.svg) ![C](c.svg)\n![D](d.svg)");
        assert_idempotent(join_adjacent_images, input);
    }

    #[test]
    fn keeps_images_separated_by_text() {
        let input = "![A](a.svg)\n\nSome text\n\n![B](b.svg)";
        assert_eq!(join_adjacent_images(input), input);
    }
}
