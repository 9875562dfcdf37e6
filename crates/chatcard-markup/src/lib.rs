//! Markdown Tokenizer - one paragraph in, styled runs out
//!
//! Chat markdown is small: bold, italic, inline code, strikethrough, and
//! custom emoji placeholders that look a lot like markup. This crate turns
//! a single line of message content into [`StyledRun`]s.
//!
//! ## How a paragraph is scanned
//!
//! 1. Emoji placeholders (`<:name:id>`, `<a:name:id>`) are cut out first and
//!    kept verbatim, so their colons and underscores never open a style.
//! 2. The text between them is scanned left to right. Each round every
//!    pattern looks for its first match from the cursor; the earliest start
//!    wins and ties go to the pattern listed first in [`PATTERNS`].
//! 3. The inside of a match becomes one run. It is not scanned again.
//!
//! ```
//! use chatcard_core::{RunStyle, StyledRun};
//! use chatcard_markup::tokenize;
//!
//! let runs = tokenize("**bold** and *italic*");
//! assert_eq!(runs[0], StyledRun::new("bold", RunStyle::BOLD));
//! assert_eq!(runs[1], StyledRun::plain(" and "));
//! assert_eq!(runs[2], StyledRun::new("italic", RunStyle::ITALIC));
//! ```

use chatcard_core::{RunStyle, StyledRun};
use once_cell::sync::Lazy;
use regex::Regex;

mod emoji;

pub use emoji::{split_emoji, EmojiRef, EmojiSegment, EMOJI_TOKEN};

/// A markdown delimiter pair and the style it applies
pub struct Pattern {
    pub name: &'static str,
    regex: Regex,
    pub style: RunStyle,
}

#[allow(clippy::expect_used)]
fn pattern(name: &'static str, source: &str, style: RunStyle) -> Pattern {
    Pattern {
        name,
        regex: Regex::new(source).expect("markdown pattern is valid"),
        style,
    }
}

/// Patterns in tie-break order.
///
/// The order decides ambiguous input such as `***x**`, where bold and italic
/// both match at the same position.
pub static PATTERNS: Lazy<[Pattern; 5]> = Lazy::new(|| {
    [
        pattern(
            "bold-italic",
            r"\*\*\*(.+?)\*\*\*|___(.+?)___",
            RunStyle::BOLD_ITALIC,
        ),
        pattern("bold", r"\*\*(.+?)\*\*|__(.+?)__", RunStyle::BOLD),
        pattern("italic", r"\*(.+?)\*|_(.+?)_", RunStyle::ITALIC),
        pattern("code", r"`(.+?)`", RunStyle::CODE),
        pattern("strikethrough", r"~~(.+?)~~", RunStyle::STRIKETHROUGH),
    ]
});

/// A match found during one scanning round
struct Found<'t> {
    start: usize,
    end: usize,
    inner: &'t str,
    style: RunStyle,
}

/// Tokenize one paragraph (no newlines) into styled runs.
pub fn tokenize(paragraph: &str) -> Vec<StyledRun> {
    let mut runs = Vec::new();
    for segment in split_emoji(paragraph) {
        match segment {
            EmojiSegment::Emoji(token) => runs.push(StyledRun::emoji(token)),
            EmojiSegment::Text(text) => scan_markdown(text, &mut runs),
        }
    }
    runs
}

/// Split message content into paragraphs at hard newlines.
///
/// `\r\n` endings are accepted. An empty message is one empty paragraph.
pub fn paragraphs(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Tokenize every paragraph of `content`.
pub fn tokenize_content(content: &str) -> Vec<Vec<StyledRun>> {
    paragraphs(content).map(tokenize).collect()
}

fn scan_markdown(text: &str, runs: &mut Vec<StyledRun>) {
    let mut cursor = 0;

    while cursor < text.len() {
        let Some(found) = earliest_match(text, cursor) else {
            break;
        };

        push_run(runs, &text[cursor..found.start], RunStyle::PLAIN);
        push_run(runs, found.inner, found.style);
        cursor = found.end;
    }

    push_run(runs, &text[cursor..], RunStyle::PLAIN);
}

fn earliest_match(text: &str, cursor: usize) -> Option<Found<'_>> {
    let mut best: Option<Found<'_>> = None;

    for pattern in PATTERNS.iter() {
        let Some(caps) = pattern.regex.captures_at(text, cursor) else {
            continue;
        };
        let (Some(whole), Some(inner)) = (caps.get(0), caps.get(1).or_else(|| caps.get(2)))
        else {
            continue;
        };

        // Strictly earlier only: equal starts keep the higher-priority pattern
        if best.as_ref().map_or(true, |b| whole.start() < b.start) {
            log::trace!(
                "markup: {} matched {}..{}",
                pattern.name,
                whole.start(),
                whole.end()
            );
            best = Some(Found {
                start: whole.start(),
                end: whole.end(),
                inner: inner.as_str(),
                style: pattern.style,
            });
        }
    }

    best
}

fn push_run(runs: &mut Vec<StyledRun>, text: &str, style: RunStyle) {
    if !text.is_empty() {
        runs.push(StyledRun::new(text, style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert_eq!(PATTERNS.len(), 5);
        assert_eq!(PATTERNS[0].name, "bold-italic");
        assert_eq!(PATTERNS[4].name, "strikethrough");
    }

    #[test]
    fn test_plain_text_is_one_run() {
        assert_eq!(tokenize("just words"), vec![StyledRun::plain("just words")]);
    }

    #[test]
    fn test_empty_paragraph_has_no_runs() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_bold_and_italic() {
        let runs = tokenize("**bold** and *italic*");
        assert_eq!(
            runs,
            vec![
                StyledRun::new("bold", RunStyle::BOLD),
                StyledRun::plain(" and "),
                StyledRun::new("italic", RunStyle::ITALIC),
            ]
        );
        assert!(runs.iter().all(|r| !r.text.contains('*')));
    }

    #[test]
    fn test_underscore_forms() {
        let runs = tokenize("___all___ __b__ _i_");
        assert_eq!(
            runs,
            vec![
                StyledRun::new("all", RunStyle::BOLD_ITALIC),
                StyledRun::plain(" "),
                StyledRun::new("b", RunStyle::BOLD),
                StyledRun::plain(" "),
                StyledRun::new("i", RunStyle::ITALIC),
            ]
        );
    }

    #[test]
    fn test_code_and_strikethrough() {
        let runs = tokenize("run `cargo test` not ~~make~~");
        assert_eq!(
            runs,
            vec![
                StyledRun::plain("run "),
                StyledRun::new("cargo test", RunStyle::CODE),
                StyledRun::plain(" not "),
                StyledRun::new("make", RunStyle::STRIKETHROUGH),
            ]
        );
    }

    #[test]
    fn test_inner_text_is_not_rescanned() {
        let runs = tokenize("`**not bold**`");
        assert_eq!(runs, vec![StyledRun::new("**not bold**", RunStyle::CODE)]);
    }

    #[test]
    fn test_tie_break_prefers_bold_over_italic() {
        // bold matches "***x**" with inner "*x"; italic matches "***" with
        // inner "*". Both start at 0 and bold is listed first.
        let runs = tokenize("***x**");
        assert_eq!(runs, vec![StyledRun::new("*x", RunStyle::BOLD)]);
    }

    #[test]
    fn test_earliest_start_beats_priority() {
        let runs = tokenize("`a` **b**");
        assert_eq!(runs[0], StyledRun::new("a", RunStyle::CODE));
        assert_eq!(runs[2], StyledRun::new("b", RunStyle::BOLD));
    }

    #[test]
    fn test_unclosed_delimiters_stay_literal() {
        assert_eq!(tokenize("2 * 3 = 6"), vec![StyledRun::plain("2 * 3 = 6")]);
        assert_eq!(tokenize("**open"), vec![StyledRun::plain("**open")]);
    }

    #[test]
    fn test_paragraph_split() {
        let paras: Vec<&str> = paragraphs("a\r\nb\n\nc").collect();
        assert_eq!(paras, vec!["a", "b", "", "c"]);
        assert_eq!(paragraphs("").count(), 1);
    }
}
