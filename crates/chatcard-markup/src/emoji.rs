//! Custom emoji placeholders
//!
//! Chat clients send custom emoji as `<:name:id>`, or `<a:name:id>` when the
//! emoji is animated. The placeholder is the lookup key into a message's
//! emoji images, so it is always kept byte-for-byte.

use once_cell::sync::Lazy;
use regex::Regex;

/// Pattern of a custom emoji placeholder
pub const EMOJI_TOKEN: &str = r"<a?:\w+:\d+>";

#[allow(clippy::expect_used)]
static EMOJI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(EMOJI_TOKEN).expect("emoji regex pattern is valid"));

#[allow(clippy::expect_used)]
static EMOJI_PARTS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<(a?):(\w+):(\d+)>$").expect("emoji regex pattern is valid"));

/// A piece of a paragraph: either prose or one placeholder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiSegment<'t> {
    Text(&'t str),
    Emoji(&'t str),
}

/// Cut `text` into prose and emoji placeholders, in order.
///
/// Empty prose between adjacent placeholders is not returned.
pub fn split_emoji(text: &str) -> Vec<EmojiSegment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in EMOJI_RE.find_iter(text) {
        if m.start() > last {
            segments.push(EmojiSegment::Text(&text[last..m.start()]));
        }
        segments.push(EmojiSegment::Emoji(m.as_str()));
        last = m.end();
    }

    if last < text.len() {
        segments.push(EmojiSegment::Text(&text[last..]));
    }
    segments
}

/// The parts of a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmojiRef {
    pub name: String,
    pub id: u64,
    pub animated: bool,
}

impl EmojiRef {
    /// Parse a whole placeholder; anything else is `None`.
    pub fn parse(token: &str) -> Option<Self> {
        let caps = EMOJI_PARTS_RE.captures(token)?;
        Some(Self {
            animated: caps.get(1).is_some_and(|m| !m.as_str().is_empty()),
            name: caps.get(2)?.as_str().to_string(),
            id: caps.get(3)?.as_str().parse().ok()?,
        })
    }

    /// Rebuild the placeholder text.
    pub fn token(&self) -> String {
        let prefix = if self.animated { "a" } else { "" };
        format!("<{prefix}:{}:{}>", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize;
    use chatcard_core::{RunStyle, StyledRun};

    #[test]
    fn test_emoji_is_kept_intact() {
        let runs = tokenize("<:wave:123> hi");
        assert_eq!(runs[0], StyledRun::emoji("<:wave:123>"));
        assert_eq!(runs[1], StyledRun::plain(" hi"));
    }

    #[test]
    fn test_underscores_in_emoji_names_do_not_open_italic() {
        let runs = tokenize("<:big_smile:1> and <:sad_face:2>");
        assert_eq!(
            runs,
            vec![
                StyledRun::emoji("<:big_smile:1>"),
                StyledRun::plain(" and "),
                StyledRun::emoji("<:sad_face:2>"),
            ]
        );
    }

    #[test]
    fn test_styles_around_emoji() {
        let runs = tokenize("**hey**<a:party:99>*you*");
        assert_eq!(
            runs,
            vec![
                StyledRun::new("hey", RunStyle::BOLD),
                StyledRun::emoji("<a:party:99>"),
                StyledRun::new("you", RunStyle::ITALIC),
            ]
        );
    }

    #[test]
    fn test_split_adjacent_placeholders() {
        assert_eq!(
            split_emoji("<:a:1><:b:2>"),
            vec![EmojiSegment::Emoji("<:a:1>"), EmojiSegment::Emoji("<:b:2>")]
        );
        assert!(split_emoji("").is_empty());
    }

    #[test]
    fn test_malformed_placeholders_are_text() {
        assert_eq!(EmojiRef::parse("<:wave:>"), None);
        assert_eq!(EmojiRef::parse("<:wave:12> "), None);
        assert_eq!(split_emoji("<:wave:abc>"), vec![EmojiSegment::Text("<:wave:abc>")]);
    }

    #[test]
    fn test_parse_ref() {
        let parsed = EmojiRef::parse("<a:party_parrot:4242>").unwrap();
        assert_eq!(parsed.name, "party_parrot");
        assert_eq!(parsed.id, 4242);
        assert!(parsed.animated);
        assert_eq!(parsed.token(), "<a:party_parrot:4242>");

        let still = EmojiRef::parse("<:ok:7>").unwrap();
        assert!(!still.animated);
        assert_eq!(EmojiRef::parse("ok"), None);
    }
}
