//! Styled runs become measured, unbreakable tokens

use std::collections::HashMap;

use chatcard_core::{RenderConfig, RunStyle, StyledRun, TextMeasure, TextRole, WrapMode};
use chatcard_markup::{split_emoji, EmojiSegment};
use chatcard_unicode::word_segments;

/// Extra width reserved around inline code for its background
pub const CODE_PADDING: f32 = 8.0;

/// How a token will be drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Glyphs from the body chains
    Text,
    /// A decoded emoji image
    Emoji,
    /// An emoji whose image did not decode; drawn as its placeholder text
    EmojiFallback,
}

/// The smallest unit the line breaker moves around
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub run: StyledRun,
    pub kind: TokenKind,
    pub width: f32,
}

impl Token {
    pub fn text(&self) -> &str {
        &self.run.text
    }

    pub fn style(&self) -> RunStyle {
        self.run.style
    }
}

/// What is known about each emoji image of a message
///
/// `Some(width)` for images that decoded, `None` for ones that did not.
/// Placeholders missing from the map are ordinary text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmojiWidths {
    widths: HashMap<String, Option<u32>>,
}

impl EmojiWidths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_decoded(&mut self, token: impl Into<String>, width: u32) {
        self.widths.insert(token.into(), Some(width));
    }

    pub fn insert_undecodable(&mut self, token: impl Into<String>) {
        self.widths.insert(token.into(), None);
    }

    /// `None` when the placeholder has no image at all
    pub fn get(&self, token: &str) -> Option<Option<u32>> {
        self.widths.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}

/// Measure every run of a paragraph, splitting where the wrap mode allows
pub fn tokens_for_runs(
    runs: &[StyledRun],
    measure: &dyn TextMeasure,
    emoji: &EmojiWidths,
    config: &RenderConfig,
) -> Vec<Token> {
    let mut tokens = Vec::with_capacity(runs.len());

    for run in runs {
        if run.emoji {
            tokens.push(emoji_token(run.clone(), measure, emoji, config));
            continue;
        }

        // Placeholders never hide inside a text token
        for segment in split_emoji(&run.text) {
            match segment {
                EmojiSegment::Emoji(placeholder) => {
                    let piece = StyledRun::emoji(placeholder);
                    tokens.push(emoji_token(piece, measure, emoji, config));
                },
                EmojiSegment::Text(text) => {
                    push_text(&mut tokens, text, run.style, measure, config.wrap);
                },
            }
        }
    }

    tokens
}

fn push_text(
    tokens: &mut Vec<Token>,
    text: &str,
    style: RunStyle,
    measure: &dyn TextMeasure,
    wrap: WrapMode,
) {
    let pieces = match wrap {
        WrapMode::Word if !style.code => word_segments(text),
        _ => vec![text],
    };

    for piece in pieces.into_iter().filter(|p| !p.is_empty()) {
        let mut width = measure.advance(piece, TextRole::Body, style);
        if style.code {
            width += CODE_PADDING;
        }
        tokens.push(Token {
            run: StyledRun::new(piece, style),
            kind: TokenKind::Text,
            width,
        });
    }
}

fn emoji_token(
    run: StyledRun,
    measure: &dyn TextMeasure,
    emoji: &EmojiWidths,
    config: &RenderConfig,
) -> Token {
    match emoji.get(&run.text) {
        Some(Some(width)) => Token {
            run,
            kind: TokenKind::Emoji,
            width: width as f32,
        },
        Some(None) => Token {
            run,
            kind: TokenKind::EmojiFallback,
            width: config.emoji_fallback_width as f32,
        },
        None => {
            let width = measure.advance(&run.text, TextRole::Body, RunStyle::PLAIN);
            Token {
                run: StyledRun::plain(run.text),
                kind: TokenKind::Text,
                width,
            }
        },
    }
}
