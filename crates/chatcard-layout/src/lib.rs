//! Layout Engine - from styled runs to lines and a canvas size
//!
//! Layout is pure arithmetic over a [`TextMeasure`]: no pixels, no files, no
//! randomness. The same message, fonts and config always produce the same
//! [`MessageLayout`].
//!
//! The canvas is as wide as the widest body line or the header (whichever
//! wins), plus the avatar column, clamped between `min_width` and
//! `max_width`. Body text wraps at the *advisory* width, so a message can
//! wrap narrower than the canvas it ends up on.

use chatcard_core::{GuildTag, RenderConfig, TextMeasure};
use chatcard_markup::tokenize_content;

mod canvas;
mod token;
mod wrap;

pub use canvas::{
    canvas_height, canvas_width, line_height, HeaderLayout, TagLayout, HEADER_GAP, LINE_SPACING,
    TAG_ICON_GAP, TAG_PADDING_X, TAG_PADDING_Y,
};
pub use token::{tokens_for_runs, EmojiWidths, Token, TokenKind, CODE_PADDING};
pub use wrap::{pack_lines, Line};

/// Everything layout needs to know about one message
#[derive(Debug, Clone, Copy)]
pub struct LayoutRequest<'a> {
    pub author: &'a str,
    pub content: &'a str,
    pub tag: Option<&'a GuildTag>,
    /// Whether the tag's badge icon decoded
    pub tag_has_icon: bool,
    pub emoji: &'a EmojiWidths,
}

/// The complete geometry of one bubble
#[derive(Debug, Clone, PartialEq)]
pub struct MessageLayout {
    pub lines: Vec<Line>,
    pub header: HeaderLayout,
    pub line_height: f32,
    pub max_text_width: f32,
    pub width: u32,
    pub height: u32,
}

impl MessageLayout {
    /// Widest body line
    pub fn text_width(&self) -> f32 {
        self.lines.iter().map(|line| line.width).fold(0.0, f32::max)
    }

    /// Y coordinate of the first body line
    pub fn body_top(&self, config: &RenderConfig) -> f32 {
        config.padding as f32 + self.header.name_height + HEADER_GAP
    }

    /// Y coordinate of body line `index`
    pub fn line_top(&self, config: &RenderConfig, index: usize) -> f32 {
        self.body_top(config) + self.line_height * index as f32
    }
}

/// Lay out one message.
pub fn layout_message(
    request: &LayoutRequest<'_>,
    measure: &dyn TextMeasure,
    config: &RenderConfig,
) -> MessageLayout {
    let max_text_width = config.max_text_width();

    let mut lines = Vec::new();
    for runs in tokenize_content(request.content) {
        let tokens = tokens_for_runs(&runs, measure, request.emoji, config);
        lines.extend(pack_lines(tokens, max_text_width));
    }

    let tag = request
        .tag
        .filter(|tag| tag.is_visible())
        .map(|tag| TagLayout::new(tag.text.trim(), request.tag_has_icon, measure, config));
    let header = HeaderLayout::new(request.author, tag, measure);

    let line_height = line_height(measure);
    let text_width = lines.iter().map(|line| line.width).fold(0.0, f32::max);
    let width = canvas_width(config, text_width, header.width());
    let height = canvas_height(config, header.name_height, line_height, lines.len());

    log::debug!(
        "layout: {} lines, text {:.1}px, header {:.1}px -> {}x{}",
        lines.len(),
        text_width,
        header.width(),
        width,
        height
    );

    MessageLayout {
        lines,
        header,
        line_height,
        max_text_width,
        width,
        height,
    }
}
