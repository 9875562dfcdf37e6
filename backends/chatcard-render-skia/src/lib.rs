//! Skia Compositor - a laid-out message becomes pixels
//!
//! Layout already decided where everything goes; this crate only paints.
//! Drawing order is fixed: background, avatar, username, tag badge,
//! timestamp, then body lines top to bottom. The canvas is premultiplied
//! RGBA while drawing and flattened onto the background at the end, so the
//! result is always opaque RGB.

use tiny_skia::{Pixmap, Rect, Transform};

use chatcard_core::{
    error::{RenderError, Result},
    Color, RenderConfig, RenderedMessage, TextRole,
};
use chatcard_fontdb::{FontChain, Typesetter};
use chatcard_layout::{
    HeaderLayout, Line, MessageLayout, TagLayout, TokenKind, CODE_PADDING, HEADER_GAP,
    TAG_ICON_GAP, TAG_PADDING_X,
};

mod assets;
pub mod raster;
pub mod text;

pub use assets::MessageAssets;
pub use text::{draw_text, TextPaint, ITALIC_SKEW};

/// Gap left after each inline emoji image
pub const EMOJI_GAP: f32 = 2.0;
/// Emoji are drawn this much shorter than the line
pub const EMOJI_INSET: f32 = 4.0;
/// Corner radius for code spans and tag badges
pub const CORNER_RADIUS: f32 = 4.0;

/// Everything the compositor paints for one message
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub layout: &'a MessageLayout,
    pub typesetter: &'a Typesetter,
    pub config: &'a RenderConfig,
    pub author: &'a str,
    pub username_color: Color,
    pub assets: &'a MessageAssets,
    /// Already formatted timestamp label
    pub timestamp: Option<&'a str>,
}

/// Largest canvas side the compositor will allocate
pub const MAX_CANVAS_SIZE: u32 = 65535;

/// tiny-skia powered message compositor
#[derive(Debug, Clone, Copy, Default)]
pub struct SkiaCompositor;

impl SkiaCompositor {
    pub fn new() -> Self {
        Self
    }

    /// Paint one bubble.
    ///
    /// A layout larger than [`MAX_CANVAS_SIZE`] is cut down to it: the
    /// bitmap keeps the lines that start inside the canvas and drops the rest.
    pub fn compose(&self, scene: &Scene<'_>) -> Result<RenderedMessage> {
        let (width, height) = (scene.layout.width, scene.layout.height);
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height }.into());
        }

        let (canvas_w, canvas_h) = (width.min(MAX_CANVAS_SIZE), height.min(MAX_CANVAS_SIZE));
        if (canvas_w, canvas_h) != (width, height) {
            log::warn!(
                "render: {} is {}x{}, cut to {}x{}",
                scene.author,
                width,
                height,
                canvas_w,
                canvas_h
            );
        }

        let mut pixmap = Pixmap::new(canvas_w, canvas_h).ok_or(RenderError::PixmapCreationFailed)?;
        let background = scene.config.palette.background;
        pixmap.fill(tiny_skia::Color::from_rgba8(background.r, background.g, background.b, 255));

        draw_avatar(&mut pixmap, scene);
        draw_header(&mut pixmap, scene);

        let mut drawn = 0;
        for (index, line) in scene.layout.lines.iter().enumerate() {
            let top = scene.layout.line_top(scene.config, index);
            if top >= canvas_h as f32 {
                break;
            }
            draw_line(&mut pixmap, scene, line, top);
            drawn += 1;
        }
        if drawn < scene.layout.lines.len() {
            log::warn!(
                "render: {} lines of {} did not fit",
                scene.layout.lines.len() - drawn,
                scene.author
            );
        }

        log::debug!("render: composed {} ({}x{})", scene.author, canvas_w, canvas_h);
        Ok(raster::flatten(&pixmap, background))
    }
}

fn draw_avatar(pixmap: &mut Pixmap, scene: &Scene<'_>) {
    let config = scene.config;
    let origin = config.padding as i32;

    let rounded = scene
        .assets
        .avatar
        .as_ref()
        .and_then(|avatar| raster::round_avatar(avatar, config.avatar_size));
    match rounded {
        Some(avatar) => raster::blend_image(pixmap, &avatar, origin, origin),
        None => raster::fill_circle(
            pixmap,
            origin as f32,
            origin as f32,
            config.avatar_size as f32,
            config.palette.placeholder,
        ),
    }
}

/// Baseline that centers the chain's line box in `height` starting at `top`
fn centered_baseline(chain: &FontChain, text: &str, top: f32, height: f32) -> f32 {
    match chain.vertical_metrics() {
        Some(vm) => top + ((height - vm.height()) / 2.0).max(0.0) + vm.ascent,
        None => {
            let ink = chain.ink_height(text);
            top + ((height - ink) / 2.0).max(0.0) + ink
        },
    }
}

fn draw_header(pixmap: &mut Pixmap, scene: &Scene<'_>) {
    let config = scene.config;
    let header: &HeaderLayout = &scene.layout.header;
    let text_x = config.text_x() as f32;
    let top = config.padding as f32;
    let row_height = header.row_height(config);

    let username = &scene.typesetter.username;
    let baseline = match username.vertical_metrics() {
        Some(vm) => top + vm.ascent,
        None => top + header.name_height,
    };
    draw_text(pixmap, username, scene.author, text_x, baseline, TextPaint::solid(scene.username_color));

    if let Some(tag) = &header.tag {
        let tag_x = text_x + header.name_width + HEADER_GAP;
        draw_tag(pixmap, scene, tag, tag_x, top + (row_height - tag.height) / 2.0);
    }

    // Not part of the header width; it may run into the right padding
    if let Some(label) = scene.timestamp.filter(|label| !label.is_empty()) {
        let chain = &scene.typesetter.timestamp;
        let x = text_x + header.width() + HEADER_GAP;
        let baseline = centered_baseline(chain, label, top, row_height);
        draw_text(pixmap, chain, label, x, baseline, TextPaint::solid(config.palette.timestamp));
    }
}

fn draw_tag(pixmap: &mut Pixmap, scene: &Scene<'_>, tag: &TagLayout, x: f32, y: f32) {
    let config = scene.config;
    raster::fill_rounded_rect(
        pixmap,
        x,
        y,
        tag.width,
        tag.height,
        CORNER_RADIUS,
        config.palette.tag_background,
    );

    let mut text_x = x + TAG_PADDING_X;
    if tag.has_icon {
        if let Some(badge) = &scene.assets.badge {
            let size = config.tag_icon_size;
            let icon = raster::resize(badge, size, size);
            let icon_y = y + (tag.height - size as f32) / 2.0;
            raster::blend_image(pixmap, &icon, text_x.round() as i32, icon_y.round() as i32);
        }
        text_x += config.tag_icon_size as f32 + TAG_ICON_GAP;
    }

    let chain = &scene.typesetter.tag;
    let baseline = centered_baseline(chain, &tag.text, y, tag.height);
    draw_text(pixmap, chain, &tag.text, text_x, baseline, TextPaint::solid(config.palette.tag_text));
}

fn draw_line(pixmap: &mut Pixmap, scene: &Scene<'_>, line: &Line, top: f32) {
    let config = scene.config;
    let palette = &config.palette;
    let line_height = scene.layout.line_height;
    let body = &scene.typesetter.body;
    let (ascent, text_height) = match body.vertical_metrics() {
        Some(vm) => (vm.ascent, vm.height()),
        None => {
            let ink = body.ink_height("A");
            (ink, ink)
        },
    };
    let baseline = top + ascent;
    let mut x = config.text_x() as f32;

    for token in &line.tokens {
        match token.kind {
            TokenKind::Emoji => match scene.assets.emoji.get(token.text()) {
                Some(image) => {
                    let target_h = (line_height - EMOJI_INSET).max(1.0);
                    let target_w = (image.width() as f32 * target_h / image.height() as f32).round().max(1.0);
                    let scaled = raster::resize(image, target_w as u32, target_h as u32);
                    raster::blend_image(pixmap, &scaled, x.round() as i32, (top + EMOJI_INSET / 2.0).round() as i32);
                    x += target_w + EMOJI_GAP;
                },
                None => {
                    x += draw_text(pixmap, body, token.text(), x, baseline, TextPaint::solid(palette.text));
                },
            },
            TokenKind::EmojiFallback => {
                x += draw_text(pixmap, body, token.text(), x, baseline, TextPaint::solid(palette.text));
            },
            TokenKind::Text if token.style().code => {
                raster::fill_rounded_rect(
                    pixmap,
                    x,
                    top - 2.0,
                    token.width,
                    text_height + 4.0,
                    CORNER_RADIUS,
                    palette.code_background,
                );
                draw_text(
                    pixmap,
                    body,
                    token.text(),
                    x + CODE_PADDING / 2.0,
                    baseline,
                    TextPaint::solid(palette.code),
                );
                x += token.width;
            },
            TokenKind::Text => {
                let style = token.style();
                let chain = scene.typesetter.chain(TextRole::Body, style);
                let paint = TextPaint {
                    color: palette.text,
                    italic: style.italic,
                };
                draw_text(pixmap, chain, token.text(), x, baseline, paint);
                if style.strikethrough {
                    strike(pixmap, x, token.width, top + text_height / 2.0, chain, palette.text);
                }
                x += token.width;
            },
        }
    }
}

fn strike(pixmap: &mut Pixmap, x: f32, width: f32, y: f32, chain: &FontChain, color: Color) {
    let thickness = (chain.size() / 14.0).round().max(1.0);
    if let Some(rect) = Rect::from_xywh(x, y - thickness / 2.0, width, thickness) {
        pixmap.fill_rect(rect, &raster::paint(color), Transform::identity(), None);
    }
}
