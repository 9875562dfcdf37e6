// this_file: crates/chatcard/src/renderer.rs

//! One message in, one bubble out; many messages in, one stack out.

use std::sync::Arc;

use rayon::prelude::*;

use chatcard_core::{
    error::Result, normalize_role_color, Color, Exporter, FontSources, MessageItem, RenderConfig,
    RenderedMessage,
};
use chatcard_export::PngExporter;
use chatcard_fontdb::{FontCache, Typesetter};
use chatcard_layout::{layout_message, LayoutRequest, MessageLayout};
use chatcard_render_skia::{MessageAssets, Scene, SkiaCompositor};

use crate::stack::{compose_stack, StackOptions};

/// Drives the whole pipeline with one config and a shared font cache
pub struct MessageRenderer {
    config: RenderConfig,
    fonts: Arc<FontCache>,
    compositor: SkiaCompositor,
    exporter: Box<dyn Exporter>,
}

impl MessageRenderer {
    /// Renderer with its own font cache over `sources`
    pub fn new(config: RenderConfig, sources: FontSources) -> Self {
        Self::with_fonts(config, Arc::new(FontCache::new(sources)))
    }

    /// Renderer sharing an existing cache
    ///
    /// The config is sanitized first, so any `RenderConfig` renders.
    pub fn with_fonts(config: RenderConfig, fonts: Arc<FontCache>) -> Self {
        Self {
            config: config.sanitized(),
            fonts,
            compositor: SkiaCompositor::new(),
            exporter: Box::new(PngExporter::new()),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn fonts(&self) -> &Arc<FontCache> {
        &self.fonts
    }

    /// Where bitmaps become bytes
    pub fn exporter(&self) -> &dyn Exporter {
        self.exporter.as_ref()
    }

    /// Geometry of `item` without painting it
    pub fn layout(&self, item: &MessageItem) -> MessageLayout {
        let assets = MessageAssets::decode(item);
        let typesetter = Typesetter::new(&self.fonts, &self.config);
        layout_for(item, &assets, &typesetter, &self.config)
    }

    /// Render one message to an RGB bitmap
    pub fn render_message_bitmap(&self, item: &MessageItem) -> Result<RenderedMessage> {
        self.render_with(item, &self.config)
    }

    /// Render one message to PNG bytes
    pub fn render_message(&self, item: &MessageItem) -> Result<Vec<u8>> {
        let bitmap = self.render_message_bitmap(item)?;
        self.export(&bitmap)
    }

    /// Render every item and stack the ones that succeeded.
    ///
    /// Items render in parallel and come back in input order. An item that
    /// fails is logged and left out of the stack.
    pub fn render_stack_bitmap(&self, items: &[MessageItem], options: &StackOptions) -> RenderedMessage {
        let config = options.item_config(&self.config);

        let rendered: Vec<Option<RenderedMessage>> = items
            .par_iter()
            .enumerate()
            .map(|(index, item)| match self.render_with(item, &config) {
                Ok(bitmap) => Some(bitmap),
                Err(e) => {
                    log::warn!("stack: item {} ({}) dropped: {}", index, item.author_name, e);
                    None
                },
            })
            .collect();

        let bitmaps: Vec<RenderedMessage> = rendered.into_iter().flatten().collect();
        compose_stack(&bitmaps, options.max_width, config.palette.background)
    }

    /// Render a stack to PNG bytes
    pub fn render_stack(&self, items: &[MessageItem], options: &StackOptions) -> Result<Vec<u8>> {
        let bitmap = self.render_stack_bitmap(items, options);
        self.export(&bitmap)
    }

    fn export(&self, bitmap: &RenderedMessage) -> Result<Vec<u8>> {
        log::debug!(
            "{}: encoding {}x{}",
            self.exporter.name(),
            bitmap.width,
            bitmap.height
        );
        self.exporter.export(bitmap)
    }

    fn render_with(&self, item: &MessageItem, config: &RenderConfig) -> Result<RenderedMessage> {
        let assets = MessageAssets::decode(item);
        let typesetter = Typesetter::new(&self.fonts, config);
        let layout = layout_for(item, &assets, &typesetter, config);

        let username_color = username_color(item, config);
        let timestamp = item
            .timestamp
            .as_ref()
            .map(|ts| ts.label(config.utc_offset()));

        let scene = Scene {
            layout: &layout,
            typesetter: &typesetter,
            config,
            author: &item.author_name,
            username_color,
            assets: &assets,
            timestamp: timestamp.as_deref(),
        };
        self.compositor.compose(&scene)
    }
}

fn layout_for(
    item: &MessageItem,
    assets: &MessageAssets,
    typesetter: &Typesetter,
    config: &RenderConfig,
) -> MessageLayout {
    let request = LayoutRequest {
        author: &item.author_name,
        content: &item.content,
        tag: item.guild_tag.as_ref(),
        tag_has_icon: assets.badge.is_some(),
        emoji: &assets.emoji_widths,
    };
    layout_message(&request, typesetter, config)
}

/// Role color when it normalizes, the palette's username color otherwise
fn username_color(item: &MessageItem, config: &RenderConfig) -> Color {
    normalize_role_color(item.role_color.as_deref())
        .and_then(|hex| Color::from_hex(&hex))
        .unwrap_or(config.palette.username)
}
