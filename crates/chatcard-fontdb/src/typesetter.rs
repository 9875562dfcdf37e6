//! The chains one render needs, behind [`TextMeasure`]

use std::sync::Arc;

use chatcard_core::{FontWeight, RenderConfig, RunStyle, TextMeasure, TextRole, VerticalMetrics};

use crate::{FontCache, FontChain};

/// Fallback chains for every piece of text in a bubble
#[derive(Debug, Clone)]
pub struct Typesetter {
    pub username: Arc<FontChain>,
    pub body: Arc<FontChain>,
    pub body_bold: Arc<FontChain>,
    pub tag: Arc<FontChain>,
    pub timestamp: Arc<FontChain>,
}

impl Typesetter {
    pub fn new(cache: &FontCache, config: &RenderConfig) -> Self {
        Self {
            username: cache.chain(config.username_size, config.username_weight),
            body: cache.chain(config.body_size, FontWeight::Regular),
            body_bold: cache.chain(config.body_size, FontWeight::Bold),
            tag: cache.chain(config.tag_size, FontWeight::Semibold),
            timestamp: cache.chain(config.timestamp_size, FontWeight::Regular),
        }
    }

    /// The chain that draws text of `role` in `style`
    pub fn chain(&self, role: TextRole, style: RunStyle) -> &FontChain {
        match role {
            TextRole::Username => &self.username,
            TextRole::Body if style.bold => &self.body_bold,
            TextRole::Body => &self.body,
            TextRole::Tag => &self.tag,
            TextRole::Timestamp => &self.timestamp,
        }
    }
}

impl TextMeasure for Typesetter {
    fn advance(&self, text: &str, role: TextRole, style: RunStyle) -> f32 {
        self.chain(role, style).advance(text)
    }

    fn vertical_metrics(&self, role: TextRole) -> Option<VerticalMetrics> {
        self.chain(role, RunStyle::PLAIN).vertical_metrics()
    }

    fn ink_height(&self, text: &str, role: TextRole) -> f32 {
        self.chain(role, RunStyle::PLAIN).ink_height(text)
    }
}
