//! Header geometry and canvas size

use chatcard_core::{RenderConfig, RunStyle, TextMeasure, TextRole};

/// Vertical space added to the font height of every body line
pub const LINE_SPACING: f32 = 8.0;
/// Gap between username and body, and between header items
pub const HEADER_GAP: f32 = 8.0;
/// Horizontal padding inside the tag badge, each side
pub const TAG_PADDING_X: f32 = 6.0;
/// Vertical padding inside the tag badge, each side
pub const TAG_PADDING_Y: f32 = 2.0;
/// Space between the tag icon and the tag text
pub const TAG_ICON_GAP: f32 = 4.0;

/// Guild tag as the layout sees it
#[derive(Debug, Clone, PartialEq)]
pub struct TagLayout {
    pub text: String,
    pub text_width: f32,
    /// Whether the badge icon decoded and will be drawn
    pub has_icon: bool,
    pub width: f32,
    pub height: f32,
}

impl TagLayout {
    pub fn new(text: &str, has_icon: bool, measure: &dyn TextMeasure, config: &RenderConfig) -> Self {
        let text_width = measure.advance(text, TextRole::Tag, RunStyle::PLAIN);
        let icon = if has_icon {
            config.tag_icon_size as f32 + TAG_ICON_GAP
        } else {
            0.0
        };

        let text_height = measure
            .vertical_metrics(TextRole::Tag)
            .map(|vm| vm.height())
            .unwrap_or_else(|| measure.ink_height("A", TextRole::Tag));
        let inner = if has_icon {
            text_height.max(config.tag_icon_size as f32)
        } else {
            text_height
        };

        Self {
            text: text.to_string(),
            text_width,
            has_icon,
            width: text_width + icon + TAG_PADDING_X * 2.0,
            height: inner + TAG_PADDING_Y * 2.0,
        }
    }
}

/// Username row measurements
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLayout {
    pub name_width: f32,
    /// Ink height of the author name
    pub name_height: f32,
    pub tag: Option<TagLayout>,
}

impl HeaderLayout {
    pub fn new(author: &str, tag: Option<TagLayout>, measure: &dyn TextMeasure) -> Self {
        Self {
            name_width: measure.advance(author, TextRole::Username, RunStyle::PLAIN),
            name_height: measure.ink_height(author, TextRole::Username),
            tag,
        }
    }

    /// Username plus the tag badge when one is shown
    pub fn width(&self) -> f32 {
        self.name_width
            + self
                .tag
                .as_ref()
                .map_or(0.0, |tag| HEADER_GAP + tag.width)
    }

    /// Height of the username row
    pub fn row_height(&self, config: &RenderConfig) -> f32 {
        self.name_height.max(config.username_size)
    }
}

/// Height of one body line: font height plus spacing
pub fn line_height(measure: &dyn TextMeasure) -> f32 {
    match measure.vertical_metrics(TextRole::Body) {
        Some(vm) => vm.height() + LINE_SPACING,
        None => measure.ink_height("A", TextRole::Body) + LINE_SPACING,
    }
}

/// Canvas width for the widest line and the header, clamped to the config
pub fn canvas_width(config: &RenderConfig, text_width: f32, header_width: f32) -> u32 {
    let content = text_width.max(header_width).max(0.0).ceil() as u32;
    let required = config.chrome_width().saturating_add(content);
    // An inverted min/max pair resolves to max_width
    required.max(config.min_width).min(config.max_width)
}

/// Canvas height for `line_count` body lines
pub fn canvas_height(config: &RenderConfig, name_height: f32, line_height: f32, line_count: usize) -> u32 {
    let text = (name_height + HEADER_GAP + line_height * line_count.max(1) as f32).ceil() as u32;
    config
        .padding
        .saturating_mul(2)
        .saturating_add(config.avatar_size.max(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canvas_width_clamps() {
        let config = RenderConfig::default();
        // chrome is 24*2 + 56 + 16 = 120
        assert_eq!(canvas_width(&config, 0.0, 0.0), 420);
        assert_eq!(canvas_width(&config, 500.0, 100.0), 620);
        assert_eq!(canvas_width(&config, 100.0, 500.0), 620);
        assert_eq!(canvas_width(&config, 5000.0, 0.0), 900);
        assert_eq!(canvas_width(&config, 500.2, 0.0), 621);
    }

    #[test]
    fn test_canvas_height_respects_avatar() {
        let config = RenderConfig::default();
        // 24*2 + max(56, 10 + 8 + 20) = 48 + 56
        assert_eq!(canvas_height(&config, 10.0, 20.0, 1), 104);
        // 24*2 + (21 + 8 + 29*3) = 48 + 116
        assert_eq!(canvas_height(&config, 21.0, 29.0, 3), 164);
    }

    #[test]
    fn test_inverted_clamps_do_not_panic() {
        let config = RenderConfig {
            min_width: 1000,
            max_width: 900,
            ..RenderConfig::default()
        };
        assert_eq!(canvas_width(&config, 0.0, 0.0), 900);
    }

    #[test]
    fn test_huge_geometry_saturates() {
        let config = RenderConfig {
            padding: u32::MAX,
            ..RenderConfig::default()
        };
        assert_eq!(canvas_width(&config, 10.0, 0.0), config.max_width);
        assert_eq!(canvas_height(&config, 21.0, 32.0, 1), u32::MAX);
    }

    #[test]
    fn test_zero_lines_counts_as_one() {
        let config = RenderConfig::default();
        assert_eq!(
            canvas_height(&config, 21.0, 40.0, 0),
            canvas_height(&config, 21.0, 40.0, 1)
        );
    }
}
