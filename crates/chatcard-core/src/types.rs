//! The data structures that power the pipeline

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, Local, Utc};
use serde::{Deserialize, Serialize};

/// Where an avatar's pixels come from
///
/// Each variant has exactly one way of being decoded; there is no runtime
/// probing of what the caller handed over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AvatarSource {
    /// Encoded image bytes already fetched by the caller
    Bytes(Vec<u8>),
    /// A file on disk
    Path(PathBuf),
}

/// Community affiliation badge shown beside the username
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuildTag {
    /// Short label, usually four characters or fewer
    pub text: String,
    /// Encoded badge icon
    pub badge: Option<Vec<u8>>,
    /// Users can hide their tag; disabled tags are not drawn
    pub enabled: bool,
}

impl GuildTag {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            badge: None,
            enabled: true,
        }
    }

    pub fn with_badge(mut self, badge: Vec<u8>) -> Self {
        self.badge = Some(badge);
        self
    }

    /// Whether anything should be drawn for this tag.
    pub fn is_visible(&self) -> bool {
        self.enabled && !self.text.trim().is_empty()
    }
}

/// When a message was sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// A point in time, shown as hour:minute
    At(DateTime<Utc>),
    /// Already-formatted text, shown verbatim
    Text(String),
}

impl Timestamp {
    /// The string drawn next to the username.
    ///
    /// Instants are shown as 24-hour `HH:MM`, in the given offset when one is
    /// supplied and in the process's local zone otherwise.
    pub fn label(&self, offset: Option<FixedOffset>) -> String {
        match self {
            Timestamp::At(instant) => match offset {
                Some(offset) => instant.with_timezone(&offset).format("%H:%M").to_string(),
                None => instant.with_timezone(&Local).format("%H:%M").to_string(),
            },
            Timestamp::Text(text) => text.clone(),
        }
    }
}

/// One message to render
///
/// Everything here is already resolved: bytes fetched, colors looked up.
#[derive(Debug, Clone, Default)]
pub struct MessageItem {
    pub author_name: String,
    /// Markdown-flavored content, may contain hard newlines
    pub content: String,
    pub avatar: Option<AvatarSource>,
    /// Hex color in any of the shapes `normalize_role_color` accepts
    pub role_color: Option<String>,
    pub guild_tag: Option<GuildTag>,
    /// Emoji placeholder (`<:name:id>`) to encoded image bytes
    pub emoji_images: HashMap<String, Vec<u8>>,
    pub timestamp: Option<Timestamp>,
}

impl MessageItem {
    pub fn new(author_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            author_name: author_name.into(),
            content: content.into(),
            ..Default::default()
        }
    }
}

/// Markdown style flags carried by a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub strikethrough: bool,
}

impl RunStyle {
    pub const PLAIN: RunStyle = RunStyle {
        bold: false,
        italic: false,
        code: false,
        strikethrough: false,
    };
    pub const BOLD: RunStyle = RunStyle {
        bold: true,
        ..RunStyle::PLAIN
    };
    pub const ITALIC: RunStyle = RunStyle {
        italic: true,
        ..RunStyle::PLAIN
    };
    pub const BOLD_ITALIC: RunStyle = RunStyle {
        bold: true,
        italic: true,
        ..RunStyle::PLAIN
    };
    pub const CODE: RunStyle = RunStyle {
        code: true,
        ..RunStyle::PLAIN
    };
    pub const STRIKETHROUGH: RunStyle = RunStyle {
        strikethrough: true,
        ..RunStyle::PLAIN
    };

    pub fn is_plain(&self) -> bool {
        *self == RunStyle::PLAIN
    }
}

/// A contiguous span of text sharing one style
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledRun {
    pub text: String,
    pub style: RunStyle,
    /// Set for custom emoji placeholders
    pub emoji: bool,
}

impl StyledRun {
    pub fn new(text: impl Into<String>, style: RunStyle) -> Self {
        Self {
            text: text.into(),
            style,
            emoji: false,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, RunStyle::PLAIN)
    }

    pub fn emoji(token: impl Into<String>) -> Self {
        Self {
            text: token.into(),
            style: RunStyle::PLAIN,
            emoji: true,
        }
    }
}

/// Named font weights the asset directory ships
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontWeight {
    #[default]
    Regular,
    Medium,
    Semibold,
    Bold,
}

impl FontWeight {
    /// The weight as it appears in asset file names.
    pub fn label(&self) -> &'static str {
        match self {
            FontWeight::Regular => "Regular",
            FontWeight::Medium => "Medium",
            FontWeight::Semibold => "Semibold",
            FontWeight::Bold => "Bold",
        }
    }

    /// CSS-style numeric weight, used when querying system fonts.
    pub fn numeric(&self) -> u16 {
        match self {
            FontWeight::Regular => 400,
            FontWeight::Medium => 500,
            FontWeight::Semibold => 600,
            FontWeight::Bold => 700,
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FontWeight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "regular" | "400" => Ok(FontWeight::Regular),
            "medium" | "500" => Ok(FontWeight::Medium),
            "semibold" | "600" => Ok(FontWeight::Semibold),
            "bold" | "700" => Ok(FontWeight::Bold),
            other => Err(format!("unknown font weight '{other}'")),
        }
    }
}

/// Which piece of the bubble a string belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextRole {
    Username,
    Body,
    Tag,
    Timestamp,
}

/// Ascent and descent in pixels, both positive
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalMetrics {
    pub ascent: f32,
    pub descent: f32,
}

impl VerticalMetrics {
    pub fn height(&self) -> f32 {
        self.ascent + self.descent
    }
}

/// How pixels are arranged in the bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitmapFormat {
    Rgba8,
    Rgb8,
}

impl BitmapFormat {
    pub fn channels(&self) -> usize {
        match self {
            BitmapFormat::Rgba8 => 4,
            BitmapFormat::Rgb8 => 3,
        }
    }
}

/// Raw pixel data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitmapData {
    pub width: u32,
    pub height: u32,
    pub format: BitmapFormat,
    pub data: Vec<u8>,
}

impl BitmapData {
    /// A solid opaque RGB bitmap.
    pub fn filled_rgb(width: u32, height: u32, color: crate::Color) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&[color.r, color.g, color.b]);
        }
        Self {
            width,
            height,
            format: BitmapFormat::Rgb8,
            data,
        }
    }

    /// Pixel at (x, y) as RGBA; out-of-range reads return `None`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.format.channels();
        let idx = (y as usize * self.width as usize + x as usize) * channels;
        let px = self.data.get(idx..idx + channels)?;
        Some(match self.format {
            BitmapFormat::Rgba8 => [px[0], px[1], px[2], px[3]],
            BitmapFormat::Rgb8 => [px[0], px[1], px[2], 255],
        })
    }
}

/// One rendered message bubble, always opaque RGB
pub type RenderedMessage = BitmapData;

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_labels() {
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 13, 7, 42).unwrap();
        let jst = FixedOffset::east_opt(9 * 3600).unwrap();
        assert_eq!(Timestamp::At(at).label(Some(jst)), "22:07");
        assert_eq!(
            Timestamp::Text("yesterday".into()).label(Some(jst)),
            "yesterday"
        );

        let local = Timestamp::At(at).label(None);
        assert_eq!(local.len(), 5);
        assert_eq!(local.as_bytes()[2], b':');
    }

    #[test]
    fn test_hidden_tags_are_not_visible() {
        assert!(GuildTag::new("RUST").is_visible());
        assert!(!GuildTag::new("   ").is_visible());
        let mut tag = GuildTag::new("RUST");
        tag.enabled = false;
        assert!(!tag.is_visible());
    }

    #[test]
    fn test_font_weights_parse_from_labels_and_numbers() {
        assert_eq!("Semibold".parse::<FontWeight>(), Ok(FontWeight::Semibold));
        assert_eq!("700".parse::<FontWeight>(), Ok(FontWeight::Bold));
        assert!("heavy".parse::<FontWeight>().is_err());
        assert_eq!(FontWeight::Medium.to_string(), "Medium");
    }

    #[test]
    fn test_bitmap_pixel_reads() {
        let bmp = BitmapData::filled_rgb(2, 2, crate::Color::rgb(1, 2, 3));
        assert_eq!(bmp.pixel(1, 1), Some([1, 2, 3, 255]));
        assert_eq!(bmp.pixel(2, 0), None);
    }
}
