//! Rendering configuration
//!
//! Defaults reproduce the dark chat-client look: 56px round avatars, 21px
//! text, a #36393F background. Every field can be overridden from JSON.

use std::path::{Path, PathBuf};

use chrono::FixedOffset;
use serde::{Deserialize, Serialize};

use crate::error::{ChatcardError, Result};
use crate::types::FontWeight;
use crate::Color;

/// Upper bound on padding, avatar, gap and icon sizes, in pixels
pub const MAX_GEOMETRY: u32 = 4096;
/// Upper bound on any font size, in pixels
pub const MAX_FONT_SIZE: f32 = 512.0;

/// How body text is broken into atomic layout tokens
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WrapMode {
    /// Each styled run is one unbreakable token
    #[default]
    Run,
    /// Runs are further split at word boundaries
    Word,
}

/// Palette used by the compositor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: Color,
    pub username: Color,
    pub text: Color,
    pub timestamp: Color,
    /// Avatar placeholder circle
    pub placeholder: Color,
    pub code_background: Color,
    pub code: Color,
    pub tag_background: Color,
    pub tag_text: Color,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: Color::rgb(0x36, 0x39, 0x3f),
            username: Color::white(),
            text: Color::rgb(0xdd, 0xdd, 0xdd),
            timestamp: Color::rgb(0x99, 0xaa, 0xb5),
            placeholder: Color::rgb(0x99, 0xaa, 0xb5),
            code_background: Color::rgb(0x2f, 0x31, 0x36),
            code: Color::rgb(0xe6, 0xe6, 0xe6),
            tag_background: Color::rgb(0x4e, 0x50, 0x58),
            tag_text: Color::white(),
        }
    }
}

/// Geometry, typography and colors for one message bubble
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Advisory width; decides where body text wraps
    pub width: u32,
    /// Hard lower clamp on canvas width
    pub min_width: u32,
    /// Hard upper clamp on canvas width
    pub max_width: u32,
    pub padding: u32,
    pub avatar_size: u32,
    /// Space between avatar and text column
    pub gap: u32,
    pub username_size: f32,
    pub username_weight: FontWeight,
    pub body_size: f32,
    pub timestamp_size: f32,
    pub tag_size: f32,
    pub tag_icon_size: u32,
    /// Width reserved for an emoji whose image could not be decoded
    pub emoji_fallback_width: u32,
    pub wrap: WrapMode,
    /// Zone for timestamp instants, in minutes east of UTC. `None` = local time
    pub utc_offset_minutes: Option<i32>,
    pub palette: Palette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1100,
            min_width: 420,
            max_width: 900,
            padding: 24,
            avatar_size: 56,
            gap: 16,
            username_size: 21.0,
            username_weight: FontWeight::Semibold,
            body_size: 21.0,
            timestamp_size: 14.0,
            tag_size: 14.0,
            tag_icon_size: 16,
            emoji_fallback_width: 21,
            wrap: WrapMode::Run,
            utc_offset_minutes: None,
            palette: Palette::default(),
        }
    }
}

impl RenderConfig {
    /// Load a config from a JSON file; missing fields keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: RenderConfig =
            serde_json::from_str(raw).map_err(|e| ChatcardError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that cannot produce a canvas.
    pub fn validate(&self) -> Result<()> {
        if self.min_width == 0 || self.max_width == 0 {
            return Err(ChatcardError::Config("widths must be non-zero".into()));
        }
        if self.min_width > self.max_width {
            return Err(ChatcardError::Config(format!(
                "min_width {} exceeds max_width {}",
                self.min_width, self.max_width
            )));
        }
        for (name, value) in self.geometry() {
            if value > MAX_GEOMETRY {
                return Err(ChatcardError::Config(format!(
                    "{name} {value} exceeds {MAX_GEOMETRY}"
                )));
            }
        }
        for (name, size) in self.font_sizes() {
            if !(size.is_finite() && size > 0.0 && size <= MAX_FONT_SIZE) {
                return Err(ChatcardError::Config(format!(
                    "{name} must be in (0, {MAX_FONT_SIZE}]"
                )));
            }
        }
        Ok(())
    }

    /// The closest config that passes [`RenderConfig::validate`].
    ///
    /// Widths are raised to 1 and `min_width` is lowered to `max_width`,
    /// oversized geometry is clamped, and unusable font sizes fall back to
    /// their defaults. Every correction is logged.
    pub fn sanitized(mut self) -> Self {
        if self.min_width == 0 || self.max_width == 0 {
            log::warn!("config: zero canvas width raised to 1");
            self.min_width = self.min_width.max(1);
            self.max_width = self.max_width.max(1);
        }
        if self.min_width > self.max_width {
            log::warn!(
                "config: min_width {} lowered to max_width {}",
                self.min_width,
                self.max_width
            );
            self.min_width = self.max_width;
        }

        for (name, field) in [
            ("padding", &mut self.padding),
            ("avatar_size", &mut self.avatar_size),
            ("gap", &mut self.gap),
            ("tag_icon_size", &mut self.tag_icon_size),
            ("emoji_fallback_width", &mut self.emoji_fallback_width),
        ] {
            if *field > MAX_GEOMETRY {
                log::warn!("config: {} {} clamped to {}", name, field, MAX_GEOMETRY);
                *field = MAX_GEOMETRY;
            }
        }

        let defaults = RenderConfig::default();
        for (name, field, default) in [
            ("username_size", &mut self.username_size, defaults.username_size),
            ("body_size", &mut self.body_size, defaults.body_size),
            ("timestamp_size", &mut self.timestamp_size, defaults.timestamp_size),
            ("tag_size", &mut self.tag_size, defaults.tag_size),
        ] {
            if !(field.is_finite() && *field > 0.0 && *field <= MAX_FONT_SIZE) {
                log::warn!("config: {} {} replaced by {}", name, field, default);
                *field = default;
            }
        }

        self
    }

    fn geometry(&self) -> [(&'static str, u32); 5] {
        [
            ("padding", self.padding),
            ("avatar_size", self.avatar_size),
            ("gap", self.gap),
            ("tag_icon_size", self.tag_icon_size),
            ("emoji_fallback_width", self.emoji_fallback_width),
        ]
    }

    fn font_sizes(&self) -> [(&'static str, f32); 4] {
        [
            ("username_size", self.username_size),
            ("body_size", self.body_size),
            ("timestamp_size", self.timestamp_size),
            ("tag_size", self.tag_size),
        ]
    }

    /// X coordinate of the text column (username and body).
    pub fn text_x(&self) -> u32 {
        self.padding
            .saturating_add(self.avatar_size)
            .saturating_add(self.gap)
    }

    /// Horizontal space consumed by everything except text.
    pub fn chrome_width(&self) -> u32 {
        self.padding
            .saturating_mul(2)
            .saturating_add(self.avatar_size)
            .saturating_add(self.gap)
    }

    /// Widest a body line may get before wrapping.
    pub fn max_text_width(&self) -> f32 {
        self.width.saturating_sub(self.chrome_width()) as f32
    }

    pub fn utc_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes.saturating_mul(60)))
    }
}

/// Where the font resolver looks for assets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontSources {
    /// Directory holding `gg-sans-2/` and the CJK font
    pub font_dir: Option<PathBuf>,
    /// Whether to scan installed system fonts
    pub system_fonts: bool,
}

impl Default for FontSources {
    fn default() -> Self {
        Self {
            font_dir: None,
            system_fonts: true,
        }
    }
}

impl FontSources {
    pub fn with_font_dir(font_dir: impl Into<PathBuf>) -> Self {
        Self {
            font_dir: Some(font_dir.into()),
            ..Self::default()
        }
    }

    /// Nothing but the built-in bitmap font; fully deterministic.
    pub fn builtin_only() -> Self {
        Self {
            font_dir: None,
            system_fonts: false,
        }
    }
}
