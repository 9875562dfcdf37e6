//! Where fonts come to life: discovery, fallback and measurement for chatcard
//!
//! The first stage of the pipeline. A message can mix Latin, kana and hanzi
//! in one line, and no single face covers all of that, so every text role
//! gets a [`FontChain`]: an ordered list of faces walked per character,
//! ending in a built-in bitmap font that can always draw something.
//!
//! ## Memory Management
//!
//! Fonts store their raw data and create `FontRef` on-demand for parsing.
//! Chains are built once per (size, weight) by the [`FontCache`] and shared
//! through `Arc`.

use std::fs;
use std::path::Path;

use kurbo::{BezPath, Shape};
use read_fonts::{FontRef as ReadFontRef, TableProvider};
use skrifa::{
    instance::{LocationRef, Size},
    outline::DrawSettings,
    GlyphId, MetadataProvider,
};

use chatcard_core::{
    error::{FontLoadError, Result},
    VerticalMetrics,
};

mod builtin;
mod cache;
mod chain;
mod typesetter;

pub use builtin::BuiltinFont;
pub use cache::{branded_path, FontCache, BRANDED_DIR, CJK_FILE};
pub use chain::{FontChain, FontFace, FontHandle, PlacedGlyph};
pub use typesetter::Typesetter;

/// Character whose outline decides whether a face can draw CJK text
pub const CJK_PROBE: char = 'あ';

/// A font file that's been brought into memory
///
/// Stores the raw font data and creates `FontRef` on-demand for parsing.
/// For TTC collections, the `face_index` specifies which face to use.
pub struct Font {
    data: Vec<u8>,
    face_index: u32,
    units_per_em: u16,
    name: String,
}

impl Font {
    /// Opens a font file from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = fs::read(path)
            .map_err(|_| FontLoadError::FileNotFound(path.display().to_string()))?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::from_data_index(data, 0, name)
    }

    /// Turns raw font bytes into a specific face (for TTC collections)
    pub fn from_data_index(data: Vec<u8>, face_index: u32, name: impl Into<String>) -> Result<Self> {
        // Validate the font data by attempting to parse it
        let font_ref =
            ReadFontRef::from_index(&data, face_index).map_err(|_| FontLoadError::InvalidData)?;

        let units_per_em = font_ref
            .head()
            .map(|head| head.units_per_em())
            .unwrap_or(1000);

        Ok(Font {
            data,
            face_index,
            units_per_em,
            name: name.into(),
        })
    }

    /// Human-readable name, usually the file stem or family name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    /// Creates a FontRef on-demand for parsing operations
    fn font_ref(&self) -> Option<ReadFontRef<'_>> {
        ReadFontRef::from_index(&self.data, self.face_index).ok()
    }

    /// Finds which glyph draws this character; `.notdef` counts as missing
    pub fn glyph_id(&self, ch: char) -> Option<u32> {
        self.font_ref()
            .and_then(|font| font.charmap().map(ch))
            .map(|gid| gid.to_u32())
            .filter(|&gid| gid != 0)
    }

    /// Advance width of a glyph at `size` pixels per em
    pub fn advance(&self, glyph_id: u32, size: f32) -> f32 {
        self.font_ref()
            .and_then(|font| {
                font.glyph_metrics(Size::new(size), LocationRef::default())
                    .advance_width(GlyphId::new(glyph_id))
            })
            .unwrap_or(0.0)
    }

    /// Ascent and descent at `size`, or `None` when the face reports nothing usable
    pub fn vertical_metrics(&self, size: f32) -> Option<VerticalMetrics> {
        let font = self.font_ref()?;
        let metrics = font.metrics(Size::new(size), LocationRef::default());

        // skrifa reports descent as a negative offset below the baseline
        let ascent = metrics.ascent;
        let descent = -metrics.descent;
        if ascent.is_finite() && descent.is_finite() && ascent > 0.0 {
            Some(VerticalMetrics {
                ascent,
                descent: descent.max(0.0),
            })
        } else {
            None
        }
    }

    /// Glyph outline in pixels, y-up with the origin on the baseline
    pub fn outline(&self, glyph_id: u32, size: f32) -> Option<BezPath> {
        let font = self.font_ref()?;
        let glyph = font.outline_glyphs().get(GlyphId::new(glyph_id))?;

        let mut path = BezPath::new();
        let mut pen = PathPen { path: &mut path };
        let settings = DrawSettings::unhinted(Size::new(size), LocationRef::default());

        match glyph.draw(settings, &mut pen) {
            Ok(_) => Some(path),
            Err(e) => {
                log::debug!("{}: outline of glyph {} failed: {:?}", self.name, glyph_id, e);
                None
            },
        }
    }

    /// Whether this face can draw the CJK probe character with visible ink
    pub fn covers_cjk(&self, size: f32) -> bool {
        self.glyph_id(CJK_PROBE)
            .and_then(|gid| self.outline(gid, size))
            .map(|path| path.bounding_box().width() > 0.0)
            .unwrap_or(false)
    }
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name)
            .field("face_index", &self.face_index)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Bridge between skrifa's outline commands and kurbo's path format
struct PathPen<'a> {
    path: &'a mut BezPath,
}

impl skrifa::outline::OutlinePen for PathPen<'_> {
    fn move_to(&mut self, x: f32, y: f32) {
        self.path.move_to((x as f64, y as f64));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.path.line_to((x as f64, y as f64));
    }

    fn quad_to(&mut self, cx0: f32, cy0: f32, x: f32, y: f32) {
        self.path
            .quad_to((cx0 as f64, cy0 as f64), (x as f64, y as f64));
    }

    fn curve_to(&mut self, cx0: f32, cy0: f32, cx1: f32, cy1: f32, x: f32, y: f32) {
        self.path.curve_to(
            (cx0 as f64, cy0 as f64),
            (cx1 as f64, cy1 as f64),
            (x as f64, y as f64),
        );
    }

    fn close(&mut self) {
        self.path.close_path();
    }
}
