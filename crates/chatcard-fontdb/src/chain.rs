//! Fallback chains: one face per character, never nothing
//!
//! A chain is walked character by character. Each character goes to the
//! first face that has a real glyph for it, and the built-in bitmap font
//! takes whatever is left. When the text contains CJK, faces that passed the
//! CJK probe move to the front for that call only.

use std::sync::Arc;

use kurbo::{BezPath, Shape};

use chatcard_core::{FontWeight, VerticalMetrics};
use chatcard_unicode::{detect_script, ScriptClass};

use crate::{BuiltinFont, Font};

/// Where a handle's glyphs come from
#[derive(Debug, Clone)]
pub enum FontFace {
    /// An outline font file
    Outline(Arc<Font>),
    /// The 5x7 bitmap font
    Builtin,
}

/// A face at a size, annotated with whether it can draw CJK
#[derive(Debug, Clone)]
pub struct FontHandle {
    face: FontFace,
    size: f32,
    weight: FontWeight,
    cjk_capable: bool,
    label: String,
}

impl FontHandle {
    /// Wrap an outline font, running the CJK probe once
    pub fn outline(font: Arc<Font>, size: f32, weight: FontWeight) -> Self {
        let cjk_capable = font.covers_cjk(size);
        let label = font.name().to_string();
        Self {
            face: FontFace::Outline(font),
            size,
            weight,
            cjk_capable,
            label,
        }
    }

    pub fn builtin(size: f32, weight: FontWeight) -> Self {
        Self {
            face: FontFace::Builtin,
            size,
            weight,
            cjk_capable: false,
            label: "builtin 5x7".to_string(),
        }
    }

    pub fn face(&self) -> &FontFace {
        &self.face
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    pub fn is_cjk_capable(&self) -> bool {
        self.cjk_capable
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self.face, FontFace::Builtin)
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Glyph for `ch` in this face. The built-in face accepts everything.
    fn lookup(&self, ch: char) -> Option<Option<u32>> {
        match &self.face {
            FontFace::Outline(font) => font.glyph_id(ch).map(Some),
            FontFace::Builtin => Some(None),
        }
    }

    fn glyph_advance(&self, glyph_id: Option<u32>) -> f32 {
        match (&self.face, glyph_id) {
            (FontFace::Outline(font), Some(gid)) => font.advance(gid, self.size),
            _ => BuiltinFont::advance(self.size),
        }
    }

    pub fn vertical_metrics(&self) -> Option<VerticalMetrics> {
        match &self.face {
            FontFace::Outline(font) => font.vertical_metrics(self.size),
            FontFace::Builtin => Some(BuiltinFont::vertical_metrics(self.size)),
        }
    }

    /// Outline of a glyph of this face, y-up around the baseline
    pub fn glyph_outline(&self, glyph_id: u32) -> Option<BezPath> {
        match &self.face {
            FontFace::Outline(font) => font.outline(glyph_id, self.size),
            FontFace::Builtin => None,
        }
    }
}

/// A character positioned along a run
#[derive(Debug, Clone)]
pub struct PlacedGlyph<'c> {
    pub face: &'c FontHandle,
    pub ch: char,
    /// `None` for glyphs drawn by the built-in font
    pub glyph_id: Option<u32>,
    /// Pen position relative to the run start
    pub x: f32,
    pub advance: f32,
}

impl PlacedGlyph<'_> {
    /// Ink extent as (top, bottom) above the baseline, y-up
    pub fn ink_extent(&self) -> Option<(f32, f32)> {
        match self.glyph_id {
            Some(gid) => {
                let bbox = self.face.glyph_outline(gid)?.bounding_box();
                if bbox.width() > 0.0 || bbox.height() > 0.0 {
                    Some((bbox.y1 as f32, bbox.y0 as f32))
                } else {
                    None
                }
            },
            None => BuiltinFont::ink_extent(self.ch, self.face.size()),
        }
    }
}

/// Ordered faces for one (size, weight); the last one is always built-in
#[derive(Debug, Clone)]
pub struct FontChain {
    outlines: Vec<FontHandle>,
    builtin: FontHandle,
    size: f32,
    weight: FontWeight,
}

impl FontChain {
    /// Build a chain from discovered faces; the built-in font is appended
    pub fn new(mut faces: Vec<FontHandle>, size: f32, weight: FontWeight) -> Self {
        faces.retain(|face| !face.is_builtin());
        Self {
            outlines: faces,
            builtin: FontHandle::builtin(size, weight),
            size,
            weight,
        }
    }

    /// A chain holding nothing but the built-in font
    pub fn builtin(size: f32, weight: FontWeight) -> Self {
        Self::new(Vec::new(), size, weight)
    }

    /// Every face in chain order, built-in last
    pub fn faces(&self) -> impl Iterator<Item = &FontHandle> {
        self.outlines.iter().chain(std::iter::once(&self.builtin))
    }

    pub fn face_count(&self) -> usize {
        self.outlines.len() + 1
    }

    /// Whether only the built-in font is available
    pub fn is_builtin_only(&self) -> bool {
        self.outlines.is_empty()
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn weight(&self) -> FontWeight {
        self.weight
    }

    /// The face used for vertical metrics: first CJK-capable, else first
    pub fn primary(&self) -> &FontHandle {
        self.outlines
            .iter()
            .find(|face| face.is_cjk_capable())
            .or_else(|| self.outlines.first())
            .unwrap_or(&self.builtin)
    }

    /// Faces in the order they should be tried for `text`
    pub fn for_text(&self, text: &str) -> Vec<&FontHandle> {
        let mut order: Vec<&FontHandle> = self.faces().collect();
        if detect_script(text) == ScriptClass::Cjk {
            // Stable: relative order inside each group is kept
            order.sort_by_key(|face| !face.is_cjk_capable());
        }
        order
    }

    /// Assign every character of `text` to a face and a pen position
    pub fn place(&self, text: &str) -> Vec<PlacedGlyph<'_>> {
        let order = self.for_text(text);
        let mut placed = Vec::with_capacity(text.len());
        let mut x = 0.0;

        for ch in text.chars() {
            let Some((face, glyph_id)) = order
                .iter()
                .find_map(|face| face.lookup(ch).map(|gid| (*face, gid)))
            else {
                continue;
            };
            let advance = face.glyph_advance(glyph_id);
            placed.push(PlacedGlyph {
                face,
                ch,
                glyph_id,
                x,
                advance,
            });
            x += advance;
        }

        placed
    }

    /// Total advance of `text` in pixels
    pub fn advance(&self, text: &str) -> f32 {
        self.place(text).iter().map(|glyph| glyph.advance).sum()
    }

    pub fn vertical_metrics(&self) -> Option<VerticalMetrics> {
        self.primary().vertical_metrics()
    }

    /// Height of the inked bounding box of `text`
    pub fn ink_height(&self, text: &str) -> f32 {
        let mut top = f32::MIN;
        let mut bottom = f32::MAX;

        for glyph in self.place(text) {
            if let Some((t, b)) = glyph.ink_extent() {
                top = top.max(t);
                bottom = bottom.min(b);
            }
        }

        if top >= bottom {
            top - bottom
        } else {
            0.0
        }
    }

    /// Labels of every face, in chain order
    pub fn describe(&self) -> Vec<String> {
        self.faces()
            .map(|face| {
                let mut line = face.label().to_string();
                if face.is_cjk_capable() {
                    line.push_str(" [cjk]");
                }
                line
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_chain_is_never_empty() {
        let chain = FontChain::builtin(21.0, FontWeight::Regular);
        assert_eq!(chain.face_count(), 1);
        assert!(chain.is_builtin_only());
        assert!(chain.primary().is_builtin());
        assert_eq!(chain.describe(), vec!["builtin 5x7".to_string()]);
    }

    #[test]
    fn test_builtin_is_kept_last() {
        let chain = FontChain::new(
            vec![FontHandle::builtin(21.0, FontWeight::Bold)],
            21.0,
            FontWeight::Bold,
        );
        assert_eq!(chain.face_count(), 1);
        assert!(chain.faces().all(|face| face.is_builtin()));
    }

    #[test]
    fn test_every_character_is_placed() {
        let chain = FontChain::builtin(21.0, FontWeight::Regular);
        let placed = chain.place("Hi 世界");
        assert_eq!(placed.len(), 5);
        assert!(placed.iter().all(|g| g.glyph_id.is_none()));
        assert_eq!(placed[1].x, 18.0);
        assert_eq!(chain.advance("Hi 世界"), 90.0);
    }

    #[test]
    fn test_ink_height_of_capital() {
        let chain = FontChain::builtin(21.0, FontWeight::Regular);
        assert_eq!(chain.ink_height("A"), 21.0);
        assert_eq!(chain.ink_height("   "), 0.0);
        assert_eq!(chain.ink_height(""), 0.0);
        // 'g' has no descender, so it stays inside the rows of 'A'
        assert_eq!(chain.ink_height("Ag"), 21.0);
        // '-' sits only on row 3
        assert_eq!(chain.ink_height("-"), 3.0);
    }

    /// A stand-in face; only the flags matter for ordering
    fn face(label: &str, cjk_capable: bool) -> FontHandle {
        FontHandle {
            face: FontFace::Builtin,
            size: 21.0,
            weight: FontWeight::Regular,
            cjk_capable,
            label: label.to_string(),
        }
    }

    fn mixed_chain() -> FontChain {
        FontChain {
            outlines: vec![face("latin", false), face("cjk", true), face("system", false)],
            builtin: FontHandle::builtin(21.0, FontWeight::Regular),
            size: 21.0,
            weight: FontWeight::Regular,
        }
    }

    fn labels<'c>(faces: &[&'c FontHandle]) -> Vec<&'c str> {
        faces.iter().map(|face| face.label()).collect()
    }

    #[test]
    fn test_cjk_text_moves_cjk_faces_first() {
        let chain = mixed_chain();
        assert_eq!(
            labels(&chain.for_text("Hello")),
            vec!["latin", "cjk", "system", "builtin 5x7"]
        );
        assert_eq!(
            labels(&chain.for_text("Hello世界")),
            vec!["cjk", "latin", "system", "builtin 5x7"]
        );
        // Reordering is per call; the chain itself is untouched
        assert_eq!(
            chain.faces().map(|face| face.label()).collect::<Vec<_>>(),
            vec!["latin", "cjk", "system", "builtin 5x7"]
        );
    }

    #[test]
    fn test_primary_is_first_cjk_capable_face() {
        assert_eq!(mixed_chain().primary().label(), "cjk");
    }

    #[test]
    fn test_vertical_metrics_from_primary() {
        let chain = FontChain::builtin(14.0, FontWeight::Regular);
        let vm = chain.vertical_metrics().unwrap();
        assert_eq!(vm.height(), 16.0);
    }
}
