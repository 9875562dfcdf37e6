//! Glyph drawing: outline faces through tiny-skia paths, the built-in face as cells

use kurbo::{BezPath, PathEl};
use tiny_skia::{FillRule, PathBuilder, Pixmap, Rect, Transform};

use chatcard_core::{Color, FontWeight};
use chatcard_fontdb::{BuiltinFont, FontChain, PlacedGlyph};

use crate::raster::paint;

/// Horizontal shear applied to italic runs, tan(12°)
pub const ITALIC_SKEW: f32 = 0.2126;

/// How a run of text is painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextPaint {
    pub color: Color,
    pub italic: bool,
}

impl TextPaint {
    pub fn solid(color: Color) -> Self {
        Self { color, italic: false }
    }
}

/// Draw `text` with its pen starting at (x, baseline). Returns the advance.
pub fn draw_text(
    pixmap: &mut Pixmap,
    chain: &FontChain,
    text: &str,
    x: f32,
    baseline: f32,
    style: TextPaint,
) -> f32 {
    let placed = chain.place(text);
    let mut advance = 0.0;

    for glyph in &placed {
        let origin = x + glyph.x;
        match glyph.glyph_id {
            Some(gid) => match glyph.face.glyph_outline(gid) {
                Some(outline) => draw_outline(pixmap, &outline, origin, baseline, style),
                None => log::debug!("render: no outline for '{}' in {}", glyph.ch, glyph.face.label()),
            },
            None => draw_builtin(pixmap, glyph, origin, baseline, style),
        }
        advance = glyph.x + glyph.advance;
    }

    advance
}

fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();
    for element in path.elements() {
        match *element {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(ctrl, end) => {
                builder.quad_to(ctrl.x as f32, ctrl.y as f32, end.x as f32, end.y as f32)
            },
            PathEl::CurveTo(c1, c2, end) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                end.x as f32,
                end.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }
    builder.finish()
}

fn draw_outline(pixmap: &mut Pixmap, outline: &BezPath, x: f32, baseline: f32, style: TextPaint) {
    // Spaces and other blank glyphs have no path
    let Some(path) = to_skia_path(outline) else {
        return;
    };

    // Font space is y-up; flip around the baseline and shear for italics
    let skew = if style.italic { ITALIC_SKEW } else { 0.0 };
    let transform = Transform::from_row(1.0, 0.0, skew, -1.0, x, baseline);

    pixmap.fill_path(&path, &paint(style.color), FillRule::Winding, transform, None);
}

fn draw_builtin(pixmap: &mut Pixmap, glyph: &PlacedGlyph<'_>, x: f32, baseline: f32, style: TextPaint) {
    let s = BuiltinFont::scale(glyph.face.size()) as f32;
    // Heavier weights get a wider stroke
    let extra = match glyph.face.weight() {
        FontWeight::Semibold | FontWeight::Bold => (s / 2.0).max(1.0),
        _ => 0.0,
    };
    let mut cell_paint = paint(style.color);
    cell_paint.anti_alias = false;

    for (col, row) in BuiltinFont::cells(glyph.ch) {
        let height_above = (7 - row) as f32 * s;
        let shear = if style.italic {
            (ITALIC_SKEW * (height_above - s / 2.0)).round()
        } else {
            0.0
        };
        let left = x + col as f32 * s + shear;
        let top = baseline - height_above;
        if let Some(rect) = Rect::from_xywh(left, top, s + extra, s) {
            pixmap.fill_rect(rect, &cell_paint, Transform::identity(), None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(pixmap: &Pixmap) -> usize {
        pixmap.data().chunks_exact(4).filter(|px| px[3] > 0).count()
    }

    #[test]
    fn test_builtin_text_leaves_ink() {
        let chain = FontChain::builtin(21.0, FontWeight::Regular);
        let mut pixmap = Pixmap::new(100, 40).unwrap();
        let advance = draw_text(&mut pixmap, &chain, "Hi", 2.0, 30.0, TextPaint::solid(Color::white()));

        assert_eq!(advance, 36.0);
        assert!(lit(&pixmap) > 0);
        // Nothing below the baseline for capitals
        let below: usize = (30..40)
            .flat_map(|y| (0..100).map(move |x| (x, y)))
            .filter(|(x, y)| pixmap.data()[((y * 100 + x) * 4 + 3) as usize] > 0)
            .count();
        assert_eq!(below, 0);
    }

    #[test]
    fn test_spaces_draw_nothing() {
        let chain = FontChain::builtin(21.0, FontWeight::Regular);
        let mut pixmap = Pixmap::new(60, 40).unwrap();
        let advance = draw_text(&mut pixmap, &chain, "   ", 0.0, 30.0, TextPaint::solid(Color::white()));
        assert_eq!(advance, 54.0);
        assert_eq!(lit(&pixmap), 0);
    }

    #[test]
    fn test_bold_builtin_is_heavier() {
        let regular = FontChain::builtin(21.0, FontWeight::Regular);
        let bold = FontChain::builtin(21.0, FontWeight::Bold);
        let mut a = Pixmap::new(60, 40).unwrap();
        let mut b = Pixmap::new(60, 40).unwrap();
        draw_text(&mut a, &regular, "l", 0.0, 30.0, TextPaint::solid(Color::white()));
        draw_text(&mut b, &bold, "l", 0.0, 30.0, TextPaint::solid(Color::white()));
        assert!(lit(&b) > lit(&a));
    }

    #[test]
    fn test_italic_shifts_the_top() {
        let chain = FontChain::builtin(21.0, FontWeight::Regular);
        let mut upright = Pixmap::new(60, 40).unwrap();
        let mut slanted = Pixmap::new(60, 40).unwrap();
        draw_text(&mut upright, &chain, "I", 10.0, 30.0, TextPaint::solid(Color::white()));
        let italic = TextPaint {
            color: Color::white(),
            italic: true,
        };
        draw_text(&mut slanted, &chain, "I", 10.0, 30.0, italic);
        assert_ne!(upright.data(), slanted.data());
    }
}
