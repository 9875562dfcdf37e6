//! Stack Composer - bubbles on top of each other
//!
//! Bubbles keep their own heights and are centered on a shared width. The
//! first item ends up on top.

use chatcard_core::{BitmapData, BitmapFormat, Color, RenderConfig, RenderedMessage};

/// Width used for an empty stack when the cap allows it
pub const EMPTY_STACK_WIDTH: u32 = 420;
/// Height of the blank image returned for an empty stack
pub const EMPTY_STACK_HEIGHT: u32 = 80;

/// How a stack is sized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackOptions {
    /// Advisory width handed to every item; `None` uses the cap
    pub width: Option<u32>,
    /// Upper bound on the stack width
    pub max_width: u32,
}

impl Default for StackOptions {
    fn default() -> Self {
        Self {
            width: None,
            max_width: 900,
        }
    }
}

impl StackOptions {
    pub fn with_width(width: u32) -> Self {
        Self {
            width: Some(width),
            ..Self::default()
        }
    }

    /// The config each item renders with
    pub fn item_config(&self, base: &RenderConfig) -> RenderConfig {
        let cap = self.max_width.max(1);
        RenderConfig {
            width: self.width.unwrap_or(cap),
            max_width: cap,
            min_width: base.min_width.min(cap),
            ..base.clone()
        }
    }
}

/// Paste `bitmaps` top to bottom onto one canvas no wider than `cap`.
pub fn compose_stack(bitmaps: &[RenderedMessage], cap: u32, background: Color) -> RenderedMessage {
    let cap = cap.max(1);
    if bitmaps.is_empty() {
        log::warn!("stack: nothing rendered, returning a blank image");
        return BitmapData::filled_rgb(EMPTY_STACK_WIDTH.min(cap), EMPTY_STACK_HEIGHT, background);
    }

    let width = bitmaps
        .iter()
        .map(|bitmap| bitmap.width)
        .max()
        .unwrap_or(cap)
        .min(cap)
        .max(1);
    let height: u32 = bitmaps.iter().map(|bitmap| bitmap.height).sum();

    let mut canvas = BitmapData::filled_rgb(width, height, background);
    let mut y = 0;
    for bitmap in bitmaps {
        let x = width.saturating_sub(bitmap.width) / 2;
        paste(&mut canvas, bitmap, x, y);
        y += bitmap.height;
    }

    log::debug!("stack: {} items -> {}x{}", bitmaps.len(), width, height);
    canvas
}

/// Copy `src` into the RGB `canvas` at (x, y), clipping on the right
fn paste(canvas: &mut BitmapData, src: &BitmapData, x: u32, y: u32) {
    let columns = src.width.min(canvas.width.saturating_sub(x)) as usize;
    let stride = canvas.width as usize * 3;

    for row in 0..src.height.min(canvas.height.saturating_sub(y)) {
        let dst_start = (y + row) as usize * stride + x as usize * 3;
        let dst = &mut canvas.data[dst_start..dst_start + columns * 3];

        match src.format {
            BitmapFormat::Rgb8 => {
                let src_start = row as usize * src.width as usize * 3;
                if let Some(line) = src.data.get(src_start..src_start + columns * 3) {
                    dst.copy_from_slice(line);
                }
            },
            BitmapFormat::Rgba8 => {
                for (col, px) in dst.chunks_exact_mut(3).enumerate() {
                    if let Some([r, g, b, _]) = src.pixel(col as u32, row) {
                        px.copy_from_slice(&[r, g, b]);
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BG: Color = Color::rgb(0x36, 0x39, 0x3f);

    #[test]
    fn test_empty_stack_is_small() {
        let blank = compose_stack(&[], 900, BG);
        assert_eq!((blank.width, blank.height), (420, 80));
        assert_eq!(blank.pixel(10, 10), Some([0x36, 0x39, 0x3f, 255]));

        let narrow = compose_stack(&[], 300, BG);
        assert_eq!(narrow.width, 300);
    }

    #[test]
    fn test_heights_add_up_and_narrow_items_center() {
        let red = BitmapData::filled_rgb(100, 10, Color::rgb(255, 0, 0));
        let blue = BitmapData::filled_rgb(50, 20, Color::rgb(0, 0, 255));
        let stack = compose_stack(&[red, blue], 900, BG);

        assert_eq!((stack.width, stack.height), (100, 30));
        assert_eq!(stack.pixel(0, 0), Some([255, 0, 0, 255]));
        // blue starts at y = 10 and x = 25
        assert_eq!(stack.pixel(24, 10), Some([0x36, 0x39, 0x3f, 255]));
        assert_eq!(stack.pixel(25, 10), Some([0, 0, 255, 255]));
        assert_eq!(stack.pixel(74, 29), Some([0, 0, 255, 255]));
        assert_eq!(stack.pixel(75, 29), Some([0x36, 0x39, 0x3f, 255]));
    }

    #[test]
    fn test_cap_clips_wide_items() {
        let wide = BitmapData::filled_rgb(200, 5, Color::white());
        let stack = compose_stack(&[wide], 120, BG);
        assert_eq!((stack.width, stack.height), (120, 5));
        assert_eq!(stack.pixel(119, 4), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_rgba_items_are_pasted_opaque() {
        let rgba = BitmapData {
            width: 1,
            height: 1,
            format: BitmapFormat::Rgba8,
            data: vec![9, 8, 7, 0],
        };
        let stack = compose_stack(&[rgba], 900, BG);
        assert_eq!(stack.pixel(0, 0), Some([9, 8, 7, 255]));
    }

    #[test]
    fn test_item_config() {
        let base = RenderConfig::default();
        let config = StackOptions::default().item_config(&base);
        assert_eq!((config.width, config.max_width, config.min_width), (900, 900, 420));

        let config = StackOptions::with_width(600).item_config(&base);
        assert_eq!(config.width, 600);

        let tight = StackOptions {
            width: None,
            max_width: 300,
        };
        let config = tight.item_config(&base);
        assert_eq!((config.max_width, config.min_width), (300, 300));
    }
}
