//! Pixel plumbing: images, masks, shapes and the final flatten

use image::{imageops::FilterType, GrayImage, RgbaImage};
use tiny_skia::{FillRule, Paint, Path, PathBuilder, Pixmap, Transform};

use chatcard_core::{BitmapData, BitmapFormat, Color};

/// Supersampling factor for the avatar mask
pub const MASK_OVERSAMPLE: u32 = 4;

pub fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint {
        anti_alias: true,
        ..Default::default()
    };
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint
}

/// Resize with Lanczos3, the filter used for every image in a bubble
pub fn resize(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    image::imageops::resize(image, width.max(1), height.max(1), FilterType::Lanczos3)
}

/// Circular coverage mask: drawn at 4x, then downsampled
pub fn circle_mask(size: u32) -> Option<GrayImage> {
    let big = size.checked_mul(MASK_OVERSAMPLE)?;
    let mut pixmap = Pixmap::new(big, big)?;
    let r = big as f32 / 2.0;
    let circle = PathBuilder::from_circle(r, r, r)?;
    pixmap.fill_path(&circle, &paint(Color::white()), FillRule::Winding, Transform::identity(), None);

    let alpha: Vec<u8> = pixmap.data().chunks_exact(4).map(|px| px[3]).collect();
    let hi_res = GrayImage::from_raw(big, big, alpha)?;
    Some(image::imageops::resize(&hi_res, size, size, FilterType::Lanczos3))
}

/// Avatar resized to `size` and cut to a circle
pub fn round_avatar(avatar: &RgbaImage, size: u32) -> Option<RgbaImage> {
    let mut resized = resize(avatar, size, size);
    let mask = circle_mask(size)?;
    for (px, coverage) in resized.pixels_mut().zip(mask.pixels()) {
        px.0[3] = (px.0[3] as u32 * coverage.0[0] as u32 / 255) as u8;
    }
    Some(resized)
}

/// Anti-aliased solid circle with its bounding box at (x, y)
pub fn fill_circle(pixmap: &mut Pixmap, x: f32, y: f32, size: f32, color: Color) {
    let r = size / 2.0;
    if let Some(circle) = PathBuilder::from_circle(x + r, y + r, r) {
        pixmap.fill_path(&circle, &paint(color), FillRule::Winding, Transform::identity(), None);
    }
}

/// Rectangle with quarter-circle-ish corners
pub fn rounded_rect(x: f32, y: f32, width: f32, height: f32, radius: f32) -> Option<Path> {
    let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    let (right, bottom) = (x + width, y + height);

    let mut pb = PathBuilder::new();
    pb.move_to(x + r, y);
    pb.line_to(right - r, y);
    pb.quad_to(right, y, right, y + r);
    pb.line_to(right, bottom - r);
    pb.quad_to(right, bottom, right - r, bottom);
    pb.line_to(x + r, bottom);
    pb.quad_to(x, bottom, x, bottom - r);
    pb.line_to(x, y + r);
    pb.quad_to(x, y, x + r, y);
    pb.close();
    pb.finish()
}

pub fn fill_rounded_rect(pixmap: &mut Pixmap, x: f32, y: f32, width: f32, height: f32, radius: f32, color: Color) {
    match rounded_rect(x, y, width, height, radius) {
        Some(path) => {
            pixmap.fill_path(&path, &paint(color), FillRule::Winding, Transform::identity(), None);
        },
        None => log::debug!("render: degenerate rounded rect {}x{}", width, height),
    }
}

/// Source-over a straight-alpha image onto the premultiplied canvas
pub fn blend_image(pixmap: &mut Pixmap, image: &RgbaImage, x: i32, y: i32) {
    let (width, height) = (pixmap.width() as i32, pixmap.height() as i32);
    let canvas = pixmap.data_mut();

    for (gx, gy, px) in image.enumerate_pixels() {
        let canvas_x = x + gx as i32;
        let canvas_y = y + gy as i32;
        if canvas_x < 0 || canvas_x >= width || canvas_y < 0 || canvas_y >= height {
            continue;
        }

        let [r, g, b, a] = px.0;
        let src_a = a as u32;
        if src_a == 0 {
            continue;
        }

        let idx = ((canvas_y * width + canvas_x) * 4) as usize;
        let src_r = r as u32 * src_a / 255;
        let src_g = g as u32 * src_a / 255;
        let src_b = b as u32 * src_a / 255;
        let dst_a = canvas[idx + 3] as u32;
        let inv_a = 255 - src_a;

        canvas[idx] = (src_r + canvas[idx] as u32 * inv_a / 255) as u8;
        canvas[idx + 1] = (src_g + canvas[idx + 1] as u32 * inv_a / 255) as u8;
        canvas[idx + 2] = (src_b + canvas[idx + 2] as u32 * inv_a / 255) as u8;
        canvas[idx + 3] = (src_a + dst_a * inv_a / 255).min(255) as u8;
    }
}

/// Composite the premultiplied canvas over an opaque background, dropping alpha
pub fn flatten(pixmap: &Pixmap, background: Color) -> BitmapData {
    let mut data = Vec::with_capacity(pixmap.width() as usize * pixmap.height() as usize * 3);
    let bg = [background.r as u32, background.g as u32, background.b as u32];

    for px in pixmap.data().chunks_exact(4) {
        let inv_a = 255 - px[3] as u32;
        for channel in 0..3 {
            let value = px[channel] as u32 + bg[channel] * inv_a / 255;
            data.push(value.min(255) as u8);
        }
    }

    BitmapData {
        width: pixmap.width(),
        height: pixmap.height(),
        format: BitmapFormat::Rgb8,
        data,
    }
}
