//! PNG export format
//!
//! Exports rendered bubbles to PNG using the `image` crate.

use image::ImageEncoder;

use chatcard_core::{
    error::{ExportError, Result},
    traits::Exporter,
    types::{BitmapData, BitmapFormat},
};

/// Encode bitmap data to PNG format.
///
/// RGB bitmaps are written as 8-bit truecolor, RGBA bitmaps keep their alpha.
pub fn encode_bitmap_to_png(bitmap: &BitmapData) -> Result<Vec<u8>> {
    let expected = bitmap.width as usize * bitmap.height as usize * bitmap.format.channels();
    if bitmap.data.len() < expected {
        return Err(ExportError::BufferTooSmall {
            expected,
            actual: bitmap.data.len(),
        }
        .into());
    }

    let color = match bitmap.format {
        BitmapFormat::Rgba8 => image::ExtendedColorType::Rgba8,
        BitmapFormat::Rgb8 => image::ExtendedColorType::Rgb8,
    };

    let mut png_data = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new_with_quality(
        &mut png_data,
        image::codecs::png::CompressionType::Default,
        image::codecs::png::FilterType::Sub,
    );

    encoder
        .write_image(&bitmap.data[..expected], bitmap.width, bitmap.height, color)
        .map_err(|e| ExportError::EncodingFailed(format!("PNG encoding failed: {}", e)))?;

    Ok(png_data)
}

/// PNG exporter for rendered messages
///
/// # Examples
///
/// ```
/// use chatcard_export::PngExporter;
/// let exporter = PngExporter::new();
/// ```
pub struct PngExporter;

impl PngExporter {
    /// Create a new PNG exporter
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for PngExporter {
    fn name(&self) -> &'static str {
        "png"
    }

    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>> {
        encode_bitmap_to_png(bitmap)
    }

    fn extension(&self) -> &'static str {
        "png"
    }

    fn mime_type(&self) -> &'static str {
        "image/png"
    }
}

impl Default for PngExporter {
    fn default() -> Self {
        Self::new()
    }
}
