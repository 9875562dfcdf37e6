//! The contracts between stages
//!
//! - [`TextMeasure`] - how the layout engine asks about text without
//!   knowing which fonts answer
//! - [`Exporter`] - where bitmaps become bytes

use crate::{
    error::Result,
    types::{BitmapData, RunStyle, TextRole, VerticalMetrics},
};

/// Pixel measurements for strings, per role and style
///
/// The font resolver implements this for real fonts; tests implement it with
/// fixed advances so layout arithmetic can be checked by hand.
pub trait TextMeasure: Send + Sync {
    /// Horizontal advance of `text`, in pixels.
    fn advance(&self, text: &str, role: TextRole, style: RunStyle) -> f32;

    /// Ascent/descent of the primary face for `role`.
    ///
    /// `None` when the face exposes no usable metrics; callers then fall back
    /// to [`TextMeasure::ink_height`].
    fn vertical_metrics(&self, role: TextRole) -> Option<VerticalMetrics>;

    /// Height of the inked bounding box of `text`, in pixels.
    fn ink_height(&self, text: &str, role: TextRole) -> f32;
}

/// The final step: pixels become bytes
pub trait Exporter: Send + Sync {
    /// Who are you?
    fn name(&self) -> &'static str;

    /// Encode a bitmap
    fn export(&self, bitmap: &BitmapData) -> Result<Vec<u8>>;

    /// What file extension should be used?
    fn extension(&self) -> &'static str;

    /// What MIME type identifies your format?
    fn mime_type(&self) -> &'static str;
}
