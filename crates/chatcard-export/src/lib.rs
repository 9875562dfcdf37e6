//! Image I/O for Chatcard
//!
//! Pixels leave as PNG through [`PngExporter`]; avatars, emoji and badge
//! icons come in through [`decode_image`] and [`decode_avatar`].

pub mod decode;
pub mod png;

pub use decode::{decode_avatar, decode_image};
pub use png::{encode_bitmap_to_png, PngExporter};
