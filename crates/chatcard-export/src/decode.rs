//! Image decoding for avatars, emoji and badge icons
//!
//! Each [`AvatarSource`] variant has exactly one decode path. Every failure
//! comes back as a [`DecodeError`] so the compositor can pick a placeholder.

use std::fs;

use image::RgbaImage;

use chatcard_core::{
    error::{DecodeError, Result},
    AvatarSource,
};

/// Decode encoded image bytes (PNG, JPEG, GIF, WebP) to straight RGBA.
///
/// Animated formats yield their first frame.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty.into());
    }

    let image = image::load_from_memory(bytes)
        .map_err(|e| DecodeError::Malformed(e.to_string()))?
        .to_rgba8();

    if image.width() == 0 || image.height() == 0 {
        return Err(DecodeError::Empty.into());
    }
    Ok(image)
}

/// Decode an avatar from wherever it lives.
pub fn decode_avatar(source: &AvatarSource) -> Result<RgbaImage> {
    match source {
        AvatarSource::Bytes(bytes) => decode_image(bytes),
        AvatarSource::Path(path) => {
            log::debug!("export: reading avatar {}", path.display());
            let bytes = fs::read(path)
                .map_err(|e| DecodeError::Unreadable(format!("{}: {}", path.display(), e)))?;
            decode_image(&bytes)
        },
    }
}
