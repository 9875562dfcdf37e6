//! Error types for Chatcard
//!
//! Almost nothing in the pipeline is fatal. These errors travel between
//! stages so each stage can decide which fallback to take, and they end up
//! in log lines far more often than in a caller's hands.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChatcardError>;

/// Main error type for Chatcard
#[derive(Debug, Error)]
pub enum ChatcardError {
    #[error("Font loading failed: {0}")]
    FontLoad(#[from] FontLoadError),

    #[error("Image decoding failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Rendering failed: {0}")]
    RenderingFailed(#[from] RenderError),

    #[error("Export failed: {0}")]
    ExportFailed(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Font loading errors
#[derive(Debug, Error)]
pub enum FontLoadError {
    #[error("Font file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid font data")]
    InvalidData,

    #[error("System font not found: {0}")]
    SystemFontNotFound(String),
}

/// Image decoding errors (avatars, emoji, badge icons)
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unreadable image source: {0}")]
    Unreadable(String),

    #[error("Malformed image data: {0}")]
    Malformed(String),

    #[error("Image has zero size")]
    Empty,
}

/// Rendering errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Glyph not found: {0}")]
    GlyphNotFound(u32),

    #[error("Outline extraction failed")]
    OutlineExtractionFailed,

    #[error("Path building failed")]
    PathBuildingFailed,

    #[error("Pixmap creation failed")]
    PixmapCreationFailed,
}

/// Export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Buffer too small: expected {expected} bytes, got {actual}")]
    BufferTooSmall { expected: usize, actual: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_prefixes_are_stable() {
        let err: ChatcardError = FontLoadError::InvalidData.into();
        assert!(err.to_string().starts_with("Font loading failed"));

        let err: ChatcardError = DecodeError::Empty.into();
        assert!(err.to_string().starts_with("Image decoding failed"));

        let err: ChatcardError = RenderError::InvalidDimensions {
            width: 0,
            height: 12,
        }
        .into();
        assert_eq!(err.to_string(), "Rendering failed: Invalid dimensions: 0x12");
    }

    #[test]
    fn test_io_errors_convert() {
        let err: ChatcardError = std::io::Error::other("boom").into();
        assert!(err.to_string().contains("boom"));
    }
}
