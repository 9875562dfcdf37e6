//! Chatcard - chat messages as image bubbles
//!
//! Chatcard turns a [`MessageItem`] into an opaque RGB picture that looks like
//! a dark-themed chat client: round avatar, colored username, optional guild
//! tag and timestamp, and a body with light markdown and custom emoji.
//!
//! The pipeline:
//! 1. Font resolution ([`fontdb`]) - fallback chains, never empty
//! 2. Markdown tokenizing ([`markup`]) - content becomes styled runs
//! 3. Layout ([`layout`]) - runs become lines and a canvas size
//! 4. Compositing ([`render`]) - pixels on a tiny-skia canvas
//! 5. Stacking ([`stack`]) - several bubbles, one image
//!
//! # Example
//!
//! ```no_run
//! use chatcard::prelude::*;
//!
//! let renderer = MessageRenderer::new(RenderConfig::default(), FontSources::default());
//! let mut item = MessageItem::new("ann", "**hello** there");
//! item.role_color = Some("#E91E63".into());
//! let png: Vec<u8> = renderer.render_message(&item)?;
//! # Ok::<(), chatcard::error::ChatcardError>(())
//! ```

pub use chatcard_core::{error, traits, types, Color, FontSources, RenderConfig, WrapMode};

pub use chatcard_export as export;
pub use chatcard_fontdb as fontdb;
pub use chatcard_layout as layout;
pub use chatcard_markup as markup;
pub use chatcard_render_skia as render;
pub use chatcard_unicode as unicode;

mod renderer;
pub mod stack;

pub use renderer::MessageRenderer;
pub use stack::{compose_stack, StackOptions};

/// Common imports for typical usage
pub mod prelude {
    pub use chatcard_core::{
        error::{ChatcardError, Result},
        AvatarSource, Color, FontSources, GuildTag, MessageItem, RenderConfig, RenderedMessage,
        Timestamp, WrapMode,
    };

    pub use crate::{MessageRenderer, StackOptions};
}
