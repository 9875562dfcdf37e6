//! Chatcard Core: the shared vocabulary of the message renderer
//!
//! A message travels through five stages before it becomes an image:
//!
//! 1. **Font resolution** - chains of faces that can draw any string
//! 2. **Markdown tokenizing** - content becomes styled runs
//! 3. **Layout** - runs become measured tokens packed into lines
//! 4. **Compositing** - avatar, header and lines become pixels
//! 5. **Stacking** - several bubbles become one image
//!
//! This crate holds what every stage agrees on: the data model in [`types`],
//! [`Color`] handling, [`RenderConfig`], the error taxonomy and the two
//! traits in [`traits`].

pub mod color;
pub mod config;
pub mod error;
pub mod traits;
pub mod types;

pub use color::{normalize_role_color, Color};
pub use config::{FontSources, Palette, RenderConfig, WrapMode, MAX_FONT_SIZE, MAX_GEOMETRY};
pub use error::{ChatcardError, Result};
pub use traits::{Exporter, TextMeasure};
pub use types::{
    AvatarSource, BitmapData, BitmapFormat, FontWeight, GuildTag, MessageItem, RenderedMessage,
    RunStyle, StyledRun, TextRole, Timestamp, VerticalMetrics,
};
