//! The messages file the `render` command reads
//!
//! ```json
//! {"messages": [
//!   {"author": "ann", "content": "**hi** <:wave:123>",
//!    "avatar_path": "ann.png", "role_color": "#e91e63",
//!    "tag": {"text": "RUST", "badge_path": "rust.png"},
//!    "emoji": {"<:wave:123>": "wave.png"},
//!    "timestamp": "2024-05-01T13:07:00Z"}
//! ]}
//! ```
//!
//! Relative paths are resolved against the file's own directory.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use chatcard::types::{AvatarSource, GuildTag, MessageItem, Timestamp};

#[derive(Debug, Clone, Deserialize)]
pub struct MessagesFile {
    pub messages: Vec<MessageSpec>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MessageSpec {
    pub author: String,
    #[serde(default)]
    pub content: String,
    pub avatar_path: Option<PathBuf>,
    pub avatar_base64: Option<String>,
    pub role_color: Option<String>,
    pub tag: Option<TagSpec>,
    /// Placeholder token to image path
    #[serde(default)]
    pub emoji: HashMap<String, PathBuf>,
    /// RFC 3339 instant, or any other text shown as is
    pub timestamp: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagSpec {
    pub text: String,
    pub badge_path: Option<PathBuf>,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl MessagesFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read messages file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid messages file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Resolve every message against `base_dir`
    pub fn into_items(self, base_dir: &Path) -> Result<Vec<MessageItem>> {
        self.messages
            .into_iter()
            .map(|spec| spec.into_item(base_dir))
            .collect()
    }
}

impl MessageSpec {
    pub fn into_item(self, base_dir: &Path) -> Result<MessageItem> {
        let avatar = match (self.avatar_base64, self.avatar_path) {
            (Some(encoded), _) => {
                let bytes = base64::engine::general_purpose::STANDARD
                    .decode(encoded.trim())
                    .with_context(|| format!("avatar_base64 of {} is not valid base64", self.author))?;
                Some(AvatarSource::Bytes(bytes))
            },
            (None, Some(path)) => Some(AvatarSource::Path(base_dir.join(path))),
            (None, None) => None,
        };

        let guild_tag = self.tag.map(|tag| GuildTag {
            text: tag.text,
            badge: tag.badge_path.and_then(|path| read_asset(&base_dir.join(path))),
            enabled: tag.enabled,
        });

        let emoji_images = self
            .emoji
            .into_iter()
            .filter_map(|(token, path)| read_asset(&base_dir.join(path)).map(|bytes| (token, bytes)))
            .collect();

        Ok(MessageItem {
            author_name: self.author,
            content: self.content,
            avatar,
            role_color: self.role_color,
            guild_tag,
            emoji_images,
            timestamp: self.timestamp.as_deref().map(parse_timestamp),
        })
    }
}

/// Image bytes for a badge or emoji; unreadable files are logged and skipped
fn read_asset(path: &Path) -> Option<Vec<u8>> {
    match fs::read(path) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            log::warn!("cli: cannot read {}: {}", path.display(), e);
            None
        },
    }
}

pub fn parse_timestamp(raw: &str) -> Timestamp {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(instant) => Timestamp::At(instant.with_timezone(&Utc)),
        Err(_) => Timestamp::Text(raw.to_string()),
    }
}
