//! Decoded images for one message
//!
//! Everything is decoded once, up front: layout needs emoji widths before
//! the compositor needs emoji pixels. Failures are logged and remembered so
//! layout and drawing agree on what fell back.

use std::collections::HashMap;

use image::RgbaImage;

use chatcard_core::MessageItem;
use chatcard_export::{decode_avatar, decode_image};
use chatcard_layout::EmojiWidths;

/// Pixels behind a message, ready to composite
#[derive(Debug, Clone, Default)]
pub struct MessageAssets {
    /// `None` draws the placeholder circle
    pub avatar: Option<RgbaImage>,
    /// Guild tag icon, when present and decodable
    pub badge: Option<RgbaImage>,
    /// Emoji images keyed by placeholder; only the ones that decoded
    pub emoji: HashMap<String, RgbaImage>,
    pub emoji_widths: EmojiWidths,
}

impl MessageAssets {
    pub fn decode(item: &MessageItem) -> Self {
        let avatar = item.avatar.as_ref().and_then(|source| match decode_avatar(source) {
            Ok(image) => Some(image),
            Err(e) => {
                log::warn!("render: avatar of {} replaced by placeholder: {}", item.author_name, e);
                None
            },
        });

        let badge = item
            .guild_tag
            .as_ref()
            .filter(|tag| tag.is_visible())
            .and_then(|tag| tag.badge.as_deref())
            .and_then(|bytes| match decode_image(bytes) {
                Ok(image) => Some(image),
                Err(e) => {
                    log::warn!("render: tag badge dropped: {}", e);
                    None
                },
            });

        let mut emoji = HashMap::new();
        let mut emoji_widths = EmojiWidths::new();
        for (token, bytes) in &item.emoji_images {
            match decode_image(bytes) {
                Ok(image) => {
                    emoji_widths.insert_decoded(token.clone(), image.width());
                    emoji.insert(token.clone(), image);
                },
                Err(e) => {
                    log::warn!("render: emoji {} drawn as text: {}", token, e);
                    emoji_widths.insert_undecodable(token.clone());
                },
            }
        }

        Self {
            avatar,
            badge,
            emoji,
            emoji_widths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatcard_core::{AvatarSource, BitmapData, Color, GuildTag};
    use chatcard_export::encode_bitmap_to_png;

    fn png(width: u32, height: u32) -> Vec<u8> {
        encode_bitmap_to_png(&BitmapData::filled_rgb(width, height, Color::white())).unwrap()
    }

    #[test]
    fn test_decode_everything() {
        let mut item = MessageItem::new("ann", "<:ok:1> <:bad:2>");
        item.avatar = Some(AvatarSource::Bytes(png(8, 8)));
        item.guild_tag = Some(GuildTag::new("RUST").with_badge(png(4, 4)));
        item.emoji_images.insert("<:ok:1>".into(), png(30, 10));
        item.emoji_images.insert("<:bad:2>".into(), b"junk".to_vec());

        let assets = MessageAssets::decode(&item);
        assert!(assets.avatar.is_some());
        assert!(assets.badge.is_some());
        assert_eq!(assets.emoji.len(), 1);
        assert_eq!(assets.emoji_widths.get("<:ok:1>"), Some(Some(30)));
        assert_eq!(assets.emoji_widths.get("<:bad:2>"), Some(None));
        assert_eq!(assets.emoji_widths.get("<:other:3>"), None);
    }

    #[test]
    fn test_broken_avatar_becomes_none() {
        let mut item = MessageItem::new("ann", "hi");
        item.avatar = Some(AvatarSource::Bytes(vec![1, 2, 3]));
        assert!(MessageAssets::decode(&item).avatar.is_none());
    }

    #[test]
    fn test_hidden_tag_badge_is_not_decoded() {
        let mut item = MessageItem::new("ann", "hi");
        let mut tag = GuildTag::new("RUST").with_badge(png(4, 4));
        tag.enabled = false;
        item.guild_tag = Some(tag);
        assert!(MessageAssets::decode(&item).badge.is_none());
    }
}
