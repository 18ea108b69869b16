//! Discord emoji CDN URLs.

use crate::domain::entities::Emoji;

/// Base URL of the Discord emoji CDN.
pub const DISCORD_EMOJI_CDN: &str = "https://cdn.discordapp.com/emojis";

/// Builds the download URL for an emoji: `{base}/{id}.{gif|png}`.
#[must_use]
pub fn emoji_url(base: &str, emoji: &Emoji) -> String {
    format!("{}/{}", base.trim_end_matches('/'), emoji.file_name())
}
