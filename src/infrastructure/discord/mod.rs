//! Discord API client.

mod cdn;
mod client;
mod dto;

pub use cdn::{DISCORD_EMOJI_CDN, emoji_url};
pub use client::{DEFAULT_REQUEST_TIMEOUT, DISCORD_API_BASE, DiscordClient};
