//! Infrastructure layer with external service adapters.

/// Application configuration.
pub mod config;
/// Discord API client.
pub mod discord;
/// Image caching and resizing.
pub mod image;

pub use config::{AppConfig, CliArgs, Command, LogLevel, StorageManager};
pub use discord::DiscordClient;
pub use self::image::{DiskEmojiCache, GifsicleResizer, ImageNormalizer};
