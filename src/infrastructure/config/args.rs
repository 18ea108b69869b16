use super::app_config::LogLevel;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "emojibox",
    version,
    about = "Fetches, caches and shrinks the custom emoji of your Discord servers",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// Emoji cache directory.
    #[arg(long, value_name = "PATH", global = true)]
    pub cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in, download every server emoji and normalize the cache.
    Sync {
        /// Use an existing token instead of logging in.
        #[arg(long, env = "EMOJIBOX_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Account email for password login.
        #[arg(long, env = "EMOJIBOX_EMAIL", conflicts_with = "token")]
        email: Option<String>,
    },

    /// Add one emoji by its numeric ID.
    Add {
        /// Emoji ID.
        id: String,

        /// Treat the emoji as animated.
        #[arg(long)]
        animated: bool,
    },

    /// Normalize everything already in the cache.
    Resize,

    /// List cached emoji files.
    List,
}
