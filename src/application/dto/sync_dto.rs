//! Results of pipeline runs.

use std::path::PathBuf;

use crate::domain::entities::{Community, Emoji};
use crate::domain::errors::DownloadError;
use crate::domain::ports::{NormalizeOutcome, NormalizeReport};

/// How an emoji ended up in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The file was already present; nothing was downloaded.
    AlreadyCached,
    /// The file was downloaded during this call.
    Downloaded,
}

/// An emoji that could not be downloaded.
#[derive(Debug, Clone)]
pub struct DownloadFailure {
    /// The emoji that was skipped.
    pub emoji: Emoji,
    /// Why.
    pub error: DownloadError,
}

/// Summary of a full session load.
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Communities in server order, with their emoji.
    pub communities: Vec<Community>,
    /// Emoji fetched during this run.
    pub downloaded: usize,
    /// Emoji found in the cache.
    pub already_cached: usize,
    /// Emoji skipped because their download failed.
    pub failed: Vec<DownloadFailure>,
    /// Normalization results for the cache directory.
    pub normalize: NormalizeReport,
}

impl SyncReport {
    /// Returns the number of emoji across all communities.
    #[must_use]
    pub fn emoji_count(&self) -> usize {
        self.communities.iter().map(|c| c.emoji().len()).sum()
    }

    /// Returns true if any download or normalization failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty() || self.normalize.has_failures()
    }
}

/// Manually requested emoji.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualEmojiRequest {
    /// Raw identifier as typed by the user.
    pub id: String,
    /// Whether the user marked it animated.
    pub animated: bool,
}

impl ManualEmojiRequest {
    /// Creates new request.
    #[must_use]
    pub fn new(id: impl Into<String>, animated: bool) -> Self {
        Self {
            id: id.into(),
            animated,
        }
    }
}

/// Result of adding one emoji by hand.
#[derive(Debug, Clone)]
pub struct ManualEmojiResult {
    /// The constructed emoji.
    pub emoji: Emoji,
    /// Cache file path.
    pub path: PathBuf,
    /// Whether it had to be downloaded.
    pub fetch: FetchOutcome,
    /// What normalization did to the file.
    pub normalize: NormalizeOutcome,
}
