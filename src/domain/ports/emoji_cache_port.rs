//! Port definition for the on-disk emoji cache.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::OwnedMutexGuard;
use tracing::warn;

use crate::domain::entities::{Emoji, EmojiFormat, EmojiId};

/// Result type for cache operations.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// I/O error during cache operation.
    #[error("IO error: {0}")]
    IoError(String),
}

/// A file found in the cache directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// Emoji the file belongs to.
    pub id: EmojiId,
    /// Encoding implied by the extension.
    pub format: EmojiFormat,
    /// Absolute path of the file.
    pub path: PathBuf,
}

/// An in-progress write to one cache entry.
///
/// Holds the per-entry lock until committed or aborted, so writers of the
/// same identifier are serialized. Dropping an unsettled write (for example
/// when the download future is cancelled) removes the staged file.
#[derive(Debug)]
pub struct CacheWrite {
    final_path: PathBuf,
    staging_path: PathBuf,
    settled: bool,
    _guard: OwnedMutexGuard<()>,
}

impl CacheWrite {
    /// Creates a write handle. Called by cache implementations.
    #[must_use]
    pub fn new(final_path: PathBuf, staging_path: PathBuf, guard: OwnedMutexGuard<()>) -> Self {
        Self {
            final_path,
            staging_path,
            settled: false,
            _guard: guard,
        }
    }

    /// Marks the staged file as handled; dropping the write leaves it alone.
    ///
    /// Implementations call this once `commit` or `abort` has dealt with it.
    pub fn settle(&mut self) {
        self.settled = true;
    }

    /// Where the data must be written before commit.
    #[must_use]
    pub fn staging_path(&self) -> &Path {
        &self.staging_path
    }

    /// Where the entry will live once committed.
    #[must_use]
    pub fn final_path(&self) -> &Path {
        &self.final_path
    }
}

impl Drop for CacheWrite {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        // Runs before the guard is released.
        if let Err(e) = std::fs::remove_file(&self.staging_path)
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!(
                path = %self.staging_path.display(),
                error = %e,
                "Failed to remove abandoned staged file"
            );
        }
    }
}

/// Port for emoji caching operations.
/// Implementations must be thread-safe.
#[async_trait::async_trait]
pub trait EmojiCachePort: Send + Sync {
    /// Returns the cache directory.
    fn root(&self) -> &Path;

    /// Maps an emoji to its cache file. Pure, no I/O.
    fn path_for(&self, emoji: &Emoji) -> PathBuf;

    /// Returns true if the cache file exists.
    async fn is_cached(&self, emoji: &Emoji) -> bool;

    /// Decodes the cached image for display.
    /// Returns None if missing or undecodable; never fails.
    async fn load(&self, emoji: &Emoji) -> Option<Arc<image::DynamicImage>>;

    /// Locks the entry and hands out a staging path to write to.
    async fn begin_write(&self, emoji: &Emoji) -> CacheResult<CacheWrite>;

    /// Moves the staged file into place and releases the lock.
    async fn commit(&self, write: CacheWrite) -> CacheResult<PathBuf>;

    /// Discards the staged file and releases the lock.
    async fn abort(&self, write: CacheWrite);

    /// Lists cache entries, ignoring anything that is not `{id}.{png|gif}`.
    async fn entries(&self) -> CacheResult<Vec<CacheEntry>>;
}
