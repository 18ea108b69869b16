//! Disk-based emoji cache: one flat directory, one `{id}.{png|gif}` per emoji.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::fs;
use tracing::{debug, error, trace, warn};

use crate::domain::entities::{Emoji, EmojiFormat, EmojiId, is_valid_id};
use crate::domain::ports::{CacheEntry, CacheError, CacheResult, CacheWrite, EmojiCachePort};

/// Suffix appended to an entry's file name while it is being written.
pub const STAGING_SUFFIX: &str = "part";

/// Disk-based cache of raw emoji image files.
///
/// Write-once and grow-only: there is no eviction, size cap or expiry.
pub struct DiskEmojiCache {
    cache_dir: PathBuf,
    entry_locks: Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>,
}

impl DiskEmojiCache {
    /// Creates a new disk cache in the specified directory.
    ///
    /// # Errors
    /// Returns error if cache directory cannot be created.
    pub async fn new(cache_dir: PathBuf) -> CacheResult<Self> {
        fs::create_dir_all(&cache_dir)
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to create cache dir: {e}")))?;

        debug!(path = %cache_dir.display(), "Opened emoji cache");

        Ok(Self {
            cache_dir,
            entry_locks: Mutex::new(HashMap::new()),
        })
    }

    fn staging_path(final_path: &Path) -> PathBuf {
        let mut name = final_path.as_os_str().to_os_string();
        name.push(".");
        name.push(STAGING_SUFFIX);
        PathBuf::from(name)
    }

    fn entry_lock(&self, path: &Path) -> Arc<tokio::sync::Mutex<()>> {
        self.entry_locks
            .lock()
            .entry(path.to_path_buf())
            .or_default()
            .clone()
    }
}

#[async_trait::async_trait]
impl EmojiCachePort for DiskEmojiCache {
    fn root(&self) -> &Path {
        &self.cache_dir
    }

    fn path_for(&self, emoji: &Emoji) -> PathBuf {
        self.cache_dir.join(emoji.file_name())
    }

    async fn is_cached(&self, emoji: &Emoji) -> bool {
        let path = self.path_for(emoji);
        fs::try_exists(&path).await.unwrap_or(false)
    }

    async fn load(&self, emoji: &Emoji) -> Option<Arc<image::DynamicImage>> {
        let path = self.path_for(emoji);
        let Ok(bytes) = fs::read(&path).await else {
            trace!(id = %emoji.id(), "Emoji cache miss");
            return None;
        };

        let result = tokio::task::spawn_blocking(move || image::load_from_memory(&bytes)).await;

        match result {
            Ok(Ok(img)) => {
                trace!(id = %emoji.id(), path = %path.display(), "Decoded emoji from cache");
                Some(Arc::new(img))
            }
            Ok(Err(e)) => {
                warn!(id = %emoji.id(), path = %path.display(), error = %e, "Cached emoji is unreadable");
                None
            }
            Err(e) => {
                error!(id = %emoji.id(), error = %e, "Decode task panicked");
                None
            }
        }
    }

    async fn begin_write(&self, emoji: &Emoji) -> CacheResult<CacheWrite> {
        let final_path = self.path_for(emoji);
        let guard = self.entry_lock(&final_path).lock_owned().await;
        let staging_path = Self::staging_path(&final_path);

        trace!(id = %emoji.id(), path = %staging_path.display(), "Reserved cache entry");

        Ok(CacheWrite::new(final_path, staging_path, guard))
    }

    async fn commit(&self, mut write: CacheWrite) -> CacheResult<PathBuf> {
        fs::rename(write.staging_path(), write.final_path())
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to commit cache entry: {e}")))?;
        write.settle();

        debug!(path = %write.final_path().display(), "Stored emoji in cache");

        Ok(write.final_path().to_path_buf())
    }

    async fn abort(&self, mut write: CacheWrite) {
        if let Err(e) = fs::remove_file(write.staging_path()).await
            && e.kind() != std::io::ErrorKind::NotFound
        {
            warn!(path = %write.staging_path().display(), error = %e, "Failed to remove staged file");
        }
        write.settle();
    }

    async fn entries(&self) -> CacheResult<Vec<CacheEntry>> {
        let mut entries = fs::read_dir(&self.cache_dir)
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to read cache dir: {e}")))?;

        let mut found = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| CacheError::IoError(format!("Failed to read entry: {e}")))?
        {
            let path = entry.path();
            let Some(format) = path
                .extension()
                .and_then(|ext| ext.to_str())
                .and_then(EmojiFormat::from_extension)
            else {
                continue;
            };
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_valid_id(stem) {
                continue;
            }

            found.push(CacheEntry {
                id: EmojiId::new(stem),
                format,
                path,
            });
        }

        found.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(found)
    }
}

/// Returns the default cache directory path.
#[must_use]
pub fn default_cache_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "linuxmobile", "emojibox").map_or_else(
        || std::env::temp_dir().join("emojibox").join("cache").join("emoji"),
        |dirs| dirs.cache_dir().join("emoji"),
    )
}
