//! Fills the cache from the remote source.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::application::dto::FetchOutcome;
use crate::domain::entities::Emoji;
use crate::domain::errors::DownloadError;
use crate::domain::ports::{EmojiCachePort, EmojiSourcePort};

/// Downloads emoji that are not cached yet.
#[derive(Clone)]
pub struct EmojiFetchService {
    source: Arc<dyn EmojiSourcePort>,
    cache: Arc<dyn EmojiCachePort>,
}

impl EmojiFetchService {
    /// Creates new fetch service.
    #[must_use]
    pub fn new(source: Arc<dyn EmojiSourcePort>, cache: Arc<dyn EmojiCachePort>) -> Self {
        Self { source, cache }
    }

    /// Makes sure the emoji's cache file exists, downloading it if needed.
    ///
    /// The download is staged and only moved into place once complete, so a
    /// failure never leaves a file at the cache path.
    ///
    /// # Errors
    /// Returns error if the download or the cache write fails.
    pub async fn ensure_cached(&self, emoji: &Emoji) -> Result<FetchOutcome, DownloadError> {
        if self.cache.is_cached(emoji).await {
            trace!(id = %emoji.id(), "Emoji already cached");
            return Ok(FetchOutcome::AlreadyCached);
        }

        let write = self
            .cache
            .begin_write(emoji)
            .await
            .map_err(|e| DownloadError::io(self.cache.path_for(emoji), e.to_string()))?;

        // Another writer may have finished while we waited for the lock.
        if self.cache.is_cached(emoji).await {
            self.cache.abort(write).await;
            return Ok(FetchOutcome::AlreadyCached);
        }

        if let Err(e) = self.source.download_image(emoji, write.staging_path()).await {
            warn!(id = %emoji.id(), error = %e, "Emoji download failed");
            self.cache.abort(write).await;
            return Err(e);
        }

        let path = self
            .cache
            .commit(write)
            .await
            .map_err(|e| DownloadError::io(self.cache.path_for(emoji), e.to_string()))?;

        debug!(id = %emoji.id(), path = %path.display(), "Emoji cached");
        Ok(FetchOutcome::Downloaded)
    }
}
