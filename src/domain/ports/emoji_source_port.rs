//! Remote emoji inventory port.

use std::path::Path;

use async_trait::async_trait;

use crate::domain::entities::{Community, CommunityId, Credential, Emoji};
use crate::domain::errors::{DownloadError, FetchError};

/// Port for listing communities and emoji and fetching emoji images.
#[async_trait]
pub trait EmojiSourcePort: Send + Sync {
    /// Lists the communities the account belongs to, in server order.
    /// Returned communities have no emoji yet.
    async fn list_communities(&self, credential: &Credential) -> Result<Vec<Community>, FetchError>;

    /// Lists the custom emoji of one community, in server order.
    async fn list_emoji(
        &self,
        credential: &Credential,
        community: &CommunityId,
    ) -> Result<Vec<Emoji>, FetchError>;

    /// Streams the emoji image to `destination`, overwriting it.
    ///
    /// A failure mid-stream may leave a truncated file behind.
    async fn download_image(&self, emoji: &Emoji, destination: &Path) -> Result<(), DownloadError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};

    use parking_lot::Mutex;

    /// In-memory emoji source for testing.
    #[derive(Default)]
    pub struct MockEmojiSource {
        communities: Vec<Community>,
        emoji: HashMap<String, Vec<Emoji>>,
        images: HashMap<String, Vec<u8>>,
        failing_listings: HashSet<String>,
        stalled_downloads: HashSet<String>,
        downloads: AtomicUsize,
        downloaded_ids: Mutex<Vec<String>>,
    }

    impl MockEmojiSource {
        /// Creates an empty source.
        pub fn new() -> Self {
            Self::default()
        }

        /// Adds a community with its emoji.
        #[must_use]
        pub fn with_community(mut self, community: Community, emoji: Vec<Emoji>) -> Self {
            self.emoji
                .insert(community.id().as_str().to_string(), emoji);
            self.communities.push(community);
            self
        }

        /// Registers the image bytes served for an emoji.
        #[must_use]
        pub fn with_image(mut self, emoji_id: &str, bytes: Vec<u8>) -> Self {
            self.images.insert(emoji_id.to_string(), bytes);
            self
        }

        /// Makes the emoji listing of a community fail.
        #[must_use]
        pub fn with_failing_listing(mut self, community_id: &str) -> Self {
            self.failing_listings.insert(community_id.to_string());
            self
        }

        /// Makes the download of an emoji write part of the file, then hang.
        #[must_use]
        pub fn with_stalled_download(mut self, emoji_id: &str) -> Self {
            self.stalled_downloads.insert(emoji_id.to_string());
            self
        }

        /// Returns how many downloads were attempted.
        pub fn download_count(&self) -> usize {
            self.downloads.load(Ordering::SeqCst)
        }

        /// Returns the IDs downloaded so far, in order.
        pub fn downloaded_ids(&self) -> Vec<String> {
            self.downloaded_ids.lock().clone()
        }
    }

    #[async_trait]
    impl EmojiSourcePort for MockEmojiSource {
        async fn list_communities(
            &self,
            _credential: &Credential,
        ) -> Result<Vec<Community>, FetchError> {
            Ok(self.communities.clone())
        }

        async fn list_emoji(
            &self,
            _credential: &Credential,
            community: &CommunityId,
        ) -> Result<Vec<Emoji>, FetchError> {
            if self.failing_listings.contains(community.as_str()) {
                return Err(FetchError::http(500, "mock listing failure"));
            }
            Ok(self
                .emoji
                .get(community.as_str())
                .cloned()
                .unwrap_or_default())
        }

        async fn download_image(
            &self,
            emoji: &Emoji,
            destination: &Path,
        ) -> Result<(), DownloadError> {
            self.downloads.fetch_add(1, Ordering::SeqCst);
            self.downloaded_ids
                .lock()
                .push(emoji.id().as_str().to_string());

            let url = format!("mock://{}", emoji.file_name());
            let bytes = self
                .images
                .get(emoji.id().as_str())
                .ok_or_else(|| DownloadError::http(&url, 404, "404: Not Found"))?;

            if self.stalled_downloads.contains(emoji.id().as_str()) {
                tokio::fs::write(destination, &bytes[..bytes.len() / 2])
                    .await
                    .map_err(|e| DownloadError::io(destination, e.to_string()))?;
                std::future::pending::<()>().await;
            }

            tokio::fs::write(destination, bytes)
                .await
                .map_err(|e| DownloadError::io(destination, e.to_string()))
        }
    }
}
