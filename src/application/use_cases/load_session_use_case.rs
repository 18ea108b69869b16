//! Full session load: list, download, normalize.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::application::dto::{DownloadFailure, FetchOutcome, SyncReport};
use crate::application::services::{EmojiFetchService, ProgressTracker};
use crate::domain::entities::{Community, Credential};
use crate::domain::errors::PipelineError;
use crate::domain::pipeline::PipelineState;
use crate::domain::ports::{EmojiCachePort, EmojiSourcePort, ImageNormalizerPort};

/// Lists every community and its emoji, caches the images and normalizes
/// the cache directory.
#[derive(Clone)]
pub struct LoadSessionUseCase {
    source: Arc<dyn EmojiSourcePort>,
    cache: Arc<dyn EmojiCachePort>,
    normalizer: Arc<dyn ImageNormalizerPort>,
    fetcher: EmojiFetchService,
}

impl LoadSessionUseCase {
    /// Creates new load session use case.
    #[must_use]
    pub fn new(
        source: Arc<dyn EmojiSourcePort>,
        cache: Arc<dyn EmojiCachePort>,
        normalizer: Arc<dyn ImageNormalizerPort>,
    ) -> Self {
        let fetcher = EmojiFetchService::new(source.clone(), cache.clone());
        Self {
            source,
            cache,
            normalizer,
            fetcher,
        }
    }

    /// Runs the load, reporting each stage on `progress`.
    ///
    /// Communities and emoji are handled one at a time in server order. A
    /// failed download is recorded and skipped; a failed listing aborts.
    ///
    /// # Errors
    /// Returns error if a listing fails, the cache directory cannot be read,
    /// the transition is not allowed, or `cancel` fires.
    pub async fn execute(
        &self,
        credential: &Credential,
        progress: &ProgressTracker,
        cancel: &CancellationToken,
    ) -> Result<SyncReport, PipelineError> {
        progress.advance(PipelineState::ListingCommunities)?;
        let mut communities = self.source.list_communities(credential).await?;
        info!(count = communities.len(), "Fetched communities");

        check_cancelled(cancel)?;
        progress.advance(PipelineState::ListingEmoji)?;
        for community in &mut communities {
            let emoji = self.source.list_emoji(credential, community.id()).await?;
            debug!(community = %community.name(), count = emoji.len(), "Fetched emoji");
            community.set_emoji(emoji);
            check_cancelled(cancel)?;
        }

        progress.advance(PipelineState::Downloading)?;
        let mut report = SyncReport::default();
        for emoji in communities.iter().flat_map(Community::emoji) {
            match self.fetcher.ensure_cached(emoji).await {
                Ok(FetchOutcome::Downloaded) => report.downloaded += 1,
                Ok(FetchOutcome::AlreadyCached) => report.already_cached += 1,
                Err(error) => {
                    warn!(id = %emoji.id(), name = %emoji.name(), error = %error, "Skipping emoji");
                    report.failed.push(DownloadFailure {
                        emoji: emoji.clone(),
                        error,
                    });
                }
            }
            check_cancelled(cancel)?;
        }

        progress.advance(PipelineState::Normalizing)?;
        report.normalize = self.normalizer.normalize_dir(self.cache.root()).await?;

        report.communities = communities;
        progress.advance(PipelineState::Ready)?;

        info!(
            communities = report.communities.len(),
            downloaded = report.downloaded,
            cached = report.already_cached,
            failed = report.failed.len(),
            "Session loaded"
        );

        Ok(report)
    }
}

fn check_cancelled(cancel: &CancellationToken) -> Result<(), PipelineError> {
    if cancel.is_cancelled() {
        return Err(PipelineError::Cancelled);
    }
    Ok(())
}
