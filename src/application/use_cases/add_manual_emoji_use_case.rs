//! Adding a single emoji by identifier.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::application::dto::{ManualEmojiRequest, ManualEmojiResult};
use crate::application::services::{EmojiFetchService, ProgressTracker};
use crate::domain::entities::{Emoji, EmojiId};
use crate::domain::errors::PipelineError;
use crate::domain::pipeline::PipelineState;
use crate::domain::ports::{EmojiCachePort, EmojiSourcePort, ImageNormalizerPort};

/// Caches and normalizes one user-supplied emoji, skipping login and listing.
#[derive(Clone)]
pub struct AddManualEmojiUseCase {
    cache: Arc<dyn EmojiCachePort>,
    normalizer: Arc<dyn ImageNormalizerPort>,
    fetcher: EmojiFetchService,
}

impl AddManualEmojiUseCase {
    /// Creates new manual add use case.
    #[must_use]
    pub fn new(
        source: Arc<dyn EmojiSourcePort>,
        cache: Arc<dyn EmojiCachePort>,
        normalizer: Arc<dyn ImageNormalizerPort>,
    ) -> Self {
        let fetcher = EmojiFetchService::new(source, cache.clone());
        Self {
            cache,
            normalizer,
            fetcher,
        }
    }

    /// Validates the identifier, then downloads and normalizes that one file.
    ///
    /// # Errors
    /// Returns `Validation` before any state change if the identifier is not
    /// numeric; otherwise download, resize or cancellation errors.
    pub async fn execute(
        &self,
        request: &ManualEmojiRequest,
        progress: &ProgressTracker,
        cancel: &CancellationToken,
    ) -> Result<ManualEmojiResult, PipelineError> {
        let id = EmojiId::parse(&request.id)?;
        let emoji = Emoji::manual(id, request.animated);

        progress.advance(PipelineState::Downloading)?;
        let fetch = self.fetcher.ensure_cached(&emoji).await?;

        if cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        progress.advance(PipelineState::Normalizing)?;
        let path = self.cache.path_for(&emoji);
        let normalize = self.normalizer.normalize(&path, emoji.format()).await?;

        progress.advance(PipelineState::Ready)?;
        info!(id = %emoji.id(), ?fetch, ?normalize, "Manual emoji added");

        Ok(ManualEmojiResult {
            emoji,
            path,
            fetch,
            normalize,
        })
    }
}
