//! Port for shrinking cached images to the bounding box.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::entities::EmojiFormat;
use crate::domain::errors::ResizeError;

/// Result of normalizing one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeOutcome {
    /// Already within bounds; the file was not touched.
    Unchanged {
        /// Original width.
        width: u32,
        /// Original height.
        height: u32,
    },
    /// Re-encoded in process at a smaller size.
    Resized {
        /// Size before.
        from: (u32, u32),
        /// Size after.
        to: (u32, u32),
    },
    /// Handed to the animated resizer, which reported success.
    Delegated {
        /// Size before.
        from: (u32, u32),
    },
}

/// Summary of a per-file static batch. Failures do not stop the batch.
#[derive(Debug, Default)]
pub struct StaticBatchReport {
    /// Files shrunk.
    pub resized: Vec<PathBuf>,
    /// Files already within bounds.
    pub unchanged: usize,
    /// Files that could not be processed.
    pub failures: Vec<(PathBuf, ResizeError)>,
}

/// Summary of the single animated batch invocation.
#[derive(Debug, Default)]
pub struct AnimatedBatchReport {
    /// Files passed to the resizer.
    pub submitted: Vec<PathBuf>,
    /// Files already within bounds, left out of the invocation.
    pub unchanged: usize,
    /// Files whose dimensions could not be read.
    pub failures: Vec<(PathBuf, ResizeError)>,
    /// Failure of the invocation itself.
    pub batch_error: Option<ResizeError>,
}

/// Combined result of normalizing a whole cache directory.
#[derive(Debug, Default)]
pub struct NormalizeReport {
    /// Animated half.
    pub animated: AnimatedBatchReport,
    /// Static half.
    pub static_images: StaticBatchReport,
}

impl NormalizeReport {
    /// Returns true if any file or the animated invocation failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.animated.batch_error.is_some()
            || !self.animated.failures.is_empty()
            || !self.static_images.failures.is_empty()
    }
}

/// Port for normalizing cached images in place.
#[async_trait]
pub trait ImageNormalizerPort: Send + Sync {
    /// Returns the bounding box edge length.
    fn max_dimension(&self) -> u32;

    /// Normalizes a single file using the strategy for `format`.
    async fn normalize(&self, path: &Path, format: EmojiFormat) -> Result<NormalizeOutcome, ResizeError>;

    /// Resizes every static image in `dir`, one file at a time.
    ///
    /// # Errors
    /// Returns error only if the directory cannot be listed.
    async fn resize_all_static(&self, dir: &Path) -> Result<StaticBatchReport, ResizeError>;

    /// Resizes every animated image in `dir` with a single resizer invocation.
    ///
    /// # Errors
    /// Returns error only if the directory cannot be listed.
    async fn resize_all_animated(&self, dir: &Path) -> Result<AnimatedBatchReport, ResizeError>;

    /// Normalizes a whole directory: animated batch first, then static files.
    ///
    /// # Errors
    /// Returns error only if the directory cannot be listed.
    async fn normalize_dir(&self, dir: &Path) -> Result<NormalizeReport, ResizeError> {
        let animated = self.resize_all_animated(dir).await?;
        let static_images = self.resize_all_static(dir).await?;
        Ok(NormalizeReport {
            animated,
            static_images,
        })
    }
}
