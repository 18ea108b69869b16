//! Shrinks cached emoji images to a square bounding box.
//!
//! Static images are decoded, resampled and re-encoded in process. Animated
//! images are handed to an [`AnimatedResizerPort`] so every frame survives.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use image::ImageReader;
use image::imageops::FilterType;
use tokio::fs;
use tracing::{debug, error, info, warn};

use crate::domain::entities::EmojiFormat;
use crate::domain::errors::ResizeError;
use crate::domain::ports::{
    AnimatedBatchReport, AnimatedResizerPort, ImageNormalizerPort, NormalizeOutcome,
    StaticBatchReport,
};

/// Edge length of the bounding box emoji are shrunk into.
pub const DEFAULT_MAX_DIMENSION: u32 = 50;

/// Returns the size `width`×`height` scales to so the longer edge equals
/// `max`, or None if it already fits. A `max` of zero is treated as one.
#[must_use]
pub fn fit_within(width: u32, height: u32, max: u32) -> Option<(u32, u32)> {
    let max = max.max(1);
    let longest = width.max(height);
    if longest <= max {
        return None;
    }

    let factor = f64::from(max) / f64::from(longest);
    let scale = |edge: u32| {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let scaled = (f64::from(edge) * factor).round() as u32;
        scaled.clamp(1, max)
    };

    Some((scale(width), scale(height)))
}

/// Reads width and height from the file header without decoding pixels.
fn read_dimensions(path: &Path) -> Result<(u32, u32), ResizeError> {
    ImageReader::open(path)
        .map_err(|e| ResizeError::io(path, e.to_string()))?
        .with_guessed_format()
        .map_err(|e| ResizeError::io(path, e.to_string()))?
        .into_dimensions()
        .map_err(|e| ResizeError::dimensions(path, e.to_string()))
}

/// Decodes, resamples and atomically rewrites one static image.
fn resize_static_file(path: &Path, max: u32) -> Result<NormalizeOutcome, ResizeError> {
    let (width, height) = read_dimensions(path)?;
    let Some((new_width, new_height)) = fit_within(width, height, max) else {
        return Ok(NormalizeOutcome::Unchanged { width, height });
    };

    let reader = ImageReader::open(path)
        .map_err(|e| ResizeError::io(path, e.to_string()))?
        .with_guessed_format()
        .map_err(|e| ResizeError::io(path, e.to_string()))?;
    let format = reader
        .format()
        .ok_or_else(|| ResizeError::decode(path, "unrecognized image format"))?;
    let decoded = reader
        .decode()
        .map_err(|e| ResizeError::decode(path, e.to_string()))?;

    let resized = decoded.resize_exact(new_width, new_height, FilterType::Lanczos3);

    let parent = path
        .parent()
        .ok_or_else(|| ResizeError::io(path, "path has no parent directory"))?;
    let mut staged = tempfile::NamedTempFile::new_in(parent)
        .map_err(|e| ResizeError::io(path, e.to_string()))?;
    resized
        .write_to(staged.as_file_mut(), format)
        .map_err(|e| ResizeError::encode(path, e.to_string()))?;
    staged
        .persist(path)
        .map_err(|e| ResizeError::io(path, e.error.to_string()))?;

    Ok(NormalizeOutcome::Resized {
        from: (width, height),
        to: (new_width, new_height),
    })
}

/// Lists files in `dir` whose extension maps to `format`, sorted by path.
async fn list_files(dir: &Path, format: EmojiFormat) -> Result<Vec<PathBuf>, ResizeError> {
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| ResizeError::io(dir, e.to_string()))?;

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| ResizeError::io(dir, e.to_string()))?
    {
        let path = entry.path();
        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .and_then(EmojiFormat::from_extension)
            == Some(format);
        if matches && entry.file_type().await.is_ok_and(|t| t.is_file()) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

async fn run_blocking<T, F>(task: F) -> Result<T, ResizeError>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, ResizeError> + Send + 'static,
{
    tokio::task::spawn_blocking(task).await.map_err(|e| {
        error!(error = %e, "Image task panicked");
        ResizeError::unexpected(e.to_string())
    })?
}

/// Default normalizer: in-process for static images, delegated for animated.
pub struct ImageNormalizer {
    max_dimension: u32,
    animated: Arc<dyn AnimatedResizerPort>,
}

impl ImageNormalizer {
    /// Creates a normalizer for the given box size and animated resizer.
    #[must_use]
    pub fn new(max_dimension: u32, animated: Arc<dyn AnimatedResizerPort>) -> Self {
        Self {
            max_dimension,
            animated,
        }
    }

    async fn dimensions(&self, path: &Path) -> Result<(u32, u32), ResizeError> {
        let owned = path.to_path_buf();
        run_blocking(move || read_dimensions(&owned)).await
    }
}

#[async_trait]
impl ImageNormalizerPort for ImageNormalizer {
    fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    async fn normalize(
        &self,
        path: &Path,
        format: EmojiFormat,
    ) -> Result<NormalizeOutcome, ResizeError> {
        let max = self.max_dimension;

        if format.is_animated() {
            let (width, height) = self.dimensions(path).await?;
            if fit_within(width, height, max).is_none() {
                return Ok(NormalizeOutcome::Unchanged { width, height });
            }
            self.animated
                .resize_fit(&[path.to_path_buf()], max)
                .await?;
            debug!(path = %path.display(), width, height, "Resized animated emoji");
            return Ok(NormalizeOutcome::Delegated {
                from: (width, height),
            });
        }

        let owned = path.to_path_buf();
        let outcome = run_blocking(move || resize_static_file(&owned, max)).await?;
        if let NormalizeOutcome::Resized { from, to } = outcome {
            debug!(path = %path.display(), ?from, ?to, "Resized static emoji");
        }
        Ok(outcome)
    }

    async fn resize_all_static(&self, dir: &Path) -> Result<StaticBatchReport, ResizeError> {
        let files = list_files(dir, EmojiFormat::Png).await?;
        let mut report = StaticBatchReport::default();

        for path in files {
            match self.normalize(&path, EmojiFormat::Png).await {
                Ok(NormalizeOutcome::Resized { .. }) => report.resized.push(path),
                Ok(_) => report.unchanged += 1,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping static emoji");
                    report.failures.push((path, e));
                }
            }
        }

        info!(
            resized = report.resized.len(),
            unchanged = report.unchanged,
            failed = report.failures.len(),
            "Static emoji normalized"
        );

        Ok(report)
    }

    async fn resize_all_animated(&self, dir: &Path) -> Result<AnimatedBatchReport, ResizeError> {
        let files = list_files(dir, EmojiFormat::Gif).await?;
        let mut report = AnimatedBatchReport::default();

        for path in files {
            match self.dimensions(&path).await {
                Ok((w, h)) if fit_within(w, h, self.max_dimension).is_some() => {
                    report.submitted.push(path);
                }
                Ok(_) => report.unchanged += 1,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping animated emoji");
                    report.failures.push((path, e));
                }
            }
        }

        if !report.submitted.is_empty()
            && let Err(e) = self
                .animated
                .resize_fit(&report.submitted, self.max_dimension)
                .await
        {
            warn!(count = report.submitted.len(), error = %e, "Animated batch resize failed");
            report.batch_error = Some(e);
        }

        info!(
            submitted = report.submitted.len(),
            unchanged = report.unchanged,
            failed = report.failures.len(),
            "Animated emoji normalized"
        );

        Ok(report)
    }
}
