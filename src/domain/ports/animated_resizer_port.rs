//! Capability port for shrinking animated images.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::errors::ResizeError;

/// Resizes animated images in place, keeping every frame.
///
/// The default implementation shells out to an external tool; an in-process
/// codec can replace it without touching the orchestrator.
#[async_trait]
pub trait AnimatedResizerPort: Send + Sync {
    /// Shrinks every file in `paths` to fit within `bounds`×`bounds` in one
    /// invocation. An empty slice is a no-op.
    async fn resize_fit(&self, paths: &[PathBuf], bounds: u32) -> Result<(), ResizeError>;
}
