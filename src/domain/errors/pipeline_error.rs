//! Orchestrator error aggregating every stage failure.

use thiserror::Error;

use super::{AuthError, DownloadError, FetchError, ResizeError, ValidationError};
use crate::domain::pipeline::PipelineState;
use crate::domain::ports::CacheError;

/// Failure surfaced by a pipeline operation.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum PipelineError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Download(#[from] DownloadError),

    #[error(transparent)]
    Resize(#[from] ResizeError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("no credential held, log in first")]
    NotAuthenticated,

    #[error("cannot move pipeline from {from} to {to}")]
    InvalidTransition {
        from: PipelineState,
        to: PipelineState,
    },

    #[error("operation cancelled")]
    Cancelled,
}

impl PipelineError {
    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        match self {
            Self::Auth(e) => e.is_network_error(),
            Self::Fetch(e) => e.is_network_error(),
            Self::Download(DownloadError::NetworkError { .. }) => true,
            _ => false,
        }
    }
}
