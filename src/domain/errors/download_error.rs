//! Image download error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while fetching a single emoji image into the cache.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum DownloadError {
    #[error("download of {url} failed ({status}): {body}")]
    Http {
        url: String,
        status: u16,
        body: String,
    },

    #[error("network error while downloading {url}: {message}")]
    NetworkError { url: String, message: String },

    #[error("cache write to {} failed: {message}", .path.display())]
    Io { path: PathBuf, message: String },
}

impl DownloadError {
    /// Creates error from a non-success response.
    #[must_use]
    pub fn http(url: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            url: url.into(),
            status,
            body: body.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::NetworkError {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates filesystem error.
    #[must_use]
    pub fn io(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Io {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Returns the HTTP status, if the CDN answered with one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
