//! Image normalization error types.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while shrinking a cached image.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum ResizeError {
    #[error("failed to decode {}: {message}", .path.display())]
    Decode { path: PathBuf, message: String },

    #[error("failed to read dimensions of {}: {message}", .path.display())]
    Dimensions { path: PathBuf, message: String },

    #[error("failed to encode {}: {message}", .path.display())]
    Encode { path: PathBuf, message: String },

    #[error("io error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    #[error("resize tool `{program}` not found")]
    ToolMissing { program: String },

    #[error("resize tool exited with status {}", .code.map_or_else(|| "signal".to_string(), |c| c.to_string()))]
    ExitStatus { code: Option<i32> },

    #[error("resize tool did not finish within {secs}s")]
    Timeout { secs: u64 },

    #[error("unexpected resize failure: {message}")]
    Unexpected { message: String },
}

impl ResizeError {
    /// Creates decode error.
    #[must_use]
    pub fn decode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Decode {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates error for unreadable size metadata.
    #[must_use]
    pub fn dimensions(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Dimensions {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates encode error.
    #[must_use]
    pub fn encode(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Encode {
            path: path.into(),
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

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns the subprocess exit code, when that is what failed.
    #[must_use]
    pub const fn exit_code(&self) -> Option<i32> {
        match self {
            Self::ExitStatus { code } => *code,
            _ => None,
        }
    }
}
