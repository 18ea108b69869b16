//! Listing error types.

use thiserror::Error;

/// Failure while listing communities or emoji.
#[derive(Debug, Clone, Error)]
#[allow(missing_docs)]
pub enum FetchError {
    #[error("request failed ({status}): {body}")]
    Http { status: u16, body: String },

    #[error("network error: {message}")]
    NetworkError { message: String },

    #[error("failed to decode response: {message}")]
    Decode { message: String, body: String },
}

impl FetchError {
    /// Creates error from a non-success response.
    #[must_use]
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Creates network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Creates decode error, keeping the offending body.
    #[must_use]
    pub fn decode(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
            body: body.into(),
        }
    }

    /// Returns the HTTP status, if the server answered with one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. })
    }
}
