//! Authentication error types.

use thiserror::Error;

/// Authentication error variants.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum AuthError {
    #[error("login rejected ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("account requires multi-factor authentication")]
    MfaRequired,

    #[error("malformed login response: {message}")]
    MalformedResponse { message: String, body: String },

    #[error("network error during authentication: {message}")]
    NetworkError { message: String },

    #[error("unexpected authentication error: {message}")]
    Unexpected { message: String },
}

impl AuthError {
    /// Creates rejection error from a non-success response.
    #[must_use]
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            body: body.into(),
        }
    }

    /// Creates malformed response error.
    #[must_use]
    pub fn malformed(message: impl Into<String>, body: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
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

    /// Creates unexpected error.
    #[must_use]
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::Unexpected {
            message: message.into(),
        }
    }

    /// Returns the HTTP status, if the server answered.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns the raw response body kept for diagnostics.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Rejected { body, .. } | Self::MalformedResponse { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Returns whether error is network related.
    #[must_use]
    pub const fn is_network_error(&self) -> bool {
        matches!(self, Self::NetworkError { .. })
    }
}
