//! User input validation errors.

use thiserror::Error;

/// Rejected user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[allow(missing_docs)]
pub enum ValidationError {
    #[error("invalid emoji id {value:?}: expected decimal digits only")]
    InvalidIdentifier { value: String },

    #[error("invalid token: {reason}")]
    InvalidToken { reason: String },
}

impl ValidationError {
    /// Creates invalid identifier error.
    #[must_use]
    pub fn invalid_identifier(value: impl Into<String>) -> Self {
        Self::InvalidIdentifier {
            value: value.into(),
        }
    }

    /// Creates invalid token error.
    #[must_use]
    pub fn invalid_token(reason: impl Into<String>) -> Self {
        Self::InvalidToken {
            reason: reason.into(),
        }
    }
}
