//! Authentication DTOs.

use std::fmt;

use zeroize::Zeroizing;

/// Login request data.
#[derive(Clone)]
pub struct LoginRequest {
    /// Account identifier (email).
    pub identifier: String,
    /// Account password, wiped on drop.
    pub secret: Zeroizing<String>,
}

impl LoginRequest {
    /// Creates new login request.
    #[must_use]
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: Zeroizing::new(secret.into()),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("identifier", &self.identifier)
            .field("secret", &"[redacted]")
            .finish()
    }
}
