//! Authentication port definition.

use async_trait::async_trait;

use crate::domain::entities::Credential;
use crate::domain::errors::AuthError;

/// Port for exchanging account identifier and secret for a credential.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Logs in and returns the bearer credential. Never retries.
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Credential, AuthError>;
}
