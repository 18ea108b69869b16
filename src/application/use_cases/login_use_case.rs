//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::LoginRequest;
use crate::domain::entities::Credential;
use crate::domain::errors::{AuthError, ValidationError};
use crate::domain::ports::AuthPort;

/// Handles user authentication workflow.
#[derive(Clone)]
pub struct LoginUseCase {
    auth_port: Arc<dyn AuthPort>,
}

impl LoginUseCase {
    /// Creates new login use case.
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>) -> Self {
        Self { auth_port }
    }

    /// Exchanges identifier and secret for a credential.
    ///
    /// # Errors
    /// Returns error if the server rejects the login or cannot be reached.
    pub async fn execute(&self, request: &LoginRequest) -> Result<Credential, AuthError> {
        debug!(identifier = %request.identifier, "Attempting login");

        let credential = self
            .auth_port
            .authenticate(&request.identifier, &request.secret)
            .await
            .inspect_err(|e| warn!(error = %e, "Login failed"))?;

        info!(credential = %credential, "Successfully authenticated");
        Ok(credential)
    }

    /// Accepts a token the user already has. No network call is made.
    ///
    /// # Errors
    /// Returns error if the token is too short to be real.
    pub fn from_token(raw: &str) -> Result<Credential, ValidationError> {
        let credential = Credential::from_user_input(raw)
            .inspect_err(|e| warn!(error = %e, "Invalid token provided"))?;

        info!(credential = %credential, "Using supplied token");
        Ok(credential)
    }
}
