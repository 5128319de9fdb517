//! Login use case implementation.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::application::dto::{LoginRequest, LoginResponse};
use crate::domain::errors::ApiError;
use crate::domain::ports::AuthPort;

/// Handles the credential exchange and the follow-up identity check.
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

    /// Logs in and fetches the user the new token belongs to.
    ///
    /// # Errors
    /// Returns error if the credentials or the issued token are rejected.
    pub async fn execute(&self, request: &LoginRequest) -> Result<LoginResponse, ApiError> {
        if request.email.is_empty() {
            return Err(ApiError::validation("email is required"));
        }

        debug!(email = %request.email, "Attempting login");

        let grant = self
            .auth_port
            .login(&request.email, &request.password)
            .await
            .inspect_err(|e| warn!(error = %e, "Login rejected"))?;

        let user = self
            .auth_port
            .current_user()
            .await
            .inspect_err(|e| warn!(error = %e, "Token issued at login was not accepted"))?;

        info!(email = %user.email, role = %user.role, "Successfully authenticated");

        Ok(LoginResponse::new(user, grant.token_type.clone()))
    }

    /// Forgets the token.
    ///
    /// # Errors
    /// Returns error if durable storage cannot be cleared.
    pub async fn logout(&self) -> Result<(), ApiError> {
        debug!("Clearing token");
        self.auth_port.clear_token().await.inspect_err(|e| {
            tracing::error!(error = %e, "Failed to clear stored token");
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::mocks::MockAuthPort;

    #[tokio::test]
    async fn test_successful_login() {
        let auth_port = Arc::new(MockAuthPort::new());
        let use_case = LoginUseCase::new(auth_port.clone());

        let response = use_case
            .execute(&LoginRequest::new("a@b.com", "secret"))
            .await
            .unwrap();

        assert_eq!(response.user.email, "a@b.com");
        assert_eq!(response.token_type.as_deref(), Some("bearer"));
        assert_eq!(auth_port.token().as_deref(), Some("xyz"));
        assert_eq!(auth_port.current_user_calls(), 1);
    }

    #[tokio::test]
    async fn test_rejected_credentials_skip_identity_check() {
        let auth_port = Arc::new(MockAuthPort::new());
        auth_port.set_accepts_credentials(false);
        let use_case = LoginUseCase::new(auth_port.clone());

        let err = use_case
            .execute(&LoginRequest::new("a@b.com", "wrong"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Incorrect email or password");
        assert_eq!(auth_port.current_user_calls(), 0);
    }

    #[tokio::test]
    async fn test_blank_email_is_rejected_locally() {
        let auth_port = Arc::new(MockAuthPort::new());
        let use_case = LoginUseCase::new(auth_port.clone());

        let result = use_case.execute(&LoginRequest::new("  ", "secret")).await;

        assert!(matches!(result, Err(ApiError::Validation { .. })));
        assert!(auth_port.token().is_none());
    }

    #[tokio::test]
    async fn test_logout_clears_token() {
        let auth_port = Arc::new(MockAuthPort::with_stored_token("old"));
        let use_case = LoginUseCase::new(auth_port.clone());

        use_case.logout().await.unwrap();

        assert!(auth_port.token().is_none());
    }
}
