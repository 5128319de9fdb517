//! Authentication endpoints.

use async_trait::async_trait;
use reqwest::multipart::Form;
use serde_json::json;
use tracing::{error, info};

use super::client::ApiClient;
use super::options::RequestOptions;
use crate::domain::entities::{CurrentUser, EntityRecord, TokenGrant, UserRole};
use crate::domain::errors::ApiError;
use crate::domain::ports::AuthPort;

impl ApiClient {
    /// Exchanges credentials for a token and stores it.
    ///
    /// The email travels in the `username` form field. A token that cannot be
    /// persisted is still used for this session.
    ///
    /// # Errors
    /// Returns error if the credentials are rejected or the response has no token.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenGrant, ApiError> {
        let form = Form::new()
            .text("username", email.to_string())
            .text("password", password.to_string());

        let grant: TokenGrant = self
            .request_as("/auth/token", RequestOptions::post().multipart(form))
            .await?;

        let token = grant
            .token()
            .ok_or_else(|| ApiError::invalid_token("server returned an empty access token"))?;

        if let Err(e) = self.set_token(token).await {
            error!(error = %e, "Failed to persist token, keeping it for this session only");
        }

        info!(email, "Logged in");
        Ok(grant)
    }

    /// Fetches the user the current token belongs to.
    ///
    /// # Errors
    /// Returns error if the token is missing, expired or rejected.
    pub async fn get_current_user(&self) -> Result<CurrentUser, ApiError> {
        self.request_as("/auth/me", RequestOptions::get()).await
    }

    /// Lists all accounts (admin only).
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn get_users(&self) -> Result<Vec<EntityRecord>, ApiError> {
        self.request_as("/auth/users", RequestOptions::get()).await
    }

    /// Creates an account (admin only).
    ///
    /// # Errors
    /// Returns error if the request fails or the email is taken.
    pub async fn register_user(
        &self,
        email: &str,
        password: &str,
        role: UserRole,
    ) -> Result<EntityRecord, ApiError> {
        let body = json!({
            "email": email,
            "password": password,
            "role": role.as_str(),
            "is_active": true,
        });
        self.request_as("/auth/register", RequestOptions::post().json(body))
            .await
    }
}

#[async_trait]
impl AuthPort for ApiClient {
    async fn restore_token(&self) -> Result<bool, ApiError> {
        self.load_stored_token().await
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenGrant, ApiError> {
        Self::login(self, email, password).await
    }

    async fn current_user(&self) -> Result<CurrentUser, ApiError> {
        self.get_current_user().await
    }

    async fn clear_token(&self) -> Result<(), ApiError> {
        Self::clear_token(self).await
    }

    fn discard_token(&self) {
        Self::discard_token(self);
    }
}
