//! Authentication port definition.

use async_trait::async_trait;

use crate::domain::entities::{CurrentUser, TokenGrant};
use crate::domain::errors::ApiError;

/// Port for the backend authentication operations the session gate drives.
#[async_trait]
pub trait AuthPort: Send + Sync {
    /// Loads a previously persisted token. Returns whether one was found.
    async fn restore_token(&self) -> Result<bool, ApiError>;

    /// Exchanges credentials for a token and keeps it for later requests.
    async fn login(&self, email: &str, password: &str) -> Result<TokenGrant, ApiError>;

    /// Fetches the user the current token belongs to.
    async fn current_user(&self) -> Result<CurrentUser, ApiError>;

    /// Forgets the token in memory and in durable storage.
    async fn clear_token(&self) -> Result<(), ApiError>;

    /// Forgets the token in memory only. Durable storage is not touched.
    fn discard_token(&self);
}
