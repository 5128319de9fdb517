//! Authentication DTOs.

use std::fmt;

use zeroize::Zeroizing;

use crate::domain::entities::CurrentUser;

/// Login request data.
#[derive(Clone)]
pub struct LoginRequest {
    /// Account email, sent in the `username` form field.
    pub email: String,
    /// Account password, wiped from memory on drop.
    pub password: Zeroizing<String>,
}

impl LoginRequest {
    /// Creates new login request.
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: Zeroizing::new(password.into()),
        }
    }
}

impl fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// Login response data.
#[derive(Debug, Clone)]
pub struct LoginResponse {
    /// Authenticated user.
    pub user: CurrentUser,
    /// Token type announced by the server.
    pub token_type: Option<String>,
}

impl LoginResponse {
    /// Creates new login response.
    #[must_use]
    pub const fn new(user: CurrentUser, token_type: Option<String>) -> Self {
        Self { user, token_type }
    }
}
