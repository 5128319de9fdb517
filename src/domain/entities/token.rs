//! Bearer token value objects.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Bearer token with masking. The backing memory is wiped on drop.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AuthToken {
    value: String,
}

impl AuthToken {
    /// Creates new token, rejecting blank values.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into().trim().to_string();

        if value.is_empty() {
            return None;
        }

        Some(Self { value })
    }

    /// Creates token without validation.
    #[must_use]
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Returns token as string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the `Authorization` header value.
    #[must_use]
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.value)
    }

    /// Returns masked token for display.
    #[must_use]
    pub fn masked(&self) -> String {
        let chars: Vec<char> = self.value.chars().collect();
        if chars.len() <= 10 {
            return "*".repeat(chars.len());
        }

        let visible_prefix: String = chars[..4].iter().collect();
        let visible_suffix: String = chars[chars.len() - 4..].iter().collect();
        format!("{visible_prefix}...{visible_suffix}")
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("value", &self.masked())
            .finish()
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

/// Payload returned by the token endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenGrant {
    /// Issued access token.
    pub access_token: String,
    /// Token type, `bearer` for this backend.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Any additional fields sent by the server.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenGrant {
    /// Converts the grant into a usable token.
    #[must_use]
    pub fn token(&self) -> Option<AuthToken> {
        AuthToken::new(self.access_token.as_str())
    }
}

impl fmt::Debug for TokenGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenGrant")
            .field("access_token", &AuthToken::new_unchecked(self.access_token.as_str()))
            .field("token_type", &self.token_type)
            .finish_non_exhaustive()
    }
}
