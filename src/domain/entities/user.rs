//! Authenticated user entity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Role assigned to a FilaDB account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    /// Full access, including user management and imports.
    Admin,
    /// Can change inventory.
    Editor,
    /// Read-only access.
    #[default]
    Viewer,
    /// Role this client does not know about.
    #[serde(other)]
    Unknown,
}

impl UserRole {
    /// Returns the wire name of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Editor => "editor",
            Self::Viewer => "viewer",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "editor" => Ok(Self::Editor),
            "viewer" => Ok(Self::Viewer),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// User returned by `/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Login email.
    pub email: String,
    /// Account role.
    #[serde(default)]
    pub role: UserRole,
    /// Server-side id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Whether the account may sign in.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Fields the client does not interpret (timestamps and the like).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

const fn default_active() -> bool {
    true
}

impl CurrentUser {
    /// Creates user with the given email and role.
    #[must_use]
    pub fn new(email: impl Into<String>, role: UserRole) -> Self {
        Self {
            email: email.into(),
            role,
            id: None,
            is_active: true,
            extra: Map::new(),
        }
    }

    /// Returns whether the user holds the admin role.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}
