//! Session state observed by the auth gate.

use crate::domain::entities::CurrentUser;

/// Authentication status of the current session.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Stored token is being probed.
    #[default]
    Loading,
    /// Token accepted by the backend.
    Authenticated(CurrentUser),
    /// No usable token.
    Unauthenticated,
}

impl SessionState {
    /// Returns the signed-in user, if any.
    #[must_use]
    pub const fn user(&self) -> Option<&CurrentUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Returns whether the startup probe is still running.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Returns whether a user is signed in.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// Returns whether admin-only views should be shown.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user().is_some_and(CurrentUser::is_admin)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::Authenticated(user) => write!(f, "authenticated as {} ({})", user.email, user.role),
            Self::Unauthenticated => write!(f, "unauthenticated"),
        }
    }
}
