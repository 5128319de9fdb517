//! Session restoration use case.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::entities::CurrentUser;
use crate::domain::errors::ApiError;
use crate::domain::ports::AuthPort;

/// Turns a persisted token back into a signed-in user, if the backend still accepts it.
pub struct RestoreSessionUseCase {
    auth_port: Arc<dyn AuthPort>,
}

impl RestoreSessionUseCase {
    /// Creates new use case.
    #[must_use]
    pub const fn new(auth_port: Arc<dyn AuthPort>) -> Self {
        Self { auth_port }
    }

    /// Probes the stored token.
    ///
    /// A rejected or unreachable probe yields `None`. The stored token is left
    /// in place; it is only no longer treated as proof of identity.
    ///
    /// # Errors
    /// Returns error if durable storage cannot be read.
    pub async fn execute(&self) -> Result<Option<CurrentUser>, ApiError> {
        debug!("Checking for stored token");
        if !self.auth_port.restore_token().await? {
            debug!("No stored token");
            return Ok(None);
        }

        match self.auth_port.current_user().await {
            Ok(user) => {
                info!(email = %user.email, "Restored session from stored token");
                Ok(Some(user))
            }
            Err(e) if e.is_unauthorized() => {
                info!("Stored token was rejected");
                Ok(None)
            }
            Err(e) => {
                warn!(error = %e, "Could not verify stored token");
                Ok(None)
            }
        }
    }

    /// Forgets the token loaded by [`Self::execute`] without deleting it from storage.
    pub fn discard(&self) {
        self.auth_port.discard_token();
    }
}
