//! Session gate: decides whether the user is signed in.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use crate::application::dto::LoginRequest;
use crate::application::use_cases::{LoginUseCase, RestoreSessionUseCase};
use crate::domain::entities::CurrentUser;
use crate::domain::errors::ApiError;
use crate::domain::ports::AuthPort;
use crate::domain::session::SessionState;

/// State machine over [`SessionState`].
///
/// Every transition captures a generation. `login` and `logout` advance it,
/// and a transition only commits if the generation is unchanged once its I/O
/// completes, so a response that arrives after a logout cannot sign the user
/// back in. Transitions that perform I/O run one at a time; `logout` never
/// waits for them.
pub struct SessionGate {
    login_use_case: LoginUseCase,
    restore_use_case: RestoreSessionUseCase,
    state: watch::Sender<SessionState>,
    generation: AtomicU64,
    transition: Mutex<()>,
}

impl SessionGate {
    /// Creates gate in the `Loading` state.
    #[must_use]
    pub fn new(auth_port: Arc<dyn AuthPort>) -> Self {
        let (state, _) = watch::channel(SessionState::Loading);
        Self {
            login_use_case: LoginUseCase::new(Arc::clone(&auth_port)),
            restore_use_case: RestoreSessionUseCase::new(auth_port),
            state,
            generation: AtomicU64::new(0),
            transition: Mutex::new(()),
        }
    }

    /// Returns a snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Returns the signed-in user, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<CurrentUser> {
        self.state.borrow().user().cloned()
    }

    /// Subscribes to state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Probes the stored token and settles on `Authenticated` or `Unauthenticated`.
    pub async fn initialize(&self) -> SessionState {
        let _transition = self.transition.lock().await;
        let generation = self.generation.load(Ordering::SeqCst);
        self.commit(generation, SessionState::Loading);

        let next = match self.restore_use_case.execute().await {
            Ok(Some(user)) => SessionState::Authenticated(user),
            Ok(None) => SessionState::Unauthenticated,
            Err(e) => {
                warn!(error = %e, "Could not read stored session");
                SessionState::Unauthenticated
            }
        };

        if !self.commit(generation, next) {
            debug!("Session changed while checking the stored token, discarding result");
            self.restore_use_case.discard();
        }
        self.state()
    }

    /// Logs in and, on success, moves to `Authenticated`.
    ///
    /// # Errors
    /// Returns a validation error when a user is already signed in. Returns the
    /// client error unchanged when the login or the identity check fails; the
    /// state is left as it was. Returns [`ApiError::Superseded`] when a logout
    /// happened while the login was in flight.
    pub async fn login(&self, request: LoginRequest) -> Result<CurrentUser, ApiError> {
        let _transition = self.transition.lock().await;
        if let Some(user) = self.current_user() {
            return Err(ApiError::validation(format!(
                "already signed in as {}, log out first",
                user.email
            )));
        }
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        let result = self.login_use_case.execute(&request).await;

        if !self.is_current(generation) {
            self.discard_stale_login().await;
            return Err(ApiError::Superseded);
        }

        let response = result?;
        if self.commit(generation, SessionState::Authenticated(response.user.clone())) {
            Ok(response.user)
        } else {
            self.discard_stale_login().await;
            Err(ApiError::Superseded)
        }
    }

    /// Drops the user and the token. The state becomes `Unauthenticated`
    /// even if the stored token cannot be removed.
    ///
    /// # Errors
    /// Returns error if durable storage cannot be cleared.
    pub async fn logout(&self) -> Result<(), ApiError> {
        self.state.send_modify(|state| {
            self.generation.fetch_add(1, Ordering::SeqCst);
            *state = SessionState::Unauthenticated;
        });
        info!("Logged out");
        self.login_use_case.logout().await
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn commit(&self, generation: u64, next: SessionState) -> bool {
        self.state.send_if_modified(|state| {
            if !self.is_current(generation) {
                return false;
            }
            debug!(state = %next, "Session state changed");
            *state = next;
            true
        })
    }

    async fn discard_stale_login(&self) {
        debug!("Login finished after the session changed, dropping its token");
        if let Err(e) = self.login_use_case.logout().await {
            warn!(error = %e, "Failed to drop token of superseded login");
        }
    }
}
