//! Runs parsed commands against the session gate and the API client.

use std::sync::Arc;

use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use super::cli::{Access, Command, FilesAction, PrintersAction, RecordAction, resource_of};
use super::navigation::{Route, RouteDecision, RouteGuard};
use crate::application::dto::LoginRequest;
use crate::application::services::SessionGate;
use crate::domain::entities::{EntityRecord, QueryParams, RecordId};
use crate::domain::errors::ApiError;
use crate::domain::session::SessionState;
use crate::infrastructure::api::{ApiClient, Resource};

/// Why a command did not run.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Protected command without a session.
    #[error("not logged in, run `filadb login` first")]
    NotLoggedIn,
    /// `login` while a session exists. Holds the signed-in email.
    #[error("already logged in as {0}, run `filadb logout` first")]
    AlreadyLoggedIn(String),
    /// Admin command run by another role.
    #[error("this command requires the admin role")]
    AdminRequired,
    /// Client failure.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Executes commands for one process run.
pub struct CommandRunner {
    client: Arc<ApiClient>,
    gate: SessionGate,
}

impl CommandRunner {
    /// Creates runner with a fresh gate over `client`.
    #[must_use]
    pub fn new(client: Arc<ApiClient>) -> Self {
        let gate = SessionGate::new(client.clone());
        Self { client, gate }
    }

    /// Returns the session gate.
    #[must_use]
    pub const fn gate(&self) -> &SessionGate {
        &self.gate
    }

    /// Runs `command` and returns what should be printed. `Null` means nothing.
    ///
    /// # Errors
    /// Returns error if the session does not allow the command or the request fails.
    pub async fn run(&self, command: Command) -> Result<Value, CommandError> {
        let access = command.access();
        let resource = resource_of(&command);
        if access != Access::Open {
            let state = self.gate.initialize().await;
            authorize(access, route_for(&command), &state)?;
        }
        debug!(?access, "Running command");

        match command {
            Command::Login { email, password } => {
                let user = self.gate.login(LoginRequest::new(email, password)).await?;
                Ok(to_json(&user))
            }
            Command::Logout => {
                self.gate.logout().await?;
                Ok(json!({ "status": "logged out" }))
            }
            Command::Whoami => Ok(self.gate.current_user().map_or(Value::Null, |u| to_json(&u))),
            Command::Health => Ok(self.client.health_check().await?),
            Command::Users => Ok(records(self.client.get_users().await?)),
            Command::Register {
                email,
                password,
                role,
            } => {
                let created = self.client.register_user(&email, &password, role).await?;
                Ok(created.into())
            }
            Command::SyncSpoolmandb => Ok(self.client.sync_spoolmandb().await?),
            Command::Files {
                action: FilesAction::Upload { path, fields },
            } => Ok(self.client.upload_path(&path, &fields).await?.into()),
            Command::Printers {
                action: PrintersAction::Status { id, status },
            } => Ok(self
                .client
                .update_printer_status(&RecordId::from(id), &status)
                .await?),
            Command::Files {
                action: FilesAction::Record(action),
            }
            | Command::Printers {
                action: PrintersAction::Record(action),
            }
            | Command::Filaments { action }
            | Command::Spools { action }
            | Command::Manufacturers { action }
            | Command::Materials { action }
            | Command::BambuParts { action } => self.run_record(resource, action).await,
        }
    }

    async fn run_record(
        &self,
        resource: Option<Resource>,
        action: RecordAction,
    ) -> Result<Value, CommandError> {
        let Some(resource) = resource else {
            return Err(ApiError::unexpected("command has no collection").into());
        };
        let client = &self.client;
        let value = match action {
            RecordAction::List { query } => {
                let params: QueryParams = query.into_iter().collect();
                records(client.list(resource, &params).await?)
            }
            RecordAction::Get { id } => client.fetch(resource, &RecordId::from(id)).await?.into(),
            RecordAction::Create { data } => client.create(resource, data).await?.into(),
            RecordAction::Update { id, data } => {
                client.update(resource, &RecordId::from(id), data).await?.into()
            }
            RecordAction::Delete { id } => client.remove(resource, &RecordId::from(id)).await?,
        };
        Ok(value)
    }
}

/// Route whose guard a command passes through.
#[must_use]
pub const fn route_for(command: &Command) -> Route {
    match command {
        Command::Login { .. } => Route::Login,
        Command::Logout | Command::Health | Command::Whoami => Route::Dashboard,
        Command::Users
        | Command::Register { .. }
        | Command::SyncSpoolmandb
        | Command::BambuParts { .. } => Route::Admin,
        Command::Files { .. } => Route::Files,
        Command::Filaments { .. } => Route::Filaments,
        Command::Spools { .. } => Route::Spools,
        Command::Manufacturers { .. } => Route::Manufacturers,
        Command::Materials { .. } => Route::Materials,
        Command::Printers { .. } => Route::Printers,
    }
}

/// Applies the route guard and role check for `access`.
///
/// # Errors
/// Returns error if the session does not allow the route.
pub fn authorize(access: Access, route: Route, state: &SessionState) -> Result<(), CommandError> {
    let guard = match access {
        Access::Open => return Ok(()),
        Access::SignedOut => RouteGuard::PublicOnly,
        Access::SignedIn | Access::Admin => RouteGuard::Protected,
    };

    match guard.resolve(route, state) {
        RouteDecision::Render(_) => {}
        RouteDecision::Redirect(Route::Login) | RouteDecision::Loading => {
            return Err(CommandError::NotLoggedIn);
        }
        RouteDecision::Redirect(_) => {
            let email = state.user().map(|u| u.email.clone()).unwrap_or_default();
            return Err(CommandError::AlreadyLoggedIn(email));
        }
    }

    if access == Access::Admin && !Route::Admin.is_visible(state) {
        return Err(CommandError::AdminRequired);
    }
    Ok(())
}

fn records(list: Vec<EntityRecord>) -> Value {
    Value::Array(list.into_iter().map(Value::from).collect())
}

fn to_json<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
