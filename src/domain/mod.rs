//! Domain layer with core entities, session state and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Session state.
pub mod session;

pub use entities::{AuthToken, CurrentUser, EntityRecord, QueryParams, RecordId, UserRole};
pub use errors::{ApiError, StorageError};
pub use ports::{AuthPort, KeyValueStore};
pub use session::SessionState;
