//! Domain entity definitions.

mod query;
mod record;
mod token;
mod user;

pub use query::QueryParams;
pub use record::{EntityRecord, RecordId};
pub use token::{AuthToken, TokenGrant};
pub use user::{CurrentUser, UserRole};
