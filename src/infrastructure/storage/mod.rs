//! Durable key-value store adapters.

mod file_store;
#[cfg(feature = "keyring")]
mod keyring_store;
#[cfg(not(feature = "keyring"))]
mod keyring_store_stub;
mod memory_store;

pub use file_store::FileStore;
#[cfg(feature = "keyring")]
pub use keyring_store::KeyringStore;
#[cfg(not(feature = "keyring"))]
pub use keyring_store_stub::KeyringStore;
pub use memory_store::MemoryStore;

/// Key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "token";
