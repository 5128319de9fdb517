//! Infrastructure layer with external service adapters.

/// FilaDB REST API client.
pub mod api;
/// Application configuration.
pub mod config;
/// Durable key-value store adapters.
pub mod storage;

pub use api::{ApiClient, ClientSettings, RequestOptions, Resource};
pub use config::{AppConfig, ConfigManager, GlobalArgs, LogLevel, TokenStoreKind};
pub use storage::{FileStore, KeyringStore, MemoryStore, TOKEN_KEY};
