//! Application configuration.

/// Configuration model.
pub mod app_config;
/// Command-line overrides.
pub mod args;
/// Loading and creating the config file.
pub mod storage;

pub use app_config::{AppConfig, LogLevel, ServerConfig, TokenStoreKind};
pub use args::GlobalArgs;
pub use storage::{ConfigError, ConfigManager};
