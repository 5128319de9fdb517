//! Application configuration.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use super::args::GlobalArgs;
use crate::infrastructure::api::{API_BASE_PATH, ClientSettings, DEFAULT_SERVER_URL};

pub(crate) const APP_QUALIFIER: &str = "dev";
pub(crate) const APP_ORGANIZATION: &str = "filadb";
pub(crate) const APP_NAME: &str = "filadb";

/// Log level configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Trace level.
    Trace,
    /// Debug level.
    Debug,
    /// Info level.
    #[default]
    Info,
    /// Warning level.
    Warn,
    /// Error level.
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Trace => write!(f, "trace"),
            Self::Debug => write!(f, "debug"),
            Self::Info => write!(f, "info"),
            Self::Warn => write!(f, "warn"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Where the bearer token is persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TokenStoreKind {
    /// System keyring.
    Keyring,
    /// TOML file in the data directory.
    File,
    /// Nothing survives the process.
    Memory,
}

impl Default for TokenStoreKind {
    fn default() -> Self {
        if cfg!(feature = "keyring") {
            Self::Keyring
        } else {
            Self::File
        }
    }
}

/// Backend connection configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server URL, e.g. `http://localhost:8000`.
    #[serde(default = "default_server_url")]
    pub url: String,

    /// API prefix.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Request timeout in seconds. `0` waits indefinitely.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: default_server_url(),
            base_path: default_base_path(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_base_path() -> String {
    API_BASE_PATH.to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

/// Application configuration.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration file path.
    #[serde(skip)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[serde(skip)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[serde(default)]
    pub log_level: LogLevel,

    /// Backend connection.
    #[serde(default)]
    pub server: ServerConfig,

    /// Token persistence backend.
    #[serde(default)]
    pub token_store: TokenStoreKind,

    /// Session file used by the `file` token store.
    #[serde(default)]
    pub session_file: Option<PathBuf>,
}

impl AppConfig {
    /// Merges CLI arguments into the configuration.
    pub fn merge_with_args(&mut self, args: &GlobalArgs) {
        if let Some(config_path) = &args.config {
            self.config = Some(config_path.clone());
        }
        if let Some(log_path) = &args.log_path {
            self.log_path = Some(log_path.clone());
        }
        if let Some(log_level) = args.log_level {
            self.log_level = log_level;
        }
        if let Some(server) = &args.server {
            self.server.url.clone_from(server);
        }
        if let Some(timeout) = args.timeout {
            self.server.timeout_secs = timeout;
        }
        if let Some(token_store) = args.token_store {
            self.token_store = token_store;
        }
        if let Some(session_file) = &args.session_file {
            self.session_file = Some(session_file.clone());
        }
    }

    /// Returns the HTTP client settings.
    #[must_use]
    pub fn client_settings(&self) -> ClientSettings {
        let timeout = (self.server.timeout_secs > 0)
            .then(|| Duration::from_secs(self.server.timeout_secs));

        let mut settings = ClientSettings::new(self.server.url.as_str()).with_timeout(timeout);
        settings.base_path.clone_from(&self.server.base_path);
        settings
    }

    /// Returns default log file path.
    #[must_use]
    pub fn default_log_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("filadb.log"))
    }

    /// Returns default session file path.
    #[must_use]
    pub fn default_session_path() -> Option<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.data_dir().join("session.toml"))
    }

    /// Returns effective log path.
    #[must_use]
    pub fn effective_log_path(&self) -> Option<PathBuf> {
        self.log_path.clone().or_else(Self::default_log_path)
    }

    /// Returns effective session file path.
    #[must_use]
    pub fn effective_session_path(&self) -> Option<PathBuf> {
        self.session_file.clone().or_else(Self::default_session_path)
    }
}
