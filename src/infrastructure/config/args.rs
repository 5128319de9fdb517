use std::path::PathBuf;

use clap::Args;

use super::app_config::{LogLevel, TokenStoreKind};

/// Options shared by every command.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log file path.
    #[arg(long, value_name = "PATH", global = true)]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum, global = true)]
    pub log_level: Option<LogLevel>,

    /// FilaDB server URL.
    #[arg(short, long, env = "FILADB_SERVER", value_name = "URL", global = true)]
    pub server: Option<String>,

    /// Request timeout in seconds (0 disables it).
    #[arg(long, value_name = "SECS", global = true)]
    pub timeout: Option<u64>,

    /// Token persistence backend.
    #[arg(long, value_enum, env = "FILADB_TOKEN_STORE", global = true)]
    pub token_store: Option<TokenStoreKind>,

    /// Session file for the `file` token store.
    #[arg(long, value_name = "PATH", global = true)]
    pub session_file: Option<PathBuf>,
}
