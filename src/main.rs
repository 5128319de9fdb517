use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use filadb::domain::ports::KeyValueStore;
use filadb::infrastructure::{
    ApiClient, AppConfig, ConfigManager, FileStore, KeyringStore, MemoryStore, TokenStoreKind,
};
use filadb::presentation::{Cli, CommandRunner};

fn init_logging(config: &AppConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.to_string()));

    if let Some(log_path) = config.effective_log_path() {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)?;

        let file_layer = fmt::layer()
            .with_writer(file)
            .with_ansi(false)
            .with_target(true)
            .with_thread_ids(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(file_layer)
            .init();

        info!(path = %log_path.display(), "Logging initialized");
    } else {
        tracing_subscriber::registry().with(filter).init();
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let manager = ConfigManager::new()?;
    let mut config = manager.load_config(cli.global.config.as_deref())?;
    config.merge_with_args(&cli.global);
    Ok(config)
}

fn create_store(config: &AppConfig) -> Result<Arc<dyn KeyValueStore>> {
    let store: Arc<dyn KeyValueStore> = match config.token_store {
        TokenStoreKind::Keyring => Arc::new(KeyringStore::new()),
        TokenStoreKind::File => {
            let path = config
                .effective_session_path()
                .ok_or_else(|| eyre!("could not determine the session file location"))?;
            Arc::new(FileStore::new(path))
        }
        TokenStoreKind::Memory => Arc::new(MemoryStore::new()),
    };
    Ok(store)
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    init_logging(&config)?;

    info!(
        version = filadb::VERSION,
        server = %config.server.url,
        store = ?config.token_store,
        "Starting FilaDB client"
    );

    let client = Arc::new(ApiClient::new(config.client_settings(), create_store(&config)?)?);
    let runner = CommandRunner::new(client);

    let output = runner.run(cli.command).await?;
    if !output.is_null() {
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    Ok(())
}
