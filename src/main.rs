use dotenvy::dotenv;
use home_buddy::{
    bot::{self, BotData},
    config::{self, StorageMode, database},
    errors::{Error, Result},
    services::{HttpBackend, LocalStore, Services},
};
use std::env;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (non-fatal, env vars can be set externally)
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load the application settings
    let settings = config::load_default_settings()
        .inspect_err(|e| error!("Critical error loading settings: {e}"))?;
    info!(
        "Services at {}, storage mode {:?}",
        settings.services.base_url, settings.storage.mode
    );

    // 4. Wire the collaborators
    let backend = HttpBackend::new(&settings.services)?;
    let services = match settings.storage.mode {
        StorageMode::Remote => Services::remote(backend),
        StorageMode::Local => {
            let db = database::create_connection()
                .await
                .inspect_err(|e| error!("Failed to open local store: {e}"))?;
            database::create_tables(&db)
                .await
                .inspect(|()| info!("Local store initialized successfully."))
                .inspect_err(|e| error!("Failed to create local tables: {e}"))?;
            Services::with_local_store(backend, LocalStore::new(db))
        }
    };

    // 5. Run the bot
    // DISCORD_BOT_TOKEN is read directly before use, never stored in settings
    let token = env::var("DISCORD_BOT_TOKEN")
        .inspect_err(|e| error!("DISCORD_BOT_TOKEN not found: {e}"))
        .map_err(Error::EnvVar)?;

    bot::run_bot(token, BotData::new(services, settings)).await
}
