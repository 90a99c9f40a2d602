/// Database connection and local-store schema management
pub mod database;

/// Service endpoints and defaults loaded from config.toml
pub mod settings;

/// User display names from environment variables
pub mod users;

pub use settings::{Settings, StorageMode, load_default_settings};
