pub mod history;
pub mod log;
pub mod profile;
pub mod run;
pub mod status;
pub mod tick;

use droplet_core::{AppConfig, SqliteStore, StoreError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "droplet_core=info,droplet_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Open the profile store the config points at.
pub(crate) fn open_store(config: &AppConfig) -> Result<SqliteStore, StoreError> {
    match &config.database_file {
        Some(path) => SqliteStore::open_at(path),
        None => SqliteStore::open(),
    }
}
