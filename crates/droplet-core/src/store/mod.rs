//! Profile persistence.
//!
//! The engine depends only on the [`ProfileStore`] contract: keyed get,
//! whole-profile upsert, list-all. Per-user atomicity is required (a
//! profile's rollover and reminder fields persist as one unit); no
//! cross-user transactional guarantee is. Both implementations take
//! `&self` with interior synchronization, so configuration writes and tick
//! writes for the same user serialize at the store.

mod memory;
pub mod database;

pub use database::SqliteStore;
pub use memory::MemoryStore;

use std::path::PathBuf;

use crate::error::StoreError;
use crate::profile::HydrationProfile;

/// Durable keyed storage of per-user profiles.
pub trait ProfileStore: Send + Sync {
    fn get(&self, user_id: &str) -> Result<Option<HydrationProfile>, StoreError>;

    /// Persist the full profile in one write.
    fn upsert(&self, user_id: &str, profile: &HydrationProfile) -> Result<(), StoreError>;

    fn list_all(&self) -> Result<Vec<(String, HydrationProfile)>, StoreError>;
}

/// Returns `~/.config/droplet[-dev]/` based on DROPLET_ENV.
///
/// Set DROPLET_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, std::io::Error> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DROPLET_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("droplet-dev")
    } else {
        base_dir.join("droplet")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
