//! SQLite-backed profile store.
//!
//! One row per user; the profile is stored as a JSON document so the
//! persisted layout follows the data model without a wire format of its
//! own. The connection is owned for the life of the process and handed in
//! once (no per-operation open/close); `INSERT OR REPLACE` gives the
//! per-user atomic whole-profile write the engine requires.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StoreError;
use crate::profile::HydrationProfile;

use super::{data_dir, ProfileStore};

const DB_FILE: &str = "droplet.db";

/// SQLite database holding all tracked profiles.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open the database at `~/.config/droplet/droplet.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StoreError> {
        let path = data_dir()?.join(DB_FILE);
        Self::open_at(&path)
    }

    /// Open (or create) the database at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(|source| StoreError::OpenFailed {
            path: PathBuf::from(path),
            source,
        })?;
        let store = Self { conn: Mutex::new(conn) };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn: Mutex::new(conn) };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn
            .lock()
            .unwrap()
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS profiles (
                    user_id    TEXT PRIMARY KEY,
                    profile    TEXT NOT NULL,
                    updated_at TEXT NOT NULL
                );",
            )
            .map_err(|e| StoreError::MigrationFailed(e.to_string()))
    }
}

impl ProfileStore for SqliteStore {
    fn get(&self, user_id: &str) -> Result<Option<HydrationProfile>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let json: Option<String> = conn
            .query_row(
                "SELECT profile FROM profiles WHERE user_id = ?1",
                params![user_id],
                |row| row.get(0),
            )
            .optional()?;
        match json {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn upsert(&self, user_id: &str, profile: &HydrationProfile) -> Result<(), StoreError> {
        let json = serde_json::to_string(profile)?;
        self.conn.lock().unwrap().execute(
            "INSERT OR REPLACE INTO profiles (user_id, profile, updated_at) VALUES (?1, ?2, ?3)",
            params![user_id, json, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<(String, HydrationProfile)>, StoreError> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT user_id, profile FROM profiles ORDER BY user_id")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut profiles = Vec::new();
        for row in rows {
            let (user_id, json) = row?;
            profiles.push((user_id, serde_json::from_str(&json)?));
        }
        Ok(profiles)
    }
}
