//! SQLite-backed key-value store.
//!
//! The durable contract is a small set of well-known keys holding JSON
//! values: lists, garden, stats, the active session, and settings. The
//! active session lives under a single key; an absent key means no
//! session. Multi-key writes that belong to one logical transition go
//! through [`Database::commit_transition`], which commits them in a
//! single SQLite transaction.

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;
use crate::model::{BlockList, CycleStat, FocusList, GardenPlant, Session, Settings};

use super::{data_dir, seed};

/// Well-known storage keys.
pub mod keys {
    pub const FOCUS_LISTS: &str = "focus_lists";
    pub const BLOCK_LISTS: &str = "block_lists";
    pub const GARDEN: &str = "garden";
    pub const STATS: &str = "stats";
    pub const ACTIVE_SESSION: &str = "active_session";
    pub const SETTINGS: &str = "settings";
}

/// Durable key-value store.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the store at `~/.config/focusgarden/focusgarden.db`.
    ///
    /// Creates the file and schema if they don't exist, and seeds the
    /// default focus/block lists on a fresh install.
    ///
    /// # Errors
    /// Returns an error if the store cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()?.join("focusgarden.db");
        Self::open_at(&path)
    }

    /// Open the store at an explicit path.
    pub fn open_at(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|source| StorageError::OpenFailed {
            path: path.to_path_buf(),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        db.seed_defaults()?;
        Ok(db)
    }

    /// Open an in-memory store (tests and ephemeral use).
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|source| StorageError::OpenFailed {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        let db = Self { conn };
        db.migrate()?;
        db.seed_defaults()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );",
            )
            .map_err(StorageError::WriteFailed)
    }

    fn seed_defaults(&self) -> Result<(), StorageError> {
        if self.kv_get(keys::FOCUS_LISTS)?.is_none() {
            self.set_json(keys::FOCUS_LISTS, &seed::default_focus_lists())?;
        }
        if self.kv_get(keys::BLOCK_LISTS)?.is_none() {
            self.set_json(keys::BLOCK_LISTS, &seed::default_block_lists())?;
        }
        Ok(())
    }

    // ── Raw key-value access ─────────────────────────────────────────

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM kv WHERE key = ?1")
            .map_err(StorageError::ReadFailed)?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::ReadFailed(e)),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
                params![key, value],
            )
            .map_err(StorageError::WriteFailed)?;
        Ok(())
    }

    /// Remove a key from the kv store.
    pub fn kv_delete(&self, key: &str) -> Result<(), StorageError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])
            .map_err(StorageError::WriteFailed)?;
        Ok(())
    }

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.kv_get(key)? {
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .map_err(|source| StorageError::Corrupt {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    fn set_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = encode(key, value)?;
        self.kv_set(key, &raw)
    }

    // ── Typed accessors ──────────────────────────────────────────────

    pub fn load_session(&self) -> Result<Option<Session>, StorageError> {
        self.get_json(keys::ACTIVE_SESSION)
    }

    pub fn save_session(&self, session: &Session) -> Result<(), StorageError> {
        self.set_json(keys::ACTIVE_SESSION, session)
    }

    pub fn clear_session(&self) -> Result<(), StorageError> {
        self.kv_delete(keys::ACTIVE_SESSION)
    }

    pub fn load_focus_lists(&self) -> Result<Vec<FocusList>, StorageError> {
        Ok(self.get_json(keys::FOCUS_LISTS)?.unwrap_or_default())
    }

    pub fn save_focus_lists(&self, lists: &[FocusList]) -> Result<(), StorageError> {
        self.set_json(keys::FOCUS_LISTS, &lists)
    }

    pub fn load_block_lists(&self) -> Result<Vec<BlockList>, StorageError> {
        Ok(self.get_json(keys::BLOCK_LISTS)?.unwrap_or_default())
    }

    pub fn save_block_lists(&self, lists: &[BlockList]) -> Result<(), StorageError> {
        self.set_json(keys::BLOCK_LISTS, &lists)
    }

    pub fn load_garden(&self) -> Result<Vec<GardenPlant>, StorageError> {
        Ok(self.get_json(keys::GARDEN)?.unwrap_or_default())
    }

    pub fn load_stats(&self) -> Result<Vec<CycleStat>, StorageError> {
        Ok(self.get_json(keys::STATS)?.unwrap_or_default())
    }

    pub fn load_settings(&self) -> Result<Settings, StorageError> {
        Ok(self.get_json(keys::SETTINGS)?.unwrap_or_default())
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), StorageError> {
        self.set_json(keys::SETTINGS, settings)
    }

    // ── Transition commit ────────────────────────────────────────────

    /// Commit one lifecycle transition atomically.
    ///
    /// Writes (or clears, for `None`) the active session together with
    /// the garden/stat lists touched by the transition's accrual, in a
    /// single SQLite transaction. Either every write lands or none
    /// does, so recovery can never observe a session that advanced
    /// without its accrual.
    pub fn commit_transition(
        &mut self,
        session: Option<&Session>,
        garden: Option<&[GardenPlant]>,
        stats: Option<&[CycleStat]>,
    ) -> Result<(), StorageError> {
        let session_raw = session
            .map(|s| encode(keys::ACTIVE_SESSION, s))
            .transpose()?;
        let garden_raw = garden.map(|g| encode(keys::GARDEN, &g)).transpose()?;
        let stats_raw = stats.map(|s| encode(keys::STATS, &s)).transpose()?;

        let tx = self.conn.transaction().map_err(StorageError::WriteFailed)?;
        match session_raw {
            Some(raw) => tx_set(&tx, keys::ACTIVE_SESSION, &raw)?,
            None => {
                tx.execute("DELETE FROM kv WHERE key = ?1", params![keys::ACTIVE_SESSION])
                    .map_err(StorageError::WriteFailed)?;
            }
        }
        if let Some(raw) = garden_raw {
            tx_set(&tx, keys::GARDEN, &raw)?;
        }
        if let Some(raw) = stats_raw {
            tx_set(&tx, keys::STATS, &raw)?;
        }
        tx.commit().map_err(StorageError::WriteFailed)
    }
}

fn encode<T: Serialize>(key: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|source| StorageError::Encode {
        key: key.to_string(),
        source,
    })
}

fn tx_set(tx: &rusqlite::Transaction<'_>, key: &str, value: &str) -> Result<(), StorageError> {
    tx.execute(
        "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
        params![key, value],
    )
    .map_err(StorageError::WriteFailed)?;
    Ok(())
}
