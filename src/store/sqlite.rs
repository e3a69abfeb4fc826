// SQLite-backed credential store
// A small key-value table; blank writes delete the row

use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use super::CredentialStore;

const ACCESS_TOKEN_KEY: &str = "access_token";
const REFRESH_TOKEN_KEY: &str = "refresh_token";
const USER_ID_KEY: &str = "user_id";

/// Persistent credential store over a SQLite key-value table.
///
/// Also usable as a general string key-value facility for the embedding
/// app; the credential fields are just three well-known keys.
pub struct SqliteCredentialStore {
    conn: Mutex<Connection>,
}

impl SqliteCredentialStore {
    /// Open (and initialize if needed) the store at the given path
    pub fn open(path: &Path) -> Result<Self> {
        tracing::info!("Opening credential store: {}", path.display());
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open SQLite database: {}", path.display()))?;
        Self::init(conn)
    }

    /// Open the store at the platform default location
    /// (e.g. ~/.local/share/authguard/credentials.sqlite3 on Linux)
    pub fn open_default() -> Result<Self> {
        let dir = dirs::data_dir()
            .context("Could not determine platform data directory")?
            .join("authguard");
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        Self::open(&dir.join("credentials.sqlite3"))
    }

    /// In-memory store, mainly for tests
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory SQLite")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute(
            "CREATE TABLE IF NOT EXISTS key_value (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
            [],
        )
        .context("Failed to create key_value table")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Read a value by key
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock();
        conn.query_row("SELECT value FROM key_value WHERE key = ?", [key], |row| {
            row.get(0)
        })
        .optional()
        .with_context(|| format!("Failed to read key: {key}"))
    }

    /// Write a value by key; `None` or a blank value deletes the row
    pub fn set(&self, key: &str, value: Option<&str>) -> Result<()> {
        let conn = self.lock();
        set_in(&conn, key, value)
    }

    fn get_logged(&self, key: &str) -> Option<String> {
        match self.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Credential store read failed: {e:#}");
                None
            }
        }
    }
}

/// Upsert or delete a key within an existing connection/transaction
fn set_in(conn: &Connection, key: &str, value: Option<&str>) -> Result<()> {
    match value.filter(|v| !v.trim().is_empty()) {
        Some(value) => conn
            .execute(
                "INSERT INTO key_value (key, value) VALUES (?1, ?2) \
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                [key, value],
            )
            .with_context(|| format!("Failed to write key: {key}"))?,
        None => conn
            .execute("DELETE FROM key_value WHERE key = ?", [key])
            .with_context(|| format!("Failed to delete key: {key}"))?,
    };
    Ok(())
}

impl CredentialStore for SqliteCredentialStore {
    fn access_token(&self) -> Option<String> {
        self.get_logged(ACCESS_TOKEN_KEY)
    }

    fn refresh_token(&self) -> Option<String> {
        self.get_logged(REFRESH_TOKEN_KEY)
    }

    fn user_id(&self) -> Option<String> {
        self.get_logged(USER_ID_KEY)
    }

    fn login(&self, access_token: &str, refresh_token: &str, user_id: Option<&str>) -> Result<()> {
        let mut conn = self.lock();
        let tx = conn.transaction().context("Failed to begin transaction")?;
        set_in(&tx, ACCESS_TOKEN_KEY, Some(access_token))?;
        set_in(&tx, REFRESH_TOKEN_KEY, Some(refresh_token))?;
        if let Some(user_id) = user_id {
            set_in(&tx, USER_ID_KEY, Some(user_id))?;
        }
        tx.commit().context("Failed to commit login")
    }

    fn logout(&self) -> Result<()> {
        let mut conn = self.lock();
        let tx = conn.transaction().context("Failed to begin transaction")?;
        set_in(&tx, ACCESS_TOKEN_KEY, None)?;
        set_in(&tx, REFRESH_TOKEN_KEY, None)?;
        set_in(&tx, USER_ID_KEY, None)?;
        tx.commit().context("Failed to commit logout")
    }
}
