//! Connection factory for the local SQLite store.
//!
//! The store is opened once at startup to run migrations, then every request
//! (or CLI command) asks the pool for its own short-lived connection.

use crate::errors::AppResult;
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a connection waits on a locked database file before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct StorePool {
    path: PathBuf,
}

impl StorePool {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Open a fresh connection to the store.
    pub fn open(&self) -> AppResult<AppStore> {
        AppStore::open(&self.path)
    }

    /// Startup step: bring the store to the latest schema.
    /// Returns the migration versions that were applied.
    pub fn init(&self) -> AppResult<Vec<i64>> {
        let mut store = self.open()?;
        store.migrate()
    }
}

/// A single connection to the local store.
pub struct AppStore {
    pub conn: Connection,
}

impl AppStore {
    pub fn open(path: &Path) -> AppResult<Self> {
        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> AppResult<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self { conn })
    }
}
