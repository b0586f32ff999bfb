//! Forward-only schema migrations for the local store.
//!
//! `schema_versions` is an append-only log; the current version is the
//! highest number recorded there (0 when the table does not exist yet).
//! New migrations go at the END of `MIGRATIONS`. Never edit a body that has
//! already shipped: installed stores will not run it again.

use crate::db::pool::AppStore;
use crate::db::settings;
use crate::errors::{AppError, AppResult};
use chrono::Utc;
use rand::RngCore;
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

/// Size of the generated session-signing key.
pub const SECRET_KEY_BYTES: usize = 32;

pub struct Migration {
    pub version: i64,
    pub description: &'static str,
    apply: fn(&Connection) -> rusqlite::Result<()>,
}

pub static MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "schema_versions and settings tables, secret key",
        apply: create_settings,
    },
    Migration {
        version: 2,
        description: "job_notes table",
        apply: create_job_notes,
    },
    Migration {
        version: 3,
        description: "page_passwords and unlocked_pages tables",
        apply: create_page_lock_tables,
    },
];

/// One row of the `schema_versions` log.
#[derive(Debug, Clone, Serialize)]
pub struct AppliedMigration {
    pub version: i64,
    pub migrated_at: Option<String>,
}

fn create_settings(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE schema_versions (
            schema_version      INTEGER PRIMARY KEY,
            migration_timestamp TIMESTAMP
        );

        CREATE TABLE settings (
            setting_id    TEXT PRIMARY KEY,
            setting_value TEXT
        );
        "#,
    )?;

    let mut key = [0u8; SECRET_KEY_BYTES];
    rand::thread_rng().fill_bytes(&mut key);
    settings::set_setting(conn, settings::SECRET_KEY, &hex::encode(key))
}

fn create_job_notes(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE job_notes (
            job_number TEXT PRIMARY KEY,
            notes      TEXT
        );
        "#,
    )
}

fn create_page_lock_tables(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE page_passwords (
            page_key      TEXT PRIMARY KEY,
            page_password TEXT NOT NULL
        );

        CREATE TABLE unlocked_pages (
            session_id TEXT,
            page_key   TEXT
        );
        "#,
    )
}

pub fn latest_version() -> i64 {
    MIGRATIONS.last().map(|m| m.version).unwrap_or(0)
}

pub fn table_exists(conn: &Connection, table: &str) -> rusqlite::Result<bool> {
    let mut stmt = conn.prepare("SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1")?;
    let exists: Option<String> = stmt.query_row([table], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Highest recorded schema version, 0 for a brand new store.
pub fn current_version(conn: &Connection) -> rusqlite::Result<i64> {
    if !table_exists(conn, "schema_versions")? {
        return Ok(0);
    }

    let version: Option<i64> = conn.query_row(
        "SELECT MAX(schema_version) FROM schema_versions",
        [],
        |row| row.get(0),
    )?;

    Ok(version.unwrap_or(0))
}

fn add_schema_version(conn: &Connection, version: i64) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO schema_versions (schema_version, migration_timestamp) VALUES (?1, ?2)",
        params![version, Utc::now().to_rfc3339()],
    )?;
    Ok(())
}

pub fn applied_migrations(conn: &Connection) -> rusqlite::Result<Vec<AppliedMigration>> {
    if !table_exists(conn, "schema_versions")? {
        return Ok(Vec::new());
    }

    let mut stmt = conn.prepare(
        "SELECT schema_version, migration_timestamp FROM schema_versions ORDER BY schema_version",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(AppliedMigration {
            version: row.get(0)?,
            migrated_at: row.get(1)?,
        })
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Apply every migration newer than the current version, in order.
///
/// Each migration body and its `schema_versions` row commit together, so a
/// failure leaves the store at the last fully applied version.
pub fn run_pending_migrations(conn: &mut Connection) -> AppResult<Vec<i64>> {
    let current = current_version(conn)?;
    let latest = latest_version();
    tracing::info!(current, latest, "database schema version is {current}");

    if current > latest {
        tracing::warn!(
            current,
            latest,
            "database schema is newer than this build knows about; nothing to migrate"
        );
        return Ok(Vec::new());
    }

    let mut applied = Vec::new();

    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        let version = migration.version;
        tracing::info!(version, "migrating database to schema version {version}: {}", migration.description);

        let fail = |source: rusqlite::Error| AppError::Migration { version, source };

        let tx = conn.transaction().map_err(fail)?;
        (migration.apply)(&tx).map_err(fail)?;
        add_schema_version(&tx, version).map_err(fail)?;
        tx.commit().map_err(fail)?;

        applied.push(version);
    }

    if applied.is_empty() {
        tracing::debug!("database schema is up to date");
    }

    Ok(applied)
}

impl AppStore {
    pub fn current_version(&self) -> AppResult<i64> {
        Ok(current_version(&self.conn)?)
    }

    /// Bring the store up to the latest schema version.
    pub fn migrate(&mut self) -> AppResult<Vec<i64>> {
        run_pending_migrations(&mut self.conn)
    }

    pub fn applied_migrations(&self) -> AppResult<Vec<AppliedMigration>> {
        Ok(applied_migrations(&self.conn)?)
    }

    pub fn table_exists(&self, table: &str) -> AppResult<bool> {
        Ok(table_exists(&self.conn, table)?)
    }
}
