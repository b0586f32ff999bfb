//! Key/value settings: ERP connection details and the session secret key.

use crate::db::pool::AppStore;
use crate::errors::{AppError, AppResult};
use rusqlite::{Connection, OptionalExtension, params};
use serde::Serialize;

pub const E2_HOSTNAME: &str = "e2-hostname";
pub const E2_USER: &str = "e2-user";
pub const E2_PASSWORD: &str = "e2-password";
pub const E2_DATABASE: &str = "e2-database";
pub const SECRET_KEY: &str = "secret-key";

/// Everything the ERP connector needs to open a connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct E2ConnectionInfo {
    pub hostname: String,
    pub user: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub database: String,
}

pub fn get_setting(conn: &Connection, setting_id: &str) -> rusqlite::Result<Option<String>> {
    let value: Option<Option<String>> = conn
        .query_row(
            "SELECT setting_value FROM settings WHERE setting_id = ?1",
            [setting_id],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value.flatten())
}

pub fn set_setting(conn: &Connection, setting_id: &str, setting_value: &str) -> rusqlite::Result<()> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO settings (setting_id, setting_value) VALUES (?1, ?2)
         ON CONFLICT (setting_id) DO UPDATE SET setting_value = excluded.setting_value",
    )?;
    stmt.execute(params![setting_id, setting_value])?;
    tracing::debug!(setting_id, "setting updated");
    Ok(())
}

impl AppStore {
    pub fn get_setting(&self, setting_id: &str) -> AppResult<Option<String>> {
        Ok(get_setting(&self.conn, setting_id)?)
    }

    pub fn set_setting(&self, setting_id: &str, setting_value: &str) -> AppResult<()> {
        Ok(set_setting(&self.conn, setting_id, setting_value)?)
    }

    pub fn e2_hostname(&self) -> AppResult<Option<String>> {
        self.get_setting(E2_HOSTNAME)
    }

    pub fn set_e2_hostname(&self, value: &str) -> AppResult<()> {
        self.set_setting(E2_HOSTNAME, value)
    }

    pub fn e2_user(&self) -> AppResult<Option<String>> {
        self.get_setting(E2_USER)
    }

    pub fn set_e2_user(&self, value: &str) -> AppResult<()> {
        self.set_setting(E2_USER, value)
    }

    pub fn e2_password(&self) -> AppResult<Option<String>> {
        self.get_setting(E2_PASSWORD)
    }

    pub fn set_e2_password(&self, value: &str) -> AppResult<()> {
        self.set_setting(E2_PASSWORD, value)
    }

    pub fn e2_database(&self) -> AppResult<Option<String>> {
        self.get_setting(E2_DATABASE)
    }

    pub fn set_e2_database(&self, value: &str) -> AppResult<()> {
        self.set_setting(E2_DATABASE, value)
    }

    /// True only when all four ERP connection fields hold a non-empty value.
    pub fn e2_database_configured(&self) -> AppResult<bool> {
        Ok(self.e2_connection()?.is_some())
    }

    /// Connection details for the ERP, or `None` while any field is unset or empty.
    pub fn e2_connection(&self) -> AppResult<Option<E2ConnectionInfo>> {
        let non_empty = |id: &str| -> AppResult<Option<String>> {
            Ok(self.get_setting(id)?.filter(|v| !v.is_empty()))
        };

        let (Some(hostname), Some(user), Some(password), Some(database)) = (
            non_empty(E2_HOSTNAME)?,
            non_empty(E2_USER)?,
            non_empty(E2_PASSWORD)?,
            non_empty(E2_DATABASE)?,
        ) else {
            return Ok(None);
        };

        Ok(Some(E2ConnectionInfo {
            hostname,
            user,
            password,
            database,
        }))
    }

    /// Raw bytes of the session-signing key (stored hex-encoded).
    pub fn secret_key(&self) -> AppResult<Vec<u8>> {
        let encoded = self
            .get_setting(SECRET_KEY)?
            .ok_or_else(|| AppError::SecretKey("no secret-key setting".to_string()))?;
        hex::decode(encoded.trim()).map_err(|e| AppError::SecretKey(e.to_string()))
    }

    pub fn set_secret_key(&self, key: &[u8]) -> AppResult<()> {
        self.set_setting(SECRET_KEY, &hex::encode(key))
    }
}
