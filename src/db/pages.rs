//! Page-lock state: per-page passwords and the pages each session unlocked.

use crate::db::pool::AppStore;
use crate::errors::AppResult;
use rusqlite::{OptionalExtension, params};
use std::collections::BTreeSet;

/// Suffix of the spreadsheet endpoint that shares a page's lock.
pub const XLSX_SUFFIX: &str = "_xlsx";

pub fn xlsx_companion(page_key: &str) -> String {
    format!("{page_key}{XLSX_SUFFIX}")
}

impl AppStore {
    pub fn set_page_password(&self, page_key: &str, password: &str) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO page_passwords (page_key, page_password) VALUES (?1, ?2)
             ON CONFLICT (page_key) DO UPDATE SET page_password = excluded.page_password",
            params![page_key, password],
        )?;
        tracing::info!(page_key, "page password set");
        Ok(())
    }

    /// False when the page has no password or the password differs.
    pub fn check_page_password(&self, page_key: &str, password: &str) -> AppResult<bool> {
        let stored: Option<String> = self
            .conn
            .query_row(
                "SELECT page_password FROM page_passwords WHERE page_key = ?1",
                [page_key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(stored.is_some_and(|p| p == password))
    }

    pub fn is_page_unlocked(&self, session_id: &str, page_key: &str) -> AppResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row(
                "SELECT 1 FROM unlocked_pages WHERE session_id = ?1 AND page_key = ?2 LIMIT 1",
                params![session_id, page_key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    pub fn unlocked_pages(&self, session_id: &str) -> AppResult<BTreeSet<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT page_key FROM unlocked_pages WHERE session_id = ?1")?;
        let rows = stmt.query_map([session_id], |row| row.get::<_, String>(0))?;

        let mut out = BTreeSet::new();
        for r in rows {
            out.insert(r?);
        }
        Ok(out)
    }

    pub fn unlock_page(&self, session_id: &str, page_key: &str) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO unlocked_pages (session_id, page_key)
             SELECT ?1, ?2
             WHERE NOT EXISTS (
                 SELECT 1 FROM unlocked_pages WHERE session_id = ?1 AND page_key = ?2
             )",
            params![session_id, page_key],
        )?;
        Ok(())
    }

    pub fn lock_page(&self, session_id: &str, page_key: &str) -> AppResult<()> {
        self.conn.execute(
            "DELETE FROM unlocked_pages WHERE session_id = ?1 AND page_key = ?2",
            params![session_id, page_key],
        )?;
        Ok(())
    }

    /// Unlock a page and its spreadsheet endpoint if the password matches.
    pub fn unlock_with_password(
        &self,
        session_id: &str,
        page_key: &str,
        password: &str,
    ) -> AppResult<bool> {
        if !self.check_page_password(page_key, password)? {
            tracing::info!(session_id, page_key, "unlock refused");
            return Ok(false);
        }

        self.unlock_page(session_id, page_key)?;
        self.unlock_page(session_id, &xlsx_companion(page_key))?;
        tracing::info!(session_id, page_key, "page unlocked");
        Ok(true)
    }

    pub fn lock_with_companion(&self, session_id: &str, page_key: &str) -> AppResult<()> {
        self.lock_page(session_id, page_key)?;
        self.lock_page(session_id, &xlsx_companion(page_key))?;
        tracing::info!(session_id, page_key, "page locked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> AppStore {
        let mut store = AppStore::open_in_memory().unwrap();
        store.migrate().unwrap();
        store
    }

    fn unlocked_rows(store: &AppStore) -> i64 {
        store
            .conn
            .query_row("SELECT COUNT(*) FROM unlocked_pages", [], |r| r.get(0))
            .unwrap()
    }

    #[test]
    fn page_without_password_never_unlocks() {
        let store = store();
        assert!(!store.check_page_password("income_statements", "").unwrap());
        assert!(!store.unlock_with_password("s1", "income_statements", "x").unwrap());
        assert!(store.unlocked_pages("s1").unwrap().is_empty());
    }

    #[test]
    fn right_password_unlocks_page_and_spreadsheet() {
        let store = store();
        store.set_page_password("income_statements", "ledger").unwrap();

        assert!(!store.unlock_with_password("s1", "income_statements", "wrong").unwrap());
        assert_eq!(unlocked_rows(&store), 0);

        assert!(store.unlock_with_password("s1", "income_statements", "ledger").unwrap());
        let pages = store.unlocked_pages("s1").unwrap();
        assert!(pages.contains("income_statements"));
        assert!(pages.contains("income_statements_xlsx"));

        // other sessions stay locked
        assert!(!store.is_page_unlocked("s2", "income_statements").unwrap());
    }

    #[test]
    fn unlock_twice_keeps_one_row() {
        let store = store();
        store.unlock_page("s1", "test").unwrap();
        store.unlock_page("s1", "test").unwrap();
        assert_eq!(unlocked_rows(&store), 1);
    }

    #[test]
    fn lock_removes_both_entries() {
        let store = store();
        store.set_page_password("income_statements", "ledger").unwrap();
        store.unlock_with_password("s1", "income_statements", "ledger").unwrap();

        store.lock_with_companion("s1", "income_statements").unwrap();
        assert!(store.unlocked_pages("s1").unwrap().is_empty());
    }

    #[test]
    fn password_can_be_changed() {
        let store = store();
        store.set_page_password("p", "one").unwrap();
        store.set_page_password("p", "two").unwrap();
        assert!(!store.check_page_password("p", "one").unwrap());
        assert!(store.check_page_password("p", "two").unwrap());
    }
}
