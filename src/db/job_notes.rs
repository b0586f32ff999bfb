use crate::db::pool::AppStore;
use crate::errors::AppResult;
use rusqlite::{OptionalExtension, params};
use std::collections::BTreeMap;

impl AppStore {
    /// Notes attached to a job, empty when none were saved.
    pub fn job_notes_get(&self, job_number: &str) -> AppResult<String> {
        let notes: Option<Option<String>> = self
            .conn
            .query_row(
                "SELECT notes FROM job_notes WHERE job_number = ?1",
                [job_number],
                |row| row.get(0),
            )
            .optional()?;
        Ok(notes.flatten().unwrap_or_default())
    }

    pub fn job_notes_list(&self) -> AppResult<BTreeMap<String, String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT job_number, notes FROM job_notes ORDER BY job_number")?;
        let rows = stmt.query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            ))
        })?;

        let mut out = BTreeMap::new();
        for r in rows {
            let (job, notes) = r?;
            out.insert(job, notes);
        }
        Ok(out)
    }

    pub fn job_notes_update(&self, job_number: &str, notes: &str) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO job_notes (job_number, notes) VALUES (?1, ?2)
             ON CONFLICT (job_number) DO UPDATE SET notes = excluded.notes",
            params![job_number, notes],
        )?;
        Ok(())
    }

    pub fn job_notes_delete(&self, job_number: &str) -> AppResult<()> {
        self.conn
            .execute("DELETE FROM job_notes WHERE job_number = ?1", [job_number])?;
        Ok(())
    }

    /// Save notes from the in-place editor: empty text removes the row.
    pub fn save_job_notes(&self, job_number: &str, notes: &str) -> AppResult<()> {
        if notes.is_empty() {
            tracing::debug!(job_number, "clearing job notes");
            self.job_notes_delete(job_number)
        } else {
            tracing::debug!(job_number, "saving job notes");
            self.job_notes_update(job_number, notes)
        }
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

    #[test]
    fn save_then_overwrite() {
        let store = store();
        store.save_job_notes("12345", "waiting on material").unwrap();
        store.save_job_notes("12345", "material in, running").unwrap();

        assert_eq!(store.job_notes_get("12345").unwrap(), "material in, running");
        assert_eq!(store.job_notes_list().unwrap().len(), 1);
    }

    #[test]
    fn empty_notes_delete_the_row() {
        let store = store();
        store.save_job_notes("12345", "hold").unwrap();
        store.save_job_notes("12345", "").unwrap();

        assert_eq!(store.job_notes_get("12345").unwrap(), "");
        assert!(store.job_notes_list().unwrap().is_empty());
    }

    #[test]
    fn list_is_keyed_by_job_number() {
        let store = store();
        store.save_job_notes("B-2", "second").unwrap();
        store.save_job_notes("A-1", "first").unwrap();

        let notes = store.job_notes_list().unwrap();
        let keys: Vec<_> = notes.keys().cloned().collect();
        assert_eq!(keys, vec!["A-1", "B-2"]);
        assert_eq!(notes["A-1"], "first");
    }

    #[test]
    fn unknown_job_has_empty_notes() {
        assert_eq!(store().job_notes_get("none").unwrap(), "");
    }
}
