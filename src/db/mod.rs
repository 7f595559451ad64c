//! SQLite persistence.
//!
//! One database file holds two unrelated tables: `local_store`, the key/value
//! store behind local-first progress, and `remote_progress`, the records of the
//! bundled progress service.

mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::Result;
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use crate::models::*;
use crate::progress::LocalStore;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// `{data_dir}/parent-planner/planner.db` on the current platform.
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "parent-planner")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("planner.db"))
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    // ============================================================
    // Local key/value store
    // ============================================================

    pub fn get_value(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let value = conn
            .query_row(
                "SELECT value FROM local_store WHERE key = ?",
                [key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    pub fn set_value(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        conn.execute(
            "INSERT INTO local_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            (key, value, Utc::now().to_rfc3339()),
        )?;
        Ok(())
    }

    pub fn remove_value(&self, key: &str) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM local_store WHERE key = ?", [key])?;
        Ok(rows > 0)
    }

    // ============================================================
    // Remote progress records
    // ============================================================

    /// Insert or replace the record for `checklist_id`. Last write wins.
    pub fn upsert_progress(
        &self,
        checklist_id: &str,
        input: UpsertProgressInput,
    ) -> Result<ChecklistProgress> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let now = Utc::now();

        conn.execute(
            "INSERT INTO remote_progress (checklist_id, email, user_id, completed_items, progress_data, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(checklist_id) DO UPDATE SET
                email = COALESCE(excluded.email, remote_progress.email),
                user_id = COALESCE(excluded.user_id, remote_progress.user_id),
                completed_items = excluded.completed_items,
                progress_data = excluded.progress_data,
                updated_at = excluded.updated_at",
            (
                checklist_id,
                &input.email,
                &input.user_id,
                serde_json::to_string(&input.completed_items)?,
                serde_json::to_string(&input.progress_data)?,
                now.to_rfc3339(),
            ),
        )?;

        Ok(ChecklistProgress {
            checklist_id: checklist_id.to_string(),
            completed_items: input.completed_items,
            progress_data: input.progress_data,
        })
    }

    /// Most recent record for the checklist, optionally narrowed to an email or user id.
    pub fn find_progress(&self, query: &ProgressQuery) -> Result<Option<ChecklistProgress>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let mut stmt = conn.prepare(
            "SELECT checklist_id, completed_items, progress_data
             FROM remote_progress
             WHERE checklist_id = ?1
               AND ((?2 IS NULL AND ?3 IS NULL) OR email = ?2 OR user_id = ?3)
             ORDER BY updated_at DESC
             LIMIT 1",
        )?;

        let mut rows = stmt.query((&query.checklist_id, &query.email, &query.user_id))?;
        if let Some(row) = rows.next()? {
            let completed_json: String = row.get(1)?;
            let data_json: String = row.get(2)?;
            Ok(Some(ChecklistProgress {
                checklist_id: row.get(0)?,
                completed_items: serde_json::from_str(&completed_json)?,
                progress_data: serde_json::from_str(&data_json)?,
            }))
        } else {
            Ok(None)
        }
    }
}

impl LocalStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.get_value(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.set_value(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.remove_value(key).map(|_| ())
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: self.conn.clone(),
        }
    }
}
