//! SQLite-backed task storage
//!
//! A single connection executes one statement at a time. The `isCompleted`
//! column is a 0/1 integer in the table and is decoded to `bool` on every
//! read path, so the rest of the system only ever sees a real boolean.

use std::path::Path;

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tokio::sync::Mutex;

use super::model::{Task, TaskPatch};
use super::repository::TaskStore;
use crate::{Error, Result};

const SELECT_COLUMNS: &str = "id, title, isCompleted, createdDate";

/// SQLite-backed task store
pub struct SqliteTaskStore {
    conn: Mutex<Connection>,
}

impl SqliteTaskStore {
    /// Open (or create) `tasks.db` under the given data directory
    pub fn open(data_dir: impl AsRef<Path>) -> Result<Self> {
        let data_dir = data_dir.as_ref();
        std::fs::create_dir_all(data_dir)?;
        let conn = Connection::open(data_dir.join("tasks.db"))?;
        conn.execute_batch(
            r#"
            PRAGMA journal_mode=WAL;
            PRAGMA synchronous=NORMAL;
            "#,
        )?;
        Self::with_connection(conn)
    }

    /// In-memory store, backs tests
    pub fn open_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS tasks (
              id INTEGER PRIMARY KEY AUTOINCREMENT,
              title TEXT NOT NULL,
              isCompleted INTEGER NOT NULL DEFAULT 0,
              createdDate TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn fetch(conn: &Connection, id: i64) -> Result<Option<Task>> {
        let task = conn
            .query_row(
                &format!("SELECT {SELECT_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                row_to_task,
            )
            .optional()?;
        Ok(task)
    }
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<Task> {
    let completed: i64 = row.get(2)?;
    let created: String = row.get(3)?;
    let created_date = DateTime::parse_from_rfc3339(&created)
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(3, rusqlite::types::Type::Text, Box::new(e))
        })?
        .with_timezone(&Utc);
    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        is_completed: completed != 0,
        created_date,
    })
}

#[async_trait]
impl TaskStore for SqliteTaskStore {
    async fn list(&self) -> Result<Vec<Task>> {
        let conn = self.conn.lock().await;
        // Timestamps are fixed-width RFC 3339, so text order is time order;
        // the id breaks ties between same-millisecond inserts.
        let mut stmt = conn.prepare(&format!(
            "SELECT {SELECT_COLUMNS} FROM tasks ORDER BY createdDate DESC, id DESC"
        ))?;
        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    async fn get(&self, id: i64) -> Result<Option<Task>> {
        let conn = self.conn.lock().await;
        Self::fetch(&conn, id)
    }

    async fn create(&self, title: &str) -> Result<Task> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::InvalidTitle);
        }
        // Truncate to the precision the column stores, so the returned
        // record equals what a later read will produce.
        let created_date = Utc::now().trunc_subsecs(3);
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO tasks (title, isCompleted, createdDate) VALUES (?1, 0, ?2)",
            params![
                title,
                created_date.to_rfc3339_opts(SecondsFormat::Millis, true)
            ],
        )?;
        Ok(Task {
            id: conn.last_insert_rowid(),
            title: title.to_string(),
            is_completed: false,
            created_date,
        })
    }

    async fn update(&self, id: i64, patch: TaskPatch) -> Result<Task> {
        let conn = self.conn.lock().await;
        let existing = Self::fetch(&conn, id)?.ok_or(Error::TaskNotFound(id))?;
        if patch.is_empty() {
            return Ok(existing);
        }
        if let Some(title) = &patch.title {
            conn.execute(
                "UPDATE tasks SET title = ?1 WHERE id = ?2",
                params![title, id],
            )?;
        }
        if let Some(is_completed) = patch.is_completed {
            conn.execute(
                "UPDATE tasks SET isCompleted = ?1 WHERE id = ?2",
                params![is_completed as i64, id],
            )?;
        }
        // Re-read so the caller gets exactly what was persisted.
        Self::fetch(&conn, id)?.ok_or(Error::TaskNotFound(id))
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let conn = self.conn.lock().await;
        let changes = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(changes > 0)
    }
}
