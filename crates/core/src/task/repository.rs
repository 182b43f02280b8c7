//! Task storage trait
//!
//! Defines the interface for task CRUD operations.

use async_trait::async_trait;

use super::model::{Task, TaskPatch};
use crate::Result;

/// Storage interface for task CRUD operations
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Get all tasks, newest first
    async fn list(&self) -> Result<Vec<Task>>;

    /// Get a task by ID
    async fn get(&self, id: i64) -> Result<Option<Task>>;

    /// Create a new task from a title
    ///
    /// The title is trimmed and must be non-empty afterwards. The store
    /// assigns the id and creation timestamp.
    async fn create(&self, title: &str) -> Result<Task>;

    /// Apply a partial update to an existing task
    ///
    /// An empty patch is a no-op that still returns the current record.
    async fn update(&self, id: i64, patch: TaskPatch) -> Result<Task>;

    /// Delete a task by ID
    ///
    /// Returns `true` if a record was removed, `false` if the id was absent.
    async fn delete(&self, id: i64) -> Result<bool>;
}
