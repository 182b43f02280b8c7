//! Application state

use std::path::PathBuf;
use std::sync::Arc;

use tm_core::task::SqliteTaskStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pub task_store: SqliteTaskStore,
}

impl AppState {
    /// Create a new AppState with the given data directory
    pub fn new(data_dir: PathBuf) -> tm_core::Result<Self> {
        let task_store = SqliteTaskStore::open(data_dir)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { task_store }),
        })
    }

    /// Get reference to the task store
    pub fn task_store(&self) -> &SqliteTaskStore {
        &self.inner.task_store
    }
}
