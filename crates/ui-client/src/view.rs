//! View-model for the task list screen
//!
//! Owns the collection and drives the optimistic mutation protocol: apply
//! locally first, then reconcile with the server response or roll back.

use std::sync::Arc;

use tm_core::task::TaskPatch;

use crate::api::TasksApi;
use crate::collection::TaskCollection;
use crate::Result;

/// Screen-level state of the task list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewPhase {
    /// Initial fetch in flight
    Loading,
    /// Initial fetch failed; a manual retry is offered
    Failed(String),
    /// Collection rendered, possibly empty
    Ready,
}

pub struct TaskView {
    api: Arc<dyn TasksApi>,
    phase: ViewPhase,
    tasks: TaskCollection,
}

impl TaskView {
    pub fn new(api: Arc<dyn TasksApi>) -> Self {
        Self {
            api,
            phase: ViewPhase::Loading,
            tasks: TaskCollection::new(),
        }
    }

    pub fn phase(&self) -> &ViewPhase {
        &self.phase
    }

    pub fn tasks(&self) -> &TaskCollection {
        &self.tasks
    }

    /// Fetch the collection and enter `Ready`, or `Failed` when the
    /// fetch errors out
    pub async fn load(&mut self) {
        match self.api.list().await {
            Ok(tasks) => {
                self.tasks.replace_all(tasks);
                self.phase = ViewPhase::Ready;
            }
            Err(e) => {
                self.phase = ViewPhase::Failed(e.to_string());
            }
        }
    }

    /// Manual retry affordance: back to `Loading`, then a fresh fetch
    pub async fn retry(&mut self) {
        self.phase = ViewPhase::Loading;
        self.load().await;
    }

    /// Create a task
    ///
    /// Not optimistic: the store assigns the id and creation timestamp, so
    /// the new task is only shown once the server record comes back, at the
    /// front of the list. Blank input is dropped without a request.
    pub async fn add(&mut self, title: &str) -> Result<()> {
        if title.trim().is_empty() {
            return Ok(());
        }
        let task = self.api.create(title).await?;
        self.tasks.insert_front(task);
        Ok(())
    }

    /// Flip the completion flag, optimistically
    ///
    /// On failure the flag flips back to its prior value.
    pub async fn toggle(&mut self, id: i64, is_completed: bool) -> Result<()> {
        let Some(prior) = self.tasks.set_completed(id, is_completed) else {
            return Ok(());
        };
        match self.api.update(id, TaskPatch::completed(is_completed)).await {
            Ok(_) => Ok(()),
            Err(e) => {
                self.tasks.set_completed(id, prior);
                Err(e)
            }
        }
    }

    /// Rename a task, optimistically
    ///
    /// On failure the whole collection is re-fetched: the prior title is
    /// not retained anywhere else, so server truth supersedes the edit.
    pub async fn edit(&mut self, id: i64, title: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(());
        }
        if self.tasks.set_title(id, title).is_none() {
            return Ok(());
        }
        match self.api.update(id, TaskPatch::title(title)).await {
            Ok(_) => Ok(()),
            Err(e) => {
                self.refresh().await;
                Err(e)
            }
        }
    }

    /// Delete a task, optimistically
    ///
    /// On failure the removed task is re-inserted at its prior position.
    pub async fn remove(&mut self, id: i64) -> Result<()> {
        let Some((index, task)) = self.tasks.remove(id) else {
            return Ok(());
        };
        match self.api.delete(id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                self.tasks.restore(index, task);
                Err(e)
            }
        }
    }

    async fn refresh(&mut self) {
        match self.api.list().await {
            Ok(tasks) => self.tasks.replace_all(tasks),
            Err(e) => self.phase = ViewPhase::Failed(e.to_string()),
        }
    }
}
