//! Owned in-memory task collection
//!
//! The single copy of the task list the UI renders from. Every mutation
//! goes through a named operation that returns whatever a later revert
//! needs, and bumps a revision counter for render-layer change detection.

use tm_core::task::Task;

/// Derived display state, recomputed from the collection on demand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Completion percentage, 0 when the collection is empty
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.completed as f64 / self.total as f64 * 100.0
        }
    }
}

/// The displayed task list, newest first
#[derive(Debug, Default)]
pub struct TaskCollection {
    tasks: Vec<Task>,
    revision: u64,
}

impl TaskCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Bumped on every mutation
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn bump(&mut self) {
        self.revision += 1;
    }

    /// Replace the whole collection with server truth
    pub fn replace_all(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.bump();
    }

    /// Insert a freshly created task at the front of the list
    pub fn insert_front(&mut self, task: Task) {
        self.tasks.insert(0, task);
        self.bump();
    }

    /// Set the completion flag, returning the prior value for revert
    pub fn set_completed(&mut self, id: i64, is_completed: bool) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        let prior = task.is_completed;
        task.is_completed = is_completed;
        self.bump();
        Some(prior)
    }

    /// Set the title, returning the prior title for reference
    pub fn set_title(&mut self, id: i64, title: &str) -> Option<String> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        let prior = std::mem::replace(&mut task.title, title.to_string());
        self.bump();
        Some(prior)
    }

    /// Remove a task, returning its index and the record so a failed
    /// delete can put it back where it was
    pub fn remove(&mut self, id: i64) -> Option<(usize, Task)> {
        let index = self.tasks.iter().position(|t| t.id == id)?;
        let task = self.tasks.remove(index);
        self.bump();
        Some((index, task))
    }

    /// Re-insert a task at its prior position
    pub fn restore(&mut self, index: usize, task: Task) {
        let index = index.min(self.tasks.len());
        self.tasks.insert(index, task);
        self.bump();
    }

    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.tasks.iter().filter(|t| t.is_completed).count(),
            total: self.tasks.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn task(id: i64, title: &str, is_completed: bool) -> Task {
        Task {
            id,
            title: title.to_string(),
            is_completed,
            created_date: Utc::now(),
        }
    }

    #[test]
    fn test_mutations_bump_revision() {
        let mut collection = TaskCollection::new();
        assert_eq!(collection.revision(), 0);

        collection.replace_all(vec![task(1, "One", false)]);
        assert_eq!(collection.revision(), 1);

        collection.insert_front(task(2, "Two", false));
        assert_eq!(collection.revision(), 2);

        collection.set_completed(1, true);
        assert_eq!(collection.revision(), 3);

        // A miss mutates nothing and bumps nothing.
        collection.set_completed(99, true);
        assert_eq!(collection.revision(), 3);
    }

    #[test]
    fn test_set_completed_returns_prior_value() {
        let mut collection = TaskCollection::new();
        collection.replace_all(vec![task(1, "One", false)]);

        assert_eq!(collection.set_completed(1, true), Some(false));
        assert!(collection.get(1).unwrap().is_completed);

        assert_eq!(collection.set_completed(1, true), Some(true));
        assert_eq!(collection.set_completed(99, true), None);
    }

    #[test]
    fn test_remove_and_restore_keep_position() {
        let mut collection = TaskCollection::new();
        collection.replace_all(vec![
            task(3, "Three", false),
            task(2, "Two", false),
            task(1, "One", false),
        ]);

        let (index, removed) = collection.remove(2).unwrap();
        assert_eq!(index, 1);
        assert_eq!(collection.len(), 2);

        collection.restore(index, removed);
        let ids: Vec<i64> = collection.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_restore_clamps_index() {
        let mut collection = TaskCollection::new();
        collection.replace_all(vec![task(1, "One", false)]);

        // The collection shrank since the remove; append instead of panicking.
        collection.restore(5, task(2, "Two", false));
        let ids: Vec<i64> = collection.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_progress() {
        let mut collection = TaskCollection::new();
        assert_eq!(collection.progress().percent(), 0.0);

        collection.replace_all(vec![
            task(1, "One", true),
            task(2, "Two", false),
            task(3, "Three", true),
            task(4, "Four", false),
        ]);

        let progress = collection.progress();
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.total, 4);
        assert_eq!(progress.percent(), 50.0);
    }
}
