//! Client-side state layer for the task manager UI
//!
//! This crate contains everything the rendering shell needs behind it:
//! - A typed HTTP client for the task API
//! - The owned in-memory task collection
//! - The view-model driving optimistic updates and reconciliation

pub mod api;
pub mod collection;
pub mod error;
pub mod view;

pub use api::{HttpTasksApi, TasksApi};
pub use collection::{Progress, TaskCollection};
pub use error::ApiError;
pub use view::{TaskView, ViewPhase};

pub type Result<T> = std::result::Result<T, ApiError>;
