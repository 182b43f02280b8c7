//! Core library for the task manager
//!
//! This crate contains the domain model and storage layer:
//! - Task model and partial-update types
//! - The `TaskStore` trait
//! - The SQLite-backed store

pub mod error;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
