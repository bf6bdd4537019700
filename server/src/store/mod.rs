//! Task storage.
//!
//! Handlers depend on the [`TaskStore`] trait; [`SqliteTaskStore`] is the
//! production backend.

/// Store implementation with `SQLite` backend.
pub mod r#impl;
/// Storage contract shared by all backends.
pub mod traits;

pub use r#impl::SqliteTaskStore;
pub use traits::{StoreError, TaskStore};

#[cfg(test)]
mod integration_tests;
