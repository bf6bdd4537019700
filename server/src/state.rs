//! Shared request-handling state.
//!
//! Built once at startup and handed to the router; handlers never reach
//! for a global connection.

use std::sync::Arc;

use crate::store::TaskStore;

/// State shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn TaskStore>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Creates handler state around an already-connected store.
    #[must_use]
    pub fn new(store: Arc<dyn TaskStore>) -> Self {
        Self { store }
    }

    /// Returns the task store.
    #[must_use]
    pub fn store(&self) -> &dyn TaskStore {
        self.store.as_ref()
    }
}
