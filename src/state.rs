//! Shared application state for all routes.

use std::sync::Arc;

/// Cheap to clone; the store is shared, never copied.
pub struct AppState<S> {
    pub store: Arc<S>,
}

impl<S> AppState<S> {
    pub fn new(store: S) -> Self {
        AppState { store: Arc::new(store) }
    }
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        AppState {
            store: Arc::clone(&self.store),
        }
    }
}
