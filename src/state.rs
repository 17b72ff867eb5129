//! Shared application state injected into every handler and gate.

use std::sync::Arc;

use crate::database::{MemoryStore, Store};

/// Cheap to clone; the store is shared behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }
}

impl Default for AppState {
    /// Empty in-memory store, suitable for tests.
    fn default() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }
}
