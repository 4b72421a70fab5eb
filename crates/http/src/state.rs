//! Application state management

use passdrop_core::EntryStore;
use std::sync::Arc;

/// Shared application state
///
/// Carries the entry store this API surface owns. The store is deliberately
/// separate from any other store in the process; the two are never
/// reconciled.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        Self { store }
    }
}
