//! In-process entry store
//!
//! Backs the mirrored API surface and tests. State lives in a mutex-guarded
//! document and disappears with the process.

use super::{EntryStore, insert_new};
use crate::error::CoreResult;
use crate::types::{Entry, NewEntry};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<Vec<Entry>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with the given document, for tests
    pub fn with_entries(entries: Vec<Entry>) -> Self {
        Self {
            entries: Arc::new(Mutex::new(entries)),
        }
    }
}

#[async_trait]
impl EntryStore for MemoryStore {
    async fn list(&self) -> CoreResult<Vec<Entry>> {
        Ok(self.entries.lock().await.clone())
    }

    async fn append(&self, new: NewEntry, now_ms: i64) -> CoreResult<Entry> {
        let mut entries = self.entries.lock().await;
        Ok(insert_new(&mut entries, new, now_ms))
    }

    async fn remove(&self, id: i64) -> CoreResult<()> {
        self.entries.lock().await.retain(|e| e.id != id);
        Ok(())
    }

    async fn replace(&self, entries: Vec<Entry>) -> CoreResult<()> {
        *self.entries.lock().await = entries;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::store::EntryStoreTestSuite;

    #[tokio::test]
    async fn memory_store_compliance() {
        let suite = EntryStoreTestSuite::new(MemoryStore::new());
        suite
            .run_all_tests()
            .await
            .expect("MemoryStore should pass the store suite");
    }
}
