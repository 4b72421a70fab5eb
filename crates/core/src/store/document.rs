//! File-backed entry store
//!
//! Persists the whole document as one JSON blob under a fixed path, the way
//! a browser key-value slot would. The slot is assumed single-writer per
//! process; a mutex serializes load-modify-store cycles between tasks.

use super::{EntryStore, insert_new};
use crate::error::CoreResult;
use crate::types::{Entry, NewEntry, StorageData};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::warn;

pub struct DocumentStore {
    path: PathBuf,
    // Guards the read-modify-write cycle, not the file itself
    write_lock: Mutex<()>,
}

impl DocumentStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the persisted document
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the slot. A missing document is an empty store; a corrupt one
    /// is logged and treated as empty rather than surfaced.
    async fn load(&self) -> Vec<Entry> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Vec::new(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "failed to read entry document");
                return Vec::new();
            }
        };

        match serde_json::from_str::<StorageData>(&raw) {
            Ok(data) => data.entries,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "malformed entry document, treating as empty");
                Vec::new()
            }
        }
    }

    /// Overwrite the slot with the full document
    async fn save(&self, entries: Vec<Entry>) -> CoreResult<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string(&StorageData { entries })?;
        tokio::fs::write(&self.path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl EntryStore for DocumentStore {
    async fn list(&self) -> CoreResult<Vec<Entry>> {
        Ok(self.load().await)
    }

    async fn append(&self, new: NewEntry, now_ms: i64) -> CoreResult<Entry> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await;
        let entry = insert_new(&mut entries, new, now_ms);
        self.save(entries).await?;
        Ok(entry)
    }

    async fn remove(&self, id: i64) -> CoreResult<()> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load().await;
        entries.retain(|e| e.id != id);
        self.save(entries).await
    }

    async fn replace(&self, entries: Vec<Entry>) -> CoreResult<()> {
        let _guard = self.write_lock.lock().await;

        self.save(entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::store::EntryStoreTestSuite;
    use crate::types::Cookie;
    use tempfile::TempDir;

    #[tokio::test]
    async fn document_store_compliance() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::new(dir.path().join("entries.json"));
        let suite = EntryStoreTestSuite::new(store);
        suite
            .run_all_tests()
            .await
            .expect("DocumentStore should pass the store suite");
    }

    #[tokio::test]
    async fn missing_document_lists_empty() {
        let dir = TempDir::new().unwrap();
        let store = DocumentStore::new(dir.path().join("nope").join("entries.json"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn corrupt_document_is_treated_as_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entries.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let store = DocumentStore::new(&path);
        assert!(store.list().await.unwrap().is_empty());

        // The next append starts a fresh document over the corrupt slot
        let entry = store
            .append(
                NewEntry {
                    website: "X".to_string(),
                    cookies: vec![Cookie::new("a", "b")],
                    username: None,
                    password: None,
                },
                1_000,
            )
            .await
            .unwrap();
        assert_eq!(store.list().await.unwrap(), vec![entry]);
    }

    #[tokio::test]
    async fn document_survives_a_new_store_handle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entries.json");

        let store = DocumentStore::new(&path);
        store
            .append(
                NewEntry {
                    website: "X".to_string(),
                    cookies: vec![Cookie::new("a", "b")],
                    username: None,
                    password: None,
                },
                1_000,
            )
            .await
            .unwrap();

        let reopened = DocumentStore::new(&path);
        let entries = reopened.list().await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].website, "X");
    }
}
