//! Entry store contract and backends
//!
//! A store holds one ordered document of entries, newest-first. Every
//! mutation rewrites the whole document; there are no partial updates.

use crate::error::CoreResult;
use crate::expiry::{ENTRY_TTL_MS, is_expired};
use crate::types::{Entry, NewEntry};
use async_trait::async_trait;
use tracing::debug;

pub mod document;
pub mod memory;

#[async_trait]
pub trait EntryStore: Send + Sync {
    /// All persisted entries, insertion order preserved. Missing or corrupt
    /// state yields an empty sequence, never an error.
    async fn list(&self) -> CoreResult<Vec<Entry>>;

    /// Assign an identity from `now_ms`, insert at the front, persist the
    /// full document and return the stored entry.
    async fn append(&self, new: NewEntry, now_ms: i64) -> CoreResult<Entry>;

    /// Persist the document with the matching identity filtered out;
    /// a no-op when the identity is unknown.
    async fn remove(&self, id: i64) -> CoreResult<()>;

    /// Persist the given sequence verbatim, dropping whatever was stored.
    async fn replace(&self, entries: Vec<Entry>) -> CoreResult<()>;
}

/// Build the stored entry and front-insert it into the document.
///
/// Identity is the creation time in milliseconds; if that value is already
/// taken within the document the candidate is bumped until unused, so every
/// append yields a previously-unseen id.
pub(crate) fn insert_new(entries: &mut Vec<Entry>, new: NewEntry, now_ms: i64) -> Entry {
    let mut id = now_ms;
    while entries.iter().any(|e| e.id == id) {
        id += 1;
    }

    let entry = Entry {
        id,
        website: new.website,
        cookies: new.cookies,
        username: new.username,
        password: new.password,
        created_at: now_ms,
    };
    entries.insert(0, entry.clone());
    entry
}

/// Result of one compaction pass over a store
#[derive(Debug, Clone)]
pub struct SweepOutcome {
    /// The active sequence after compaction
    pub active: Vec<Entry>,
    /// How many expired entries were dropped
    pub removed: usize,
}

/// Explicit compaction: drop expired entries from the store and return the
/// active sequence. Persists only when something actually expired, so a
/// sweep over a fresh document is read-only.
pub async fn sweep(store: &dyn EntryStore, now_ms: i64) -> CoreResult<SweepOutcome> {
    let entries = store.list().await?;
    let before = entries.len();
    let active: Vec<Entry> = entries
        .into_iter()
        .filter(|e| !is_expired(e, now_ms, ENTRY_TTL_MS))
        .collect();

    let removed = before - active.len();
    if removed > 0 {
        debug!(removed, remaining = active.len(), "sweeping expired entries");
        store.replace(active.clone()).await?;
    }
    Ok(SweepOutcome { active, removed })
}
