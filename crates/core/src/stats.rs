//! Summary counters over the active set

use crate::types::Entry;
use serde::{Deserialize, Serialize};

/// Headline numbers for an entry sequence
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    /// Number of entries in the sequence
    pub active_entries: usize,
    /// Total cookies across all entries
    pub total_cookies: usize,
    /// Entries carrying a username/password pair
    pub credential_entries: usize,
}

impl StoreStats {
    /// Summarize a sequence of entries (callers pass the active set)
    pub fn summarize(entries: &[Entry]) -> Self {
        Self {
            active_entries: entries.len(),
            total_cookies: entries.iter().map(|e| e.cookies.len()).sum(),
            credential_entries: entries.iter().filter(|e| e.has_credentials()).count(),
        }
    }
}
