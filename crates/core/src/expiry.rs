//! Pure time-to-live filtering over entries
//!
//! Every function here takes the current time as an argument so expiry
//! decisions stay deterministic under test. Nothing in this module touches
//! a store.

use crate::types::Entry;

/// Fixed one-hour time-to-live, in milliseconds. Not runtime-configurable.
pub const ENTRY_TTL_MS: i64 = 3_600_000;

/// The subsequence of entries whose age has not exceeded `ttl_ms`, order
/// preserved. An entry exactly at TTL age is still active.
pub fn active_of(entries: &[Entry], now_ms: i64, ttl_ms: i64) -> Vec<Entry> {
    entries
        .iter()
        .filter(|e| now_ms - e.created_at <= ttl_ms)
        .cloned()
        .collect()
}

/// Strict counterpart of [`active_of`]: true once age exceeds the TTL.
pub fn is_expired(entry: &Entry, now_ms: i64, ttl_ms: i64) -> bool {
    now_ms - entry.created_at > ttl_ms
}

/// Remaining lifetime in milliseconds; negative once expired.
pub fn time_remaining(created_at: i64, now_ms: i64, ttl_ms: i64) -> i64 {
    ttl_ms - (now_ms - created_at)
}
