//! Passdrop core types and entry lifecycle logic

pub mod error;
pub mod expiry;
pub mod presenter;
pub mod stats;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(any(test, feature = "tests"))]
pub mod tests;

pub use error::{CoreError, CoreResult};
pub use expiry::{ENTRY_TTL_MS, active_of, is_expired, time_remaining};
pub use presenter::{Countdown, CountdownPresenter, format_remaining, progress};
pub use stats::StoreStats;
pub use store::{EntryStore, SweepOutcome, document::DocumentStore, memory::MemoryStore, sweep};
pub use types::{Cookie, Entry, NewEntry, SameSite, StorageData};
