//! Per-entry countdown display and the one-second expiry sweep
//!
//! The presenter recomputes a human-readable remaining-time string and an
//! urgency flag for every known entry once per second. The tick is also the
//! lazy deletion path: any entry observed past its TTL is dropped from the
//! store and observers are notified through a watch channel.

use crate::error::CoreResult;
use crate::expiry::{ENTRY_TTL_MS, time_remaining};
use crate::store::{EntryStore, sweep};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error};

/// Formatted remaining time for one entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Countdown {
    /// `"Xm SSs"`, minutes without leading zero, seconds zero-padded
    pub text: String,
    /// Set below five remaining minutes, or when no timer is known yet
    pub urgent: bool,
}

impl Default for Countdown {
    fn default() -> Self {
        Self {
            text: "00m 00s".to_string(),
            urgent: true,
        }
    }
}

/// Format a remaining duration in milliseconds for display.
///
/// Negative durations (clock skew, stale state) render as the zero display
/// and are always urgent; a countdown never shows negative values.
pub fn format_remaining(ms: i64) -> Countdown {
    if ms < 0 {
        return Countdown::default();
    }

    let total_seconds = ms / 1000;
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    Countdown {
        text: format!("{minutes}m {seconds:02}s"),
        urgent: minutes < 5,
    }
}

/// Countdown progress as a percentage of the TTL, clamped to `0..=100`
pub fn progress(remaining_ms: i64, ttl_ms: i64) -> f64 {
    let pct = remaining_ms as f64 / ttl_ms as f64 * 100.0;
    pct.clamp(0.0, 100.0)
}

#[derive(Debug, Clone)]
struct TimerState {
    created_at: i64,
    countdown: Countdown,
}

struct Inner {
    store: Arc<dyn EntryStore>,
    timers: RwLock<HashMap<i64, TimerState>>,
    // Monotonic sweep counter; observers refresh whenever it changes
    changed_tx: watch::Sender<u64>,
}

impl Inner {
    /// One sweep-and-refresh cycle at the given instant. Returns whether
    /// any entry expired (and was therefore removed from the store).
    async fn tick(&self, now_ms: i64) -> CoreResult<bool> {
        let outcome = sweep(self.store.as_ref(), now_ms).await?;
        let expired_any = outcome.removed > 0;

        let mut timers = HashMap::with_capacity(outcome.active.len());
        for entry in &outcome.active {
            let remaining = time_remaining(entry.created_at, now_ms, ENTRY_TTL_MS);
            timers.insert(
                entry.id,
                TimerState {
                    created_at: entry.created_at,
                    countdown: format_remaining(remaining),
                },
            );
        }
        *self.timers.write().expect("timer map lock poisoned") = timers;

        if expired_any {
            self.changed_tx.send_modify(|n| *n += 1);
        }
        Ok(expired_any)
    }
}

/// Drives the per-second refresh over one entry store
pub struct CountdownPresenter {
    inner: Arc<Inner>,
    task: Option<JoinHandle<()>>,
}

impl CountdownPresenter {
    pub fn new(store: Arc<dyn EntryStore>) -> Self {
        let (changed_tx, _) = watch::channel(0);
        Self {
            inner: Arc::new(Inner {
                store,
                timers: RwLock::new(HashMap::new()),
                changed_tx,
            }),
            task: None,
        }
    }

    /// Subscribe to sweep notifications. The channel fires only when a tick
    /// actually removed expired entries, mirroring a storage-change event.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.inner.changed_tx.subscribe()
    }

    /// Display string and urgency for an entry; unknown ids get the zero
    /// display and are marked urgent.
    pub fn timer(&self, id: i64) -> Countdown {
        self.inner
            .timers
            .read()
            .expect("timer map lock poisoned")
            .get(&id)
            .map(|state| state.countdown.clone())
            .unwrap_or_default()
    }

    /// Countdown progress for an entry, `0.0` when the id is unknown
    pub fn entry_progress(&self, id: i64, now_ms: i64) -> f64 {
        self.inner
            .timers
            .read()
            .expect("timer map lock poisoned")
            .get(&id)
            .map_or(0.0, |state| {
                progress(
                    time_remaining(state.created_at, now_ms, ENTRY_TTL_MS),
                    ENTRY_TTL_MS,
                )
            })
    }

    /// One sweep-and-refresh cycle at the given instant
    pub async fn tick(&self, now_ms: i64) -> CoreResult<bool> {
        self.inner.tick(now_ms).await
    }

    /// Spawn the one-second cadence. Idempotent; a second call is a no-op.
    pub fn start(&mut self) {
        if self.task.is_some() {
            return;
        }

        let inner = Arc::clone(&self.inner);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            loop {
                interval.tick().await;
                match inner.tick(Utc::now().timestamp_millis()).await {
                    Ok(true) => debug!("presenter tick removed expired entries"),
                    Ok(false) => {}
                    Err(err) => error!(%err, "presenter tick failed"),
                }
            }
        });
        self.task = Some(handle);
    }

    /// Tear the timer down; no in-flight work needs cancellation beyond
    /// aborting the loop.
    pub fn shutdown(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for CountdownPresenter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryStore;
    use crate::types::{Cookie, NewEntry};

    fn cookie_entry(website: &str) -> NewEntry {
        NewEntry {
            website: website.to_string(),
            cookies: vec![Cookie::new("a", "b")],
            username: None,
            password: None,
        }
    }

    #[test]
    fn formats_minutes_and_padded_seconds() {
        let twelve_oh_five = format_remaining(725_000);
        assert_eq!(twelve_oh_five.text, "12m 05s");
        assert!(!twelve_oh_five.urgent);

        let four_ten = format_remaining(250_000);
        assert_eq!(four_ten.text, "4m 10s");
        assert!(four_ten.urgent);
    }

    #[test]
    fn negative_remaining_is_zero_and_urgent() {
        let stale = format_remaining(-500);
        assert_eq!(stale.text, "00m 00s");
        assert!(stale.urgent);
    }

    #[test]
    fn urgency_flips_below_five_minutes() {
        assert!(!format_remaining(5 * 60 * 1000).urgent);
        assert!(format_remaining(5 * 60 * 1000 - 1).urgent);
    }

    #[test]
    fn progress_is_clamped() {
        assert_eq!(progress(-500, ENTRY_TTL_MS), 0.0);
        assert_eq!(progress(2 * ENTRY_TTL_MS, ENTRY_TTL_MS), 100.0);
        let half = progress(ENTRY_TTL_MS / 2, ENTRY_TTL_MS);
        assert!((half - 50.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn tick_removes_expired_entries_and_notifies() {
        let store = Arc::new(MemoryStore::new());
        let presenter = CountdownPresenter::new(store.clone());
        let mut rx = presenter.subscribe();

        let now = 10 * ENTRY_TTL_MS;
        let entry = store.append(cookie_entry("X"), now).await.unwrap();

        // Still inside the TTL: nothing expires, no notification
        assert!(!presenter.tick(now + ENTRY_TTL_MS).await.unwrap());
        assert!(!rx.has_changed().unwrap());
        assert_eq!(presenter.timer(entry.id).text, "0m 00s");

        // One past the TTL: removed from the store, observers notified
        assert!(presenter.tick(now + ENTRY_TTL_MS + 1).await.unwrap());
        assert!(rx.has_changed().unwrap());
        assert!(store.list().await.unwrap().is_empty());
        assert_eq!(presenter.timer(entry.id), Countdown::default());
    }

    #[tokio::test]
    async fn unknown_id_gets_zero_display() {
        let presenter = CountdownPresenter::new(Arc::new(MemoryStore::new()));
        let countdown = presenter.timer(12345);
        assert_eq!(countdown.text, "00m 00s");
        assert!(countdown.urgent);
        assert_eq!(presenter.entry_progress(12345, 0), 0.0);
    }

    #[tokio::test]
    async fn tick_refreshes_display_and_progress() {
        let store = Arc::new(MemoryStore::new());
        let presenter = CountdownPresenter::new(store.clone());

        let now = 10 * ENTRY_TTL_MS;
        let entry = store.append(cookie_entry("X"), now).await.unwrap();

        let at_12m05 = now + ENTRY_TTL_MS - 725_000;
        presenter.tick(at_12m05).await.unwrap();
        assert_eq!(presenter.timer(entry.id).text, "12m 05s");
        let pct = presenter.entry_progress(entry.id, at_12m05);
        assert!((pct - 725_000.0 / ENTRY_TTL_MS as f64 * 100.0).abs() < 1e-9);

        let at_4m10 = now + ENTRY_TTL_MS - 250_000;
        presenter.tick(at_4m10).await.unwrap();
        let countdown = presenter.timer(entry.id);
        assert_eq!(countdown.text, "4m 10s");
        assert!(countdown.urgent);
    }
}
