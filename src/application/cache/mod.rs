//! Time-based response cache.
//!
//! Holds the most recent successful result per request key. Freshness is
//! checked on every read against an injected [`Clock`], so [`TtlCache::sweep`]
//! only reclaims memory and is never needed for correctness.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use crate::port::outbound::clock::Clock;

/// Build a deterministic cache key from an endpoint name and its parameters.
///
/// ```
/// use coinlens::application::cache::cache_key;
///
/// assert_eq!(cache_key("chart", &["bitcoin", "usd", "7"]), "chart:bitcoin:usd:7");
/// ```
#[must_use]
pub fn cache_key(endpoint: &str, params: &[&str]) -> String {
    let mut key = String::from(endpoint);
    for param in params {
        key.push(':');
        key.push_str(param);
    }
    key
}

#[derive(Debug, Clone)]
struct Entry<V> {
    value: V,
    stored_at: DateTime<Utc>,
}

/// Concurrent key-value cache with a single freshness window.
pub struct TtlCache<V> {
    entries: DashMap<String, Entry<V>>,
    window: Duration,
    clock: Arc<dyn Clock>,
}

impl<V: Clone> TtlCache<V> {
    pub fn new(window: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: DashMap::new(),
            window,
            clock,
        }
    }

    /// Return the value stored under `key` if it is still fresh.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<V> {
        let now = self.clock.now();
        let entry = self.entries.get(key)?;
        self.is_fresh(entry.stored_at, now)
            .then(|| entry.value.clone())
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn put(&self, key: impl Into<String>, value: V) {
        let stored_at = self.clock.now();
        self.entries.insert(key.into(), Entry { value, stored_at });
    }

    /// Drop every entry that is no longer fresh. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries
            .retain(|_, entry| self.is_fresh(entry.stored_at, now));
        before.saturating_sub(self.entries.len())
    }

    /// Number of stored entries, fresh or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn is_fresh(&self, stored_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        // A clock that stepped backwards yields a negative age; treat it as zero.
        match (now - stored_at).to_std() {
            Ok(age) => age < self.window,
            Err(_) => true,
        }
    }
}

impl<V> std::fmt::Debug for TtlCache<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TtlCache")
            .field("entries", &self.entries.len())
            .field("window", &self.window)
            .finish()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use parking_lot::Mutex;

    /// Clock that only moves when told to.
    pub(crate) struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        pub(crate) fn new() -> Arc<Self> {
            Arc::new(Self(Mutex::new(Utc::now())))
        }

        pub(crate) fn advance(&self, by: Duration) {
            let mut now = self.0.lock();
            *now += chrono::Duration::from_std(by).unwrap();
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock()
        }
    }

    fn cache(clock: &Arc<ManualClock>) -> TtlCache<u32> {
        TtlCache::new(Duration::from_secs(60), clock.clone())
    }

    #[test]
    fn get_after_put_returns_value() {
        let clock = ManualClock::new();
        let cache = cache(&clock);

        cache.put("k", 7);
        clock.advance(Duration::from_secs(59));
        assert_eq!(cache.get("k"), Some(7));
    }

    #[test]
    fn entry_expires_exactly_at_window() {
        let clock = ManualClock::new();
        let cache = cache(&clock);

        cache.put("k", 7);
        clock.advance(Duration::from_secs(60));
        assert_eq!(cache.get("k"), None);
        // Still stored until swept.
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn put_overwrites_and_refreshes() {
        let clock = ManualClock::new();
        let cache = cache(&clock);

        cache.put("k", 1);
        clock.advance(Duration::from_secs(50));
        cache.put("k", 2);
        clock.advance(Duration::from_secs(50));

        assert_eq!(cache.get("k"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn sweep_removes_only_stale_entries() {
        let clock = ManualClock::new();
        let cache = cache(&clock);

        cache.put("old", 1);
        clock.advance(Duration::from_secs(45));
        cache.put("new", 2);
        clock.advance(Duration::from_secs(30));

        assert_eq!(cache.sweep(), 1);
        assert_eq!(cache.get("old"), None);
        assert_eq!(cache.get("new"), Some(2));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn missing_key_is_a_miss() {
        let clock = ManualClock::new();
        assert_eq!(cache(&clock).get("nope"), None);
    }

    #[test]
    fn cache_key_without_params_is_endpoint() {
        assert_eq!(cache_key("fx", &[]), "fx");
    }
}
