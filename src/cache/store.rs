//! Cache Store Module
//!
//! Key-value memo table with lazy, per-entry TTL expiration.

use std::collections::HashMap;
use std::time::Duration;

use tracing::trace;

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock, DEFAULT_TTL};

// == TTL Cache ==
/// A string-keyed cache whose entries expire a fixed time after being written.
///
/// Expiration is lazy: a stale entry stays in memory until a `get` or `has`
/// observes it, or until [`TtlCache::cleanup_expired`] sweeps it. The cache
/// does no locking of its own; hosts that share it across tasks wrap it in a
/// lock, and concurrent writers to one key resolve as last-write-wins.
#[derive(Debug)]
pub struct TtlCache<T, C = SystemClock> {
    entries: HashMap<String, CacheEntry<T>>,
    stats: CacheStats,
    default_ttl: Duration,
    clock: C,
}

impl<T> TtlCache<T, SystemClock> {
    // == Constructor ==
    /// Creates an empty cache reading the wall clock.
    pub fn new(default_ttl: Duration) -> Self {
        Self::with_clock(default_ttl, SystemClock)
    }
}

impl<T> Default for TtlCache<T, SystemClock> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl<T, C: Clock> TtlCache<T, C> {
    /// Creates an empty cache that reads time from `clock`.
    pub fn with_clock(default_ttl: Duration, clock: C) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            default_ttl,
            clock,
        }
    }

    // == Get ==
    /// Returns the value for `key` if it is present and still fresh.
    ///
    /// A stale entry found here is purged and reported as absent.
    pub fn get(&mut self, key: &str) -> Option<&T> {
        if self.purge_if_stale(key) {
            self.stats.record_hit();
            self.entries.get(key).map(|entry| &entry.value)
        } else {
            self.stats.record_miss();
            None
        }
    }

    // == Set ==
    /// Stores `value` under `key` with the default TTL, replacing any prior entry.
    pub fn set(&mut self, key: impl Into<String>, value: T) {
        let ttl = self.default_ttl;
        self.set_with_ttl(key, value, ttl);
    }

    /// Stores `value` under `key` with its own TTL.
    pub fn set_with_ttl(&mut self, key: impl Into<String>, value: T, ttl: Duration) {
        let key = key.into();
        let entry = CacheEntry::new(value, self.clock.now(), ttl);
        trace!(key = %key, ttl_ms = ttl.as_millis() as u64, "cache set");
        self.entries.insert(key, entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Has ==
    /// Reports whether `key` holds a fresh entry, purging it if stale.
    ///
    /// Has the same freshness rules and side effects as [`TtlCache::get`]
    /// but does not count towards hit/miss statistics.
    pub fn has(&mut self, key: &str) -> bool {
        self.purge_if_stale(key)
    }

    // == Invalidate ==
    /// Removes the entry for `key`. Returns whether anything was removed.
    pub fn invalidate(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            trace!(key = %key, "cache invalidate");
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }

    // == Clear ==
    /// Removes every entry. Returns how many were dropped.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        self.stats.set_total_entries(0);
        count
    }

    // == Cleanup Expired ==
    /// Removes all stale entries in one pass.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = self.clock.now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    /// Returns how long the entry for `key` stays fresh, without purging it.
    pub fn ttl_remaining(&self, key: &str) -> Option<Duration> {
        let now = self.clock.now();
        self.entries
            .get(key)
            .filter(|entry| !entry.is_expired_at(now))
            .map(|entry| entry.ttl_remaining_at(now))
    }

    // == Stats ==
    /// Returns a snapshot of the cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    /// Number of entries physically held, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Returns true if `key` holds a fresh entry; drops it if it is stale.
    fn purge_if_stale(&mut self, key: &str) -> bool {
        let now = self.clock.now();
        match self.entries.get(key).map(|entry| entry.is_expired_at(now)) {
            Some(false) => true,
            Some(true) => {
                self.entries.remove(key);
                self.stats.record_expirations(1);
                self.stats.set_total_entries(self.entries.len());
                trace!(key = %key, "cache entry expired");
                false
            }
            None => false,
        }
    }
}

impl<T: Clone, C: Clock> TtlCache<T, C> {
    /// Like [`TtlCache::get`] but returns an owned copy of the value.
    pub fn get_cloned(&mut self, key: &str) -> Option<T> {
        self.get(key).cloned()
    }
}
