//! Cache Entry Module
//!
//! Defines the structure for individual cache entries with TTL support.

use std::time::Duration;

use chrono::{DateTime, Utc};

// == Cache Entry ==
/// A cached payload together with the moment it was written.
///
/// Entries are owned by the cache. Callers replace them through `set`; they
/// never mutate a stored value in place.
#[derive(Debug, Clone)]
pub struct CacheEntry<T> {
    /// The stored value, opaque to the cache
    pub value: T,
    /// When the entry was written
    pub stored_at: DateTime<Utc>,
    /// How long the entry stays fresh after `stored_at`
    pub ttl: Duration,
}

impl<T> CacheEntry<T> {
    // == Constructor ==
    /// Creates an entry stamped with `now`.
    pub fn new(value: T, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            value,
            stored_at: now,
            ttl,
        }
    }

    // == Is Expired ==
    /// Checks whether the entry is stale at `now`.
    ///
    /// An entry stays valid while `now - stored_at <= ttl`, so it is still
    /// served at exactly the TTL boundary and expires one tick later. If
    /// `now` is earlier than `stored_at` (the clock went backwards) the entry
    /// counts as fresh.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        match now.signed_duration_since(self.stored_at).to_std() {
            Ok(age) => age > self.ttl,
            Err(_) => false,
        }
    }

    // == Time To Live ==
    /// Returns how long the entry has left before it goes stale.
    ///
    /// Returns `Duration::ZERO` once the entry has expired.
    pub fn ttl_remaining_at(&self, now: DateTime<Utc>) -> Duration {
        match now.signed_duration_since(self.stored_at).to_std() {
            Ok(age) => self.ttl.saturating_sub(age),
            Err(_) => self.ttl,
        }
    }
}
