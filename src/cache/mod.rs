//! Cache Module
//!
//! Provides an in-memory memo table with lazy TTL expiration and an
//! injectable clock.

mod clock;
mod entry;
mod stats;
mod store;


use std::time::Duration;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use stats::CacheStats;
pub use store::TtlCache;

// == Public Constants ==
/// TTL applied by `set` when no per-entry TTL is given
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Maximum allowed key length in bytes for keys arriving over HTTP
pub const MAX_KEY_LENGTH: usize = 256;
