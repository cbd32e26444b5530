//! Fetch Module
//!
//! Cache policy for reads against the remote warranty API: serve recent
//! responses from memory, and fall back to them while the API is
//! rate-limiting or unreachable.

mod fetcher;
mod key;

pub use fetcher::{Fetched, Fetcher, Source};
pub use key::{cache_key, TOKEN_PREFIX_LEN};
