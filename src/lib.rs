//! Warrity - warranty status derivation and a TTL response cache
//!
//! The library core is two independent pieces: [`cache::TtlCache`], a
//! lazily-expiring memo table, and [`status::derive_status`], which turns a
//! warranty end date into a lifecycle stage and day countdown. The
//! [`fetch`] module combines the cache with upstream calls, and [`api`]
//! exposes both over HTTP.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod status;
pub mod tasks;

pub use api::AppState;
pub use cache::TtlCache;
pub use config::Config;
pub use status::{derive_status, StatusReport, WarrantyStatus};
pub use tasks::spawn_cleanup_task;
