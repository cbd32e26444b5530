//! Cached Fetcher
//!
//! Wraps calls to the remote API with a shared [`TtlCache`].

use std::future::Future;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::error::UpstreamError;

// == Source ==
/// Where a fetched value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Upstream,
    Cache,
}

/// A value together with its origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Fetched<T> {
    pub value: T,
    pub source: Source,
}

impl<T> Fetched<T> {
    fn upstream(value: T) -> Self {
        Self {
            value,
            source: Source::Upstream,
        }
    }

    fn cached(value: T) -> Self {
        Self {
            value,
            source: Source::Cache,
        }
    }
}

// == Fetcher ==
/// Reads through a shared cache.
///
/// The cache lock is held only around individual cache calls, never while
/// the upstream request is in flight.
#[derive(Debug)]
pub struct Fetcher<T, C = SystemClock> {
    cache: Arc<RwLock<TtlCache<T, C>>>,
}

impl<T, C> Clone for Fetcher<T, C> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
        }
    }
}

impl<T: Clone, C: Clock> Fetcher<T, C> {
    pub fn new(cache: Arc<RwLock<TtlCache<T, C>>>) -> Self {
        Self { cache }
    }

    pub fn cache(&self) -> &Arc<RwLock<TtlCache<T, C>>> {
        &self.cache
    }

    // == Cache First ==
    /// Returns a fresh cached value for `key`, or loads it with `load`.
    ///
    /// A successful load is stored before being returned. Errors from `load`
    /// are passed through untouched.
    pub async fn fetch<F, Fut>(&self, key: &str, load: F) -> Result<Fetched<T>, UpstreamError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        if let Some(value) = self.cache.write().await.get_cloned(key) {
            debug!(key = %key, "serving from cache");
            return Ok(Fetched::cached(value));
        }

        let value = load().await?;
        self.cache.write().await.set(key, value.clone());
        Ok(Fetched::upstream(value))
    }

    // == Network First ==
    /// Loads `key` with `load`, falling back to the cache on retryable errors.
    ///
    /// On success the cache is refreshed. When the upstream is rate-limiting
    /// or unreachable, a still-fresh cached copy is returned instead; with no
    /// such copy the original error is returned.
    pub async fn refresh<F, Fut>(&self, key: &str, load: F) -> Result<Fetched<T>, UpstreamError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, UpstreamError>>,
    {
        match load().await {
            Ok(value) => {
                self.cache.write().await.set(key, value.clone());
                Ok(Fetched::upstream(value))
            }
            Err(err) if err.is_retryable() => {
                match self.cache.write().await.get_cloned(key) {
                    Some(value) => {
                        warn!(key = %key, error = %err, "upstream failed, serving cached copy");
                        Ok(Fetched::cached(value))
                    }
                    None => {
                        warn!(key = %key, error = %err, "upstream failed with no cached copy");
                        Err(err)
                    }
                }
            }
            Err(err) => Err(err),
        }
    }

    /// Drops the cached copy of `key`, e.g. after the resource was edited.
    pub async fn invalidate(&self, key: &str) -> bool {
        self.cache.write().await.invalidate(key)
    }
}
