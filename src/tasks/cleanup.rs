//! TTL Cleanup Task
//!
//! Background sweeper that drops expired cache entries nobody has read.
//! Expiry is lazy on access, so this only bounds memory held by idle keys.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::{Clock, TtlCache};

/// Spawns a task that calls [`TtlCache::cleanup_expired`] every `interval`.
///
/// The write lock is held only for the sweep itself. The returned handle is
/// aborted during graceful shutdown.
pub fn spawn_cleanup_task<T, C>(cache: Arc<RwLock<TtlCache<T, C>>>, interval: Duration) -> JoinHandle<()>
where
    T: Send + Sync + 'static,
    C: Clock + Send + Sync + 'static,
{
    tokio::spawn(async move {
        info!(interval_ms = interval.as_millis() as u64, "starting TTL cleanup task");

        loop {
            tokio::time::sleep(interval).await;

            let removed = cache.write().await.cleanup_expired();

            if removed > 0 {
                info!(removed, "TTL cleanup removed expired entries");
            } else {
                debug!("TTL cleanup: no expired entries found");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ManualClock;
    use chrono::{TimeZone, Utc};

    fn shared_cache() -> (Arc<RwLock<TtlCache<String, ManualClock>>>, ManualClock) {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        let cache = TtlCache::with_clock(Duration::from_secs(60), clock.clone());
        (Arc::new(RwLock::new(cache)), clock)
    }

    #[tokio::test]
    async fn test_cleanup_task_removes_expired_entries() {
        let (cache, clock) = shared_cache();
        cache
            .write()
            .await
            .set_with_ttl("expire_soon", "value".to_string(), Duration::from_secs(1));
        clock.advance(Duration::from_secs(5));

        let handle = spawn_cleanup_task(cache.clone(), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(200)).await;

        assert_eq!(cache.read().await.len(), 0, "expired entry should be swept");
        assert_eq!(cache.read().await.stats().expirations, 1);

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_preserves_valid_entries() {
        let (cache, _) = shared_cache();
        cache.write().await.set("long_lived", "value".to_string());

        let handle = spawn_cleanup_task(cache.clone(), Duration::from_millis(20));
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(
            cache.write().await.get_cloned("long_lived"),
            Some("value".to_string())
        );

        handle.abort();
    }

    #[tokio::test]
    async fn test_cleanup_task_can_be_aborted() {
        let (cache, _) = shared_cache();

        let handle = spawn_cleanup_task(cache, Duration::from_secs(1));
        handle.abort();

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert!(handle.is_finished(), "Task should be finished after abort");
    }
}
