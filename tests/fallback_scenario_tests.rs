//! End-to-end: cached warranty survives a rate-limited refresh and its
//! status is derived from the cached copy.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio::sync::RwLock;
use warrity::cache::{Clock, ManualClock, TtlCache, DEFAULT_TTL};
use warrity::error::UpstreamError;
use warrity::fetch::{cache_key, Fetcher, Source};
use warrity::models::Warranty;
use warrity::{derive_status, WarrantyStatus};

fn sample_warranty() -> Warranty {
    Warranty {
        id: "123".to_string(),
        product_name: "Cordless drill".to_string(),
        manufacturer: Some("Acme".to_string()),
        purchase_date: Some("2023-02-01".to_string()),
        expiry_date: Some("2024-01-31".to_string()),
        notes: None,
    }
}

fn fetcher_at_new_year() -> (Fetcher<Warranty, ManualClock>, ManualClock) {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap());
    let cache = TtlCache::with_clock(DEFAULT_TTL, clock.clone());
    (Fetcher::new(Arc::new(RwLock::new(cache))), clock)
}

#[tokio::test]
async fn test_rate_limited_refresh_serves_cached_warranty() {
    let (fetcher, clock) = fetcher_at_new_year();
    let key = cache_key("warranty", "123", "abc");
    assert_eq!(key, "warranty_123_abc");

    fetcher.cache().write().await.set(key.clone(), sample_warranty());

    let fetched = fetcher
        .refresh(&key, || async { Err(UpstreamError::RateLimited) })
        .await
        .expect("cached copy should stand in for the rate-limited call");

    assert_eq!(fetched.source, Source::Cache);
    assert_eq!(fetched.value, sample_warranty());

    let report = derive_status(fetched.value.expiry_date.as_deref(), &clock.now());
    assert_eq!(report.status, WarrantyStatus::ExpiringSoon);
    assert_eq!(report.status.as_str(), "expiring-soon");
    assert_eq!(report.days_remaining, Some(30));
}

#[tokio::test]
async fn test_rate_limited_refresh_after_ttl_surfaces_error() {
    let (fetcher, clock) = fetcher_at_new_year();
    let key = cache_key("warranty", "123", "abc");

    fetcher.cache().write().await.set(key.clone(), sample_warranty());
    clock.advance(DEFAULT_TTL + Duration::from_secs(1));

    let err = fetcher
        .refresh(&key, || async { Err(UpstreamError::RateLimited) })
        .await
        .unwrap_err();
    assert_eq!(err, UpstreamError::RateLimited);
}

#[tokio::test]
async fn test_list_then_detail_uses_one_upstream_call() {
    let (fetcher, _) = fetcher_at_new_year();
    let key = cache_key("warranty", "123", "abc");
    let calls = AtomicUsize::new(0);

    for _ in 0..3 {
        let fetched = fetcher
            .fetch(&key, || async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(sample_warranty())
            })
            .await
            .unwrap();
        assert_eq!(fetched.value.id, "123");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[test]
fn test_views_agree_on_status() {
    let now = Utc.with_ymd_and_hms(2024, 1, 1, 18, 45, 0).unwrap();
    let warranty = sample_warranty();

    let dashboard = warranty.status_at(&now);
    let list_row = derive_status(warranty.expiry_date.as_deref(), &now);
    let detail = derive_status(Some("2024-01-31"), &now);

    assert_eq!(dashboard, list_row);
    assert_eq!(list_row, detail);
}
