//! Runs the real server on an ephemeral port and talks to it over HTTP.

use std::net::SocketAddr;
use std::time::Duration;

use serde_json::{json, Value};
use tokio::net::TcpListener;
use warrity::api::create_router;
use warrity::cache::{TtlCache, DEFAULT_TTL};
use warrity::{spawn_cleanup_task, AppState};

async fn start_server() -> (SocketAddr, AppState) {
    let state = AppState::new(TtlCache::new(DEFAULT_TTL));
    let app = create_router(state.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, state)
}

#[tokio::test]
async fn test_health_over_http() {
    let (addr, _) = start_server().await;

    let response = reqwest::get(format!("http://{}/health", addr)).await.unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_cache_and_status_over_http() {
    let (addr, _) = start_server().await;
    let client = reqwest::Client::new();
    let warranty = json!({"id": "123", "product_name": "Drill", "expiry_date": "2024-02-01"});

    let put = client
        .put(format!("http://{}/cache", addr))
        .json(&json!({"key": "warranty_123_abc", "value": warranty}))
        .send()
        .await
        .unwrap();
    assert!(put.status().is_success());

    let cached: Value = client
        .get(format!("http://{}/cache/warranty_123_abc", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cached["value"], warranty);

    let report: Value = client
        .post(format!("http://{}/status", addr))
        .json(&json!({
            "expiry_date": cached["value"]["expiry_date"],
            "now": "2024-01-01"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(report["status"], "active");
    assert_eq!(report["days_remaining"], 31);
}

#[tokio::test]
async fn test_sweeper_runs_alongside_server() {
    let (addr, state) = start_server().await;
    let client = reqwest::Client::new();

    client
        .put(format!("http://{}/cache", addr))
        .json(&json!({"key": "brief", "value": 1, "ttl": 0}))
        .send()
        .await
        .unwrap();

    let handle = spawn_cleanup_task(state.cache.clone(), Duration::from_millis(20));
    tokio::time::sleep(Duration::from_millis(200)).await;
    handle.abort();

    let stats: Value = client
        .get(format!("http://{}/stats", addr))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(stats["total_entries"], 0);
    assert_eq!(stats["expirations"], 1);
}
