use async_trait::async_trait;
use axum::{extract::Request, ServiceExt};
use server_http::{build_router, AppState};
use shared::config::Config;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;
use tubelink::{JsonFileStore, LookupService, VideoHit, VideoSearch};

struct FixedSearch {
    calls: AtomicUsize,
}

#[async_trait]
impl VideoSearch for FixedSearch {
    async fn search(&self, _query: &str) -> shared::Result<Option<VideoHit>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Some(VideoHit {
            video_id: "abc123".into(),
            thumbnail: "http://t/x.jpg".into(),
        }))
    }
}

/// Serves the router on an ephemeral port and returns its base URL
async fn spawn_server(
    cache_file: std::path::PathBuf,
    vars: &[(&str, &str)],
) -> (String, Arc<FixedSearch>) {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    let config = Config::from_vars(|name| vars.get(name).cloned());

    let store = Arc::new(JsonFileStore::load(cache_file).unwrap());
    let search = Arc::new(FixedSearch {
        calls: AtomicUsize::new(0),
    });
    let state = AppState::new(LookupService::new(store, search.clone()));
    let router = build_router(state, &config);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, ServiceExt::<Request>::into_make_service(router))
            .await
            .unwrap();
    });

    (format!("http://{}", address), search)
}

#[tokio::test]
async fn test_lookup_over_http_persists_cache() {
    let dir = tempfile::tempdir().unwrap();
    let cache_file = dir.path().join("youtube_cache.json");
    let (base, search) = spawn_server(cache_file.clone(), &[]).await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("{}/api/youtube-link", base))
        .query(&[("track", "Hey Jude"), ("artist", "The Beatles")])
        .header("Origin", "https://frontend.example")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(
        body,
        serde_json::json!({
            "url": "https://www.youtube.com/watch?v=abc123",
            "thumbnail": "http://t/x.jpg",
        })
    );
    assert_eq!(search.calls.load(Ordering::SeqCst), 1);

    let on_disk: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&cache_file).unwrap()).unwrap();
    assert!(on_disk.get("Hey Jude__The Beatles").is_some());

    let health: serde_json::Value = client
        .get(format!("{}/health", base))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health, serde_json::json!({"message": "OK", "cached_entries": 1}));
}

#[tokio::test]
async fn test_missing_params_over_http() {
    let dir = tempfile::tempdir().unwrap();
    let (base, search) = spawn_server(dir.path().join("cache.json"), &[]).await;

    let response = reqwest::get(format!("{}/api/youtube-link?track=Song", base))
        .await
        .unwrap();

    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"error": "Missing track or artist"}));
    assert_eq!(search.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_trailing_slash_is_trimmed() {
    let dir = tempfile::tempdir().unwrap();
    let (base, search) = spawn_server(dir.path().join("cache.json"), &[]).await;

    let response = reqwest::get(format!("{}/api/youtube-link/?track=a&artist=b", base))
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["url"], "https://www.youtube.com/watch?v=abc123");
    assert_eq!(search.calls.load(Ordering::SeqCst), 1);

    let health = reqwest::get(format!("{}/health/", base)).await.unwrap();
    assert_eq!(health.status(), reqwest::StatusCode::OK);
}

#[tokio::test]
async fn test_restricted_origins() {
    let dir = tempfile::tempdir().unwrap();
    let (base, _) = spawn_server(
        dir.path().join("cache.json"),
        &[("TUBELINK_ALLOWED_ORIGINS", "https://allowed.example")],
    )
    .await;
    let client = reqwest::Client::new();

    let allowed = client
        .get(format!("{}/health", base))
        .header("Origin", "https://allowed.example")
        .send()
        .await
        .unwrap();
    assert_eq!(
        allowed
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("https://allowed.example")
    );

    let denied = client
        .get(format!("{}/health", base))
        .header("Origin", "https://other.example")
        .send()
        .await
        .unwrap();
    assert!(denied.headers().get("access-control-allow-origin").is_none());
}
