use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::Request,
};
use kantor_server::{api::app_router, build_state, config::Config};
use tempfile::tempdir;
use tower::ServiceExt;

fn test_config(db_path: String) -> Config {
    Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path,
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        rates_base_url: "http://127.0.0.1:9".to_string(),
        rates_timeout: Duration::from_millis(200),
        rates_cache_ttl: Duration::ZERO,
    }
}

#[tokio::test]
async fn healthz_works() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path().join("test.db").to_string_lossy().to_string());
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/healthz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn openapi_document_lists_ledger_routes() {
    let tmp = tempdir().unwrap();
    let config = test_config(tmp.path().join("test.db").to_string_lossy().to_string());
    let state = build_state(&config).await.unwrap();
    let app = app_router(state, &config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), 200);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let doc: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    let paths = doc["paths"].as_object().unwrap();
    assert!(paths.contains_key("/api/v1/register"));
    assert!(paths.contains_key("/api/v1/currency-accounts/convert/{user_id}"));
}
