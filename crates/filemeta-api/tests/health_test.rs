//! Health probe integration tests.

mod helpers;

use helpers::setup_test_app;

#[tokio::test]
async fn test_liveness() {
    let app = setup_test_app();

    let response = app.client().get("/health/live").await;

    assert_eq!(response.status_code(), 200);
    assert_eq!(response.json::<serde_json::Value>()["status"], "alive");
}

#[tokio::test]
async fn test_readiness_follows_record_store() {
    let app = setup_test_app();

    let response = app.client().get("/health/ready").await;
    assert_eq!(response.status_code(), 200);

    app.records.set_unavailable(true);
    let response = app.client().get("/health/ready").await;
    assert_eq!(response.status_code(), 503);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "not_ready");
    assert!(body["record_store"]
        .as_str()
        .unwrap()
        .contains("connection refused"));
}

#[tokio::test]
async fn test_full_health_check() {
    let app = setup_test_app();

    let response = app.client().get("/health").await;

    assert_eq!(response.status_code(), 200);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["record_store"], "healthy");
    assert_eq!(body["storage"], "healthy");
    assert_eq!(body["storage_backend"], "local");
}
