//! Health check handlers and response types.

use crate::constants::{HEALTH_CHECK_BUCKET, HEALTH_CHECK_KEY};
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

const TIMEOUT: Duration = Duration::from_secs(5);

/// Run an async check with timeout; returns status string "healthy", "timeout", or "{prefix}: {error}".
async fn run_check<F, E>(timeout: Duration, f: F, error_prefix: &str) -> String
where
    F: Future<Output = Result<(), E>>,
    E: Display,
{
    match tokio::time::timeout(timeout, f).await {
        Ok(Ok(())) => "healthy".to_string(),
        Ok(Err(e)) => format!("{}: {}", error_prefix, e),
        Err(_) => "timeout".to_string(),
    }
}

#[derive(serde::Serialize)]
pub struct HealthCheckResponse {
    pub status: String,
    pub record_store: String,
    pub storage: String,
    pub storage_backend: String,
}

/// Liveness probe - process is running.
pub async fn liveness_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "alive" })),
    )
}

/// Readiness probe - the record store answers.
pub async fn readiness_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let records = state.records.clone();
    let record_store = run_check(TIMEOUT, async move { records.ping().await }, "not_ready").await;

    if record_store == "healthy" {
        (
            StatusCode::OK,
            Json(serde_json::json!({ "status": "ready", "record_store": "ready" })),
        )
    } else {
        tracing::error!(record_store = %record_store, "Record store readiness check failed");
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "status": "not_ready", "record_store": record_store })),
        )
    }
}

/// Full health check (record store, storage).
///
/// Storage problems report as degraded without failing the check.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let records = state.records.clone();
    let record_store = run_check(TIMEOUT, async move { records.ping().await }, "unhealthy").await;

    let storage = state.storage.clone();
    let storage_status = run_check(
        TIMEOUT,
        async move {
            storage
                .exists(HEALTH_CHECK_BUCKET, HEALTH_CHECK_KEY)
                .await
                .map(drop)
        },
        "degraded",
    )
    .await;

    let overall_healthy = record_store == "healthy";
    let response = HealthCheckResponse {
        status: if overall_healthy { "healthy" } else { "unhealthy" }.to_string(),
        record_store,
        storage: storage_status,
        storage_backend: state.storage.backend_type().to_string(),
    };

    let status_code = if overall_healthy {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status_code, Json(response))
}
