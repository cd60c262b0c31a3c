//! Route configuration and setup

use crate::constants::PROCESS_FILE_PATHS;
use crate::handlers;
use crate::middleware::request_id_middleware;
use crate::state::AppState;
use axum::{
    routing::{any, get},
    Router,
};
use filemeta_core::Config;
use std::sync::Arc;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::trace::TraceLayer;

/// Setup all application routes
pub fn setup_routes(config: &Config, state: Arc<AppState>) -> Result<Router<()>, anyhow::Error> {
    let http_concurrency_limit = config.http_concurrency_limit();
    tracing::info!(
        http_concurrency_limit = http_concurrency_limit,
        "HTTP concurrency limit layer enabled"
    );

    let mut router = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness_check))
        .route("/health/ready", get(handlers::health::readiness_check));

    // Every method reaches the handler so it can answer 405 itself. The body
    // size limit is applied there too, after the method check.
    for path in PROCESS_FILE_PATHS {
        router = router.route(path, any(handlers::process_file::process_file));
    }

    let app = router
        .layer(ConcurrencyLimitLayer::new(http_concurrency_limit))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(request_id_middleware))
        .with_state(state);

    Ok(app)
}
