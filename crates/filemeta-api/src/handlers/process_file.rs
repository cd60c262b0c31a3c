//! Storage webhook endpoint.

use crate::constants::SUCCESS_MESSAGE;
use crate::error::IngestError;
use crate::state::AppState;
use axum::{
    body::to_bytes,
    extract::{Request, State},
    http::{Method, StatusCode},
    response::IntoResponse,
};
use filemeta_core::models::IngestionEvent;
use std::sync::Arc;

/// Handle one object-created notification.
///
/// Routed for every method so non-POST requests get a 405 from here, before
/// the body is read.
pub async fn process_file(
    State(state): State<Arc<AppState>>,
    request: Request,
) -> Result<impl IntoResponse, IngestError> {
    if request.method() != Method::POST {
        return Err(IngestError::MethodNotAllowed);
    }

    let body = to_bytes(request.into_body(), state.config.max_body_bytes())
        .await
        .map_err(|e| IngestError::Unhandled(format!("Failed to read request body: {}", e)))?;

    let payload: serde_json::Value = serde_json::from_slice(&body)?;
    let event = IngestionEvent::from_payload(&payload)?;

    state.ingest.ingest(&event).await?;

    Ok((StatusCode::OK, SUCCESS_MESSAGE))
}
