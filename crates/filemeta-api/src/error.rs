//! HTTP error response conversion
//!
//! `IngestError` is the set of terminal failure outcomes of the process-file
//! handler. Each renders as a plain-text body with the status declared by its
//! `ErrorMetadata`, and is logged at the declared level on the way out.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use filemeta_core::models::MissingFields;
use filemeta_core::{AppError, ErrorMetadata, LogLevel};
use filemeta_storage::StorageError;

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Missing required fields in payload")]
    MissingFields(#[source] MissingFields),

    #[error("Error downloading file: {0}")]
    Download(#[source] StorageError),

    #[error("Error updating files table: {0}")]
    Update(#[source] AppError),

    #[error("Unhandled error: {0}")]
    Unhandled(String),
}

impl From<MissingFields> for IngestError {
    fn from(err: MissingFields) -> Self {
        IngestError::MissingFields(err)
    }
}

impl From<serde_json::Error> for IngestError {
    fn from(err: serde_json::Error) -> Self {
        IngestError::Unhandled(err.to_string())
    }
}

impl IngestError {
    /// Get the error type name for log fields
    pub fn error_type(&self) -> &'static str {
        match self {
            IngestError::MethodNotAllowed => "MethodNotAllowed",
            IngestError::MissingFields(_) => "MissingFields",
            IngestError::Download(_) => "Download",
            IngestError::Update(_) => "Update",
            IngestError::Unhandled(_) => "Unhandled",
        }
    }
}

impl ErrorMetadata for IngestError {
    fn http_status_code(&self) -> u16 {
        match self {
            IngestError::MethodNotAllowed => 405,
            IngestError::MissingFields(_) => 400,
            IngestError::Download(_) | IngestError::Update(_) | IngestError::Unhandled(_) => 500,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            IngestError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            IngestError::MissingFields(_) => "MISSING_FIELDS",
            IngestError::Download(_) => "DOWNLOAD_FAILED",
            IngestError::Update(_) => "UPDATE_FAILED",
            IngestError::Unhandled(_) => "UNHANDLED",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }

    fn log_level(&self) -> LogLevel {
        match self {
            IngestError::MethodNotAllowed | IngestError::MissingFields(_) => LogLevel::Debug,
            _ => LogLevel::Error,
        }
    }
}

fn log_error(error: &IngestError) {
    let error_type = error.error_type();
    let error_code = error.error_code();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = ?error, error_type, error_code, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = ?error, error_type, error_code, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type, error_code, "Request failed");
        }
    }
}

impl IntoResponse for IngestError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self);

        (status, self.client_message()).into_response()
    }
}
