use filemeta_core::config::RecordStoreBackend;
use filemeta_core::models::{FileRecord, FileRecordUpdate};
use filemeta_core::{AppError, Config};
use sqlx::PgPool;
use std::sync::Arc;

mod postgres;
#[cfg(feature = "rest")]
mod rest;

pub use postgres::PostgresFileRepository;
#[cfg(feature = "rest")]
pub use rest::RestFileRepository;

/// Trait for `files` record operations
/// This abstracts the backend (direct Postgres or PostgREST)
#[async_trait::async_trait]
pub trait FileRecordStore: Send + Sync {
    /// Write `update` to the row whose `storage_object_id` matches.
    ///
    /// Returns `AppError::NotFound` when no row matches.
    async fn update_file_metadata(
        &self,
        storage_object_id: &str,
        update: &FileRecordUpdate,
    ) -> Result<FileRecord, AppError>;

    /// Cheap round trip used by readiness checks
    async fn ping(&self) -> Result<(), AppError>;
}

/// Create the record store selected by configuration
///
/// `pool` must be provided when `DATABASE_URL` is configured.
pub fn create_file_record_store(
    config: &Config,
    pool: Option<PgPool>,
) -> Result<Arc<dyn FileRecordStore>, AppError> {
    match config.record_store_backend() {
        RecordStoreBackend::Postgres => {
            let pool = pool.ok_or_else(|| {
                AppError::Internal("Postgres record store requires a connection pool".to_string())
            })?;
            tracing::info!("Initializing PostgreSQL files repository");
            Ok(Arc::new(PostgresFileRepository::new(pool)))
        }
        #[cfg(feature = "rest")]
        RecordStoreBackend::Rest => {
            let service_url = config.service_url().ok_or_else(|| {
                AppError::Internal("SERVICE_URL not configured".to_string())
            })?;
            let service_role_key = config.service_role_key().ok_or_else(|| {
                AppError::Internal("SERVICE_ROLE_KEY not configured".to_string())
            })?;
            tracing::info!("Initializing REST files repository");
            let repo = RestFileRepository::new(
                service_url.to_string(),
                service_role_key.to_string(),
                std::time::Duration::from_secs(config.http_client_timeout_secs()),
            )?;
            Ok(Arc::new(repo))
        }
        #[cfg(not(feature = "rest"))]
        RecordStoreBackend::Rest => Err(AppError::Internal(
            "REST record store not available (rest feature not enabled)".to_string(),
        )),
    }
}
