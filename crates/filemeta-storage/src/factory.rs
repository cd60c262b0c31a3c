#[cfg(feature = "storage-local")]
use crate::LocalStorage;
#[cfg(feature = "storage-s3")]
use crate::S3Storage;
#[cfg(feature = "storage-supabase")]
use crate::SupabaseStorage;
use crate::{Storage, StorageBackend, StorageError, StorageResult};
use filemeta_core::Config;
use std::sync::Arc;

/// Create a storage backend based on configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    match config.storage_backend() {
        #[cfg(feature = "storage-supabase")]
        StorageBackend::Supabase => {
            let service_url = config.service_url().map(String::from).ok_or_else(|| {
                StorageError::ConfigError("SERVICE_URL not configured".to_string())
            })?;
            let service_role_key =
                config.service_role_key().map(String::from).ok_or_else(|| {
                    StorageError::ConfigError("SERVICE_ROLE_KEY not configured".to_string())
                })?;
            let timeout = std::time::Duration::from_secs(config.http_client_timeout_secs());

            let storage = SupabaseStorage::new(service_url, service_role_key, timeout)?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-supabase"))]
        StorageBackend::Supabase => Err(StorageError::ConfigError(
            "Supabase storage backend not available (storage-supabase feature not enabled)"
                .to_string(),
        )),

        #[cfg(feature = "storage-s3")]
        StorageBackend::S3 => {
            let region = config
                .s3_region()
                .map(String::from)
                .or_else(|| config.aws_region().map(String::from))
                .ok_or_else(|| {
                    StorageError::ConfigError("S3_REGION or AWS_REGION not configured".to_string())
                })?;
            let endpoint = config.s3_endpoint().map(String::from);

            let storage = S3Storage::new(region, endpoint)?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-s3"))]
        StorageBackend::S3 => Err(StorageError::ConfigError(
            "S3 storage backend not available (storage-s3 feature not enabled)".to_string(),
        )),

        #[cfg(feature = "storage-local")]
        StorageBackend::Local => {
            let base_path = config
                .local_storage_path()
                .map(String::from)
                .ok_or_else(|| {
                    StorageError::ConfigError("LOCAL_STORAGE_PATH not configured".to_string())
                })?;

            let storage = LocalStorage::new(base_path).await?;
            Ok(Arc::new(storage))
        }

        #[cfg(not(feature = "storage-local"))]
        StorageBackend::Local => Err(StorageError::ConfigError(
            "Local storage backend not available (storage-local feature not enabled)".to_string(),
        )),
    }
}

#[cfg(all(test, feature = "storage-local"))]
mod tests {
    use super::*;
    use filemeta_core::config::IngestConfig;

    #[tokio::test]
    async fn test_create_local_storage_from_config() {
        let temp = tempfile::TempDir::new().unwrap();
        let base = temp.path().to_string_lossy().to_string();
        let ingest = IngestConfig::from_lookup(|key| match key {
            "STORAGE_BACKEND" => Some("local".to_string()),
            "LOCAL_STORAGE_PATH" => Some(base.clone()),
            "DATABASE_URL" => Some("postgres://localhost/filemeta".to_string()),
            _ => None,
        })
        .unwrap();

        let storage = create_storage(&Config(Box::new(ingest))).await.unwrap();
        assert_eq!(storage.backend_type(), StorageBackend::Local);
    }
}
