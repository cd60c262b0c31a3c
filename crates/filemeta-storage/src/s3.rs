use crate::keys::validate_object_address;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use object_store::aws::{AmazonS3, AmazonS3Builder};
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{ObjectStoreExt, Result as ObjectResult};

/// S3 storage implementation
///
/// The webhook names the bucket on every event, so a store handle is built per
/// call from the shared region/endpoint settings.
#[derive(Clone)]
pub struct S3Storage {
    region: String,
    endpoint_url: Option<String>, // Custom endpoint for S3-compatible providers
}

impl S3Storage {
    /// Create a new S3Storage instance
    ///
    /// # Arguments
    /// * `region` - AWS region (or region identifier for S3-compatible providers)
    /// * `endpoint_url` - Optional custom endpoint URL for S3-compatible providers
    ///   (e.g., "http://localhost:9000" for MinIO)
    pub fn new(region: String, endpoint_url: Option<String>) -> StorageResult<Self> {
        let storage = S3Storage {
            region,
            endpoint_url,
        };
        // Surface credential/endpoint problems at startup rather than on the first event
        storage.store_for("startup-check")?;
        Ok(storage)
    }

    fn store_for(&self, bucket: &str) -> StorageResult<AmazonS3> {
        // Build AmazonS3 object store from environment and explicit settings.
        let mut builder = AmazonS3Builder::from_env()
            .with_region(self.region.clone())
            .with_bucket_name(bucket.to_string());

        if let Some(ref endpoint) = self.endpoint_url {
            let allow_http = endpoint.starts_with("http://");
            builder = builder
                .with_endpoint(endpoint.clone())
                .with_allow_http(allow_http);
        }

        builder
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))
    }
}

#[async_trait]
impl Storage for S3Storage {
    async fn download(&self, bucket: &str, object_path: &str) -> StorageResult<Vec<u8>> {
        validate_object_address(bucket, object_path)?;

        let store = self.store_for(bucket)?;
        let start = std::time::Instant::now();
        let location = Path::from(object_path.to_string());

        let result: ObjectResult<_> = store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => {
                StorageError::NotFound(format!("{}/{}", bucket, object_path))
            }
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %bucket,
                    object_path = %object_path,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "S3 download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        tracing::info!(
            bucket = %bucket,
            object_path = %object_path,
            size_bytes = bytes.len() as u64,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "S3 download successful"
        );

        Ok(bytes.to_vec())
    }

    async fn exists(&self, bucket: &str, object_path: &str) -> StorageResult<bool> {
        validate_object_address(bucket, object_path)?;

        let store = self.store_for(bucket)?;
        let location = Path::from(object_path.to_string());
        match store.head(&location).await {
            Ok(_) => Ok(true),
            Err(ObjectStoreError::NotFound { .. }) => Ok(false),
            Err(e) => Err(StorageError::BackendError(e.to_string())),
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::S3
    }
}
