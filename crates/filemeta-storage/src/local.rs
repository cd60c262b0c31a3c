use crate::keys::validate_object_address;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// Local filesystem storage implementation
///
/// Objects live at `{base_path}/{bucket}/{object_path}`.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory holding one sub-directory per bucket
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert an object address to a filesystem path with security validation
    ///
    /// Rejects traversal sequences and any path that resolves outside the base
    /// storage directory (e.g. through a symlink).
    fn object_to_path(&self, bucket: &str, object_path: &str) -> StorageResult<PathBuf> {
        validate_object_address(bucket, object_path)?;

        let path = self.base_path.join(bucket).join(object_path);

        let base_canonical = self.base_path.canonicalize().map_err(|e| {
            StorageError::ConfigError(format!("Failed to canonicalize base path: {}", e))
        })?;

        if let Ok(canonical) = path.canonicalize() {
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Object path resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn download(&self, bucket: &str, object_path: &str) -> StorageResult<Vec<u8>> {
        let path = self.object_to_path(bucket, object_path)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(StorageError::NotFound(format!("{}/{}", bucket, object_path)));
        }

        let data = fs::read(&path).await.map_err(|e| {
            StorageError::DownloadFailed(format!("Failed to read file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            bucket = %bucket,
            object_path = %object_path,
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage download successful"
        );

        Ok(data)
    }

    async fn exists(&self, bucket: &str, object_path: &str) -> StorageResult<bool> {
        let path = self.object_to_path(bucket, object_path)?;
        Ok(fs::try_exists(&path).await?)
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
