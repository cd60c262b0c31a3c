use crate::keys::{encode_object_path, validate_object_address};
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Hosted object storage reached over its HTTP object API
///
/// Objects are fetched from `{service_url}/storage/v1/object/{bucket}/{path}`
/// with the service role key as both bearer token and `apikey` header.
#[derive(Clone)]
pub struct SupabaseStorage {
    client: Client,
    service_url: String,
    service_role_key: String,
}

impl SupabaseStorage {
    /// Create a new SupabaseStorage instance
    ///
    /// # Arguments
    /// * `service_url` - Project base URL (e.g., "https://xyz.supabase.co")
    /// * `service_role_key` - Privileged key allowed to read every bucket
    /// * `timeout` - Per-request timeout for the underlying HTTP client
    pub fn new(
        service_url: String,
        service_role_key: String,
        timeout: Duration,
    ) -> StorageResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| StorageError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(SupabaseStorage {
            client,
            service_url: service_url.trim_end_matches('/').to_string(),
            service_role_key,
        })
    }

    fn object_url(&self, bucket: &str, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.service_url,
            urlencoding::encode(bucket),
            encode_object_path(object_path)
        )
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.service_role_key))
            .header("apikey", self.service_role_key.as_str())
    }
}

/// Pull the human-readable message out of an error body.
///
/// The object API answers with `{"statusCode","error","message"}`; anything
/// else is returned as raw text.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "error"] {
            if let Some(message) = value.get(key).and_then(|v| v.as_str()) {
                if !message.is_empty() {
                    return message.to_string();
                }
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("request failed with status {}", status)
    } else {
        trimmed.to_string()
    }
}

/// The object API reports missing objects as 404, or as 400 with a 404 payload.
fn is_not_found(status: StatusCode, body: &str) -> bool {
    if status == StatusCode::NOT_FOUND {
        return true;
    }
    if status != StatusCode::BAD_REQUEST {
        return false;
    }
    serde_json::from_str::<serde_json::Value>(body)
        .map(|value| {
            value.get("statusCode").and_then(|v| v.as_str()) == Some("404")
                || value.get("error").and_then(|v| v.as_str()) == Some("not_found")
        })
        .unwrap_or(false)
}

#[async_trait]
impl Storage for SupabaseStorage {
    async fn download(&self, bucket: &str, object_path: &str) -> StorageResult<Vec<u8>> {
        validate_object_address(bucket, object_path)?;

        let start = std::time::Instant::now();
        let url = self.object_url(bucket, object_path);

        let response = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    bucket = %bucket,
                    object_path = %object_path,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Object API request failed"
                );
                StorageError::BackendError(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);

            if is_not_found(status, &body) {
                return Err(StorageError::NotFound(format!(
                    "{}/{}: {}",
                    bucket, object_path, message
                )));
            }

            tracing::error!(
                status = %status,
                bucket = %bucket,
                object_path = %object_path,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "Object API download failed"
            );
            return Err(StorageError::DownloadFailed(message));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        tracing::info!(
            bucket = %bucket,
            object_path = %object_path,
            size_bytes = bytes.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Object API download successful"
        );

        Ok(bytes.to_vec())
    }

    async fn exists(&self, bucket: &str, object_path: &str) -> StorageResult<bool> {
        validate_object_address(bucket, object_path)?;

        let url = self.object_url(bucket, object_path);
        let response = self
            .authorize(self.client.head(&url))
            .send()
            .await
            .map_err(|e| StorageError::BackendError(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(true)
        } else if status == StatusCode::NOT_FOUND || status == StatusCode::BAD_REQUEST {
            // HEAD answers carry no body to tell a missing object from a bad request
            Ok(false)
        } else {
            Err(StorageError::BackendError(format!(
                "object API answered {}",
                status
            )))
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Supabase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage_for(server: &mockito::Server) -> SupabaseStorage {
        SupabaseStorage::new(
            format!("{}/", server.url()),
            "service-key".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_download_sends_credentials_and_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/storage/v1/object/documents/notes/my%20report.md")
            .match_header("authorization", "Bearer service-key")
            .match_header("apikey", "service-key")
            .with_status(200)
            .with_body("---\nName: Report\n---\nHello")
            .create_async()
            .await;

        let storage = storage_for(&server);
        let data = storage
            .download("documents", "notes/my report.md")
            .await
            .unwrap();

        assert_eq!(data, b"---\nName: Report\n---\nHello");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_download_maps_not_found_payload() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/storage/v1/object/documents/missing.txt")
            .with_status(400)
            .with_body(r#"{"statusCode":"404","error":"not_found","message":"Object not found"}"#)
            .create_async()
            .await;

        let storage = storage_for(&server);
        let err = storage
            .download("documents", "missing.txt")
            .await
            .unwrap_err();

        match err {
            StorageError::NotFound(message) => assert!(message.contains("Object not found")),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_download_surfaces_service_message() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/storage/v1/object/documents/a.txt")
            .with_status(403)
            .with_body(r#"{"statusCode":"403","error":"Unauthorized","message":"signature verification failed"}"#)
            .create_async()
            .await;

        let storage = storage_for(&server);
        let err = storage.download("documents", "a.txt").await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Download failed: signature verification failed"
        );
    }

    #[tokio::test]
    async fn test_download_rejects_traversal_without_request() {
        let server = mockito::Server::new_async().await;
        let storage = storage_for(&server);

        let err = storage
            .download("documents", "../other/secret.txt")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::InvalidKey(_)));
    }

    #[tokio::test]
    async fn test_exists() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("HEAD", "/storage/v1/object/documents/present.md")
            .with_status(200)
            .create_async()
            .await;
        server
            .mock("HEAD", "/storage/v1/object/documents/absent.md")
            .with_status(400)
            .create_async()
            .await;

        let storage = storage_for(&server);
        assert!(storage.exists("documents", "present.md").await.unwrap());
        assert!(!storage.exists("documents", "absent.md").await.unwrap());
    }

    #[test]
    fn test_error_message_falls_back_to_raw_body() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream timeout\n"),
            "upstream timeout"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, ""),
            "request failed with status 502 Bad Gateway"
        );
    }
}
