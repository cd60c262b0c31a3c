use filemeta_core::models::{FileRecord, FileRecordUpdate};
use filemeta_core::AppError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use super::FileRecordStore;

const RETURNED_COLUMNS: &str = "storage_object_id,name,mime_type";

/// `files` repository over the hosted PostgREST endpoint (`{service_url}/rest/v1`)
#[derive(Clone)]
pub struct RestFileRepository {
    client: Client,
    service_url: String,
    service_role_key: String,
}

impl RestFileRepository {
    pub fn new(
        service_url: String,
        service_role_key: String,
        timeout: Duration,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            service_url: service_url.trim_end_matches('/').to_string(),
            service_role_key,
        })
    }

    fn files_url(&self) -> String {
        format!("{}/rest/v1/files", self.service_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("Authorization", format!("Bearer {}", self.service_role_key))
            .header("apikey", self.service_role_key.as_str())
    }
}

/// PostgREST errors carry `{"code","message","details","hint"}`.
fn upstream_error(status: StatusCode, body: &str) -> AppError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                format!("request failed with status {}", status)
            } else {
                trimmed.to_string()
            }
        });
    AppError::Upstream(message)
}

#[async_trait::async_trait]
impl FileRecordStore for RestFileRepository {
    #[tracing::instrument(skip(self, update), fields(
        db.system = "postgrest",
        db.table = "files",
        db.operation = "update",
        db.record_id = %storage_object_id
    ))]
    async fn update_file_metadata(
        &self,
        storage_object_id: &str,
        update: &FileRecordUpdate,
    ) -> Result<FileRecord, AppError> {
        let filter = format!("eq.{}", storage_object_id);
        let response = self
            .authorize(self.client.patch(self.files_url()))
            .query(&[
                ("storage_object_id", filter.as_str()),
                ("select", RETURNED_COLUMNS),
            ])
            .header("Prefer", "return=representation")
            .json(update)
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        if !status.is_success() {
            return Err(upstream_error(status, &body));
        }

        let rows: Vec<FileRecord> = serde_json::from_str(&body).map_err(|e| {
            AppError::Upstream(format!("Unexpected response from files endpoint: {}", e))
        })?;

        rows.into_iter().next().ok_or_else(|| {
            AppError::NotFound(format!(
                "no files row with storage_object_id {}",
                storage_object_id
            ))
        })
    }

    #[tracing::instrument(skip(self), fields(db.system = "postgrest", db.operation = "select"))]
    async fn ping(&self) -> Result<(), AppError> {
        let response = self
            .authorize(self.client.get(self.files_url()))
            .query(&[("select", "storage_object_id"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(upstream_error(status, &body))
        }
    }
}
