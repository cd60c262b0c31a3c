//! Ingest pipeline: download, extract, persist.

use crate::error::IngestError;
use filemeta_core::models::{FileRecord, FileRecordUpdate, IngestionEvent};
use filemeta_db::FileRecordStore;
use filemeta_processing::{extract_metadata, ExtractedMetadata};
use filemeta_storage::Storage;
use std::sync::Arc;

/// Runs one ingestion event through storage and the record store.
///
/// At most one download and one update per call; nothing is retried.
#[derive(Clone)]
pub struct IngestService {
    storage: Arc<dyn Storage>,
    records: Arc<dyn FileRecordStore>,
}

impl IngestService {
    pub fn new(storage: Arc<dyn Storage>, records: Arc<dyn FileRecordStore>) -> Self {
        Self { storage, records }
    }

    #[tracing::instrument(skip(self, event), fields(
        bucket = %event.bucket_id,
        object_path = %event.object_path,
        storage_object_id = %event.storage_object_id
    ))]
    pub async fn ingest(&self, event: &IngestionEvent) -> Result<FileRecord, IngestError> {
        let start = std::time::Instant::now();

        let content = self
            .storage
            .download(&event.bucket_id, &event.object_path)
            .await
            .map_err(IngestError::Download)?;

        let metadata = extract_metadata(
            &event.object_path,
            &content,
            event.mimetype.as_deref(),
        );
        drop(content);

        tracing::debug!(
            display_name = ?metadata.display_name,
            word_count = ?metadata.word_count,
            first_line = ?metadata.first_line,
            file_type = ?metadata.file_type,
            "Metadata extracted"
        );

        let update = build_update(event, &metadata);

        let record = self
            .records
            .update_file_metadata(&event.storage_object_id, &update)
            .await
            .map_err(IngestError::Update)?;

        tracing::info!(
            name = %update.name,
            mime_type = ?update.mime_type,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "File processed and record updated"
        );

        Ok(record)
    }
}

/// Columns to write: frontmatter name or the final path segment, and the
/// derived MIME type falling back to the one the storage layer reported.
pub fn build_update(event: &IngestionEvent, metadata: &ExtractedMetadata) -> FileRecordUpdate {
    FileRecordUpdate {
        name: metadata
            .display_name
            .clone()
            .unwrap_or_else(|| event.file_name().to_string()),
        mime_type: metadata
            .mime_type()
            .map(String::from)
            .or_else(|| event.mimetype.clone()),
    }
}
