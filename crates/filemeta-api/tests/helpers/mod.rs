//! Test helpers: build AppState and router with in-memory collaborators.
//!
//! Run from workspace root: `cargo test -p filemeta-api`.

pub mod fixtures;

use async_trait::async_trait;
use axum_test::TestServer;
use filemeta_api::setup::routes;
use filemeta_api::state::AppState;
use filemeta_core::config::IngestConfig;
use filemeta_core::models::{FileRecord, FileRecordUpdate};
use filemeta_core::{AppError, Config, StorageBackend};
use filemeta_db::FileRecordStore;
use filemeta_storage::{Storage, StorageError, StorageResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory object store keyed by `(bucket, object_path)`
#[derive(Default)]
pub struct MockStorage {
    objects: Mutex<HashMap<(String, String), Vec<u8>>>,
    failure: Mutex<Option<String>>,
    downloads: AtomicUsize,
}

impl MockStorage {
    pub fn put(&self, bucket: &str, object_path: &str, data: impl Into<Vec<u8>>) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), object_path.to_string()), data.into());
    }

    /// Make every download fail with a backend error carrying `message`
    pub fn fail_with(&self, message: &str) {
        *self.failure.lock().unwrap() = Some(message.to_string());
    }

    pub fn download_count(&self) -> usize {
        self.downloads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Storage for MockStorage {
    async fn download(&self, bucket: &str, object_path: &str) -> StorageResult<Vec<u8>> {
        self.downloads.fetch_add(1, Ordering::SeqCst);
        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(StorageError::BackendError(message));
        }
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), object_path.to_string()))
            .cloned()
            .ok_or_else(|| StorageError::NotFound(format!("{}/{}", bucket, object_path)))
    }

    async fn exists(&self, bucket: &str, object_path: &str) -> StorageResult<bool> {
        Ok(self
            .objects
            .lock()
            .unwrap()
            .contains_key(&(bucket.to_string(), object_path.to_string())))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}

/// In-memory `files` table keyed by storage object id
#[derive(Default)]
pub struct MockFileRecordStore {
    rows: Mutex<HashMap<String, FileRecord>>,
    updates: AtomicUsize,
    unavailable: Mutex<bool>,
}

impl MockFileRecordStore {
    pub fn insert_row(&self, storage_object_id: &str, mime_type: Option<&str>) {
        self.rows.lock().unwrap().insert(
            storage_object_id.to_string(),
            FileRecord {
                storage_object_id: storage_object_id.to_string(),
                name: None,
                mime_type: mime_type.map(String::from),
            },
        );
    }

    pub fn row(&self, storage_object_id: &str) -> Option<FileRecord> {
        self.rows.lock().unwrap().get(storage_object_id).cloned()
    }

    pub fn update_count(&self) -> usize {
        self.updates.load(Ordering::SeqCst)
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        *self.unavailable.lock().unwrap() = unavailable;
    }
}

#[async_trait]
impl FileRecordStore for MockFileRecordStore {
    async fn update_file_metadata(
        &self,
        storage_object_id: &str,
        update: &FileRecordUpdate,
    ) -> Result<FileRecord, AppError> {
        self.updates.fetch_add(1, Ordering::SeqCst);
        let mut rows = self.rows.lock().unwrap();
        let row = rows.get_mut(storage_object_id).ok_or_else(|| {
            AppError::NotFound(format!(
                "no files row with storage_object_id {}",
                storage_object_id
            ))
        })?;
        row.name = Some(update.name.clone());
        if let Some(mime_type) = &update.mime_type {
            row.mime_type = Some(mime_type.clone());
        }
        Ok(row.clone())
    }

    async fn ping(&self) -> Result<(), AppError> {
        if *self.unavailable.lock().unwrap() {
            Err(AppError::Upstream("connection refused".to_string()))
        } else {
            Ok(())
        }
    }
}

/// Test application: server plus handles on the in-memory collaborators.
pub struct TestApp {
    pub server: TestServer,
    pub storage: Arc<MockStorage>,
    pub records: Arc<MockFileRecordStore>,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

pub fn create_test_config() -> Config {
    let ingest = IngestConfig::from_lookup(|key| match key {
        "SERVICE_URL" => Some("http://localhost:54321".to_string()),
        "SERVICE_ROLE_KEY" => Some("test-service-role-key".to_string()),
        "ENVIRONMENT" => Some("test".to_string()),
        _ => None,
    })
    .expect("Failed to build test config");
    Config(Box::new(ingest))
}

/// Setup test app with empty in-memory storage and `files` table.
pub fn setup_test_app() -> TestApp {
    let storage = Arc::new(MockStorage::default());
    let records = Arc::new(MockFileRecordStore::default());

    let config = create_test_config();
    let state = Arc::new(AppState::new(
        config.clone(),
        storage.clone(),
        records.clone(),
    ));

    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        storage,
        records,
    }
}
