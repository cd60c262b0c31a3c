//! Application state shared by every handler.

use crate::services::IngestService;
use filemeta_core::Config;
use filemeta_db::FileRecordStore;
use filemeta_storage::Storage;
use std::sync::Arc;

/// Immutable per-process state: configuration plus the two external collaborators.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub storage: Arc<dyn Storage>,
    pub records: Arc<dyn FileRecordStore>,
    pub ingest: IngestService,
}

impl AppState {
    pub fn new(
        config: Config,
        storage: Arc<dyn Storage>,
        records: Arc<dyn FileRecordStore>,
    ) -> Self {
        let ingest = IngestService::new(storage.clone(), records.clone());
        Self {
            config,
            storage,
            records,
            ingest,
        }
    }
}
