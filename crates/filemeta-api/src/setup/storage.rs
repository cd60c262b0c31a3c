//! Storage setup and initialization

use anyhow::{Context, Result};
use filemeta_core::Config;
use filemeta_storage::{create_storage, Storage};
use std::sync::Arc;

/// Setup the storage backend selected by `STORAGE_BACKEND`
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize storage backend")?;
    tracing::info!(
        backend = %storage.backend_type(),
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}
