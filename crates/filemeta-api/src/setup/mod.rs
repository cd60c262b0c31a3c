//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;
pub mod validation;

use crate::state::AppState;
use anyhow::{Context, Result};
use filemeta_core::Config;
use filemeta_db::create_file_record_store;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    crate::telemetry::init_telemetry(config.log_format())
        .map_err(|e| anyhow::anyhow!("Failed to initialize telemetry: {}", e))?;

    // Validate configuration - fail fast on misconfiguration
    validation::validate_config(&config).context("Configuration validation failed")?;

    tracing::info!(
        environment = %config.environment(),
        storage_backend = %config.storage_backend(),
        record_store = ?config.record_store_backend(),
        "Configuration loaded and validated successfully"
    );

    // Postgres pool only when DATABASE_URL selects the direct record store
    let pool = database::setup_database(&config).await?;

    let storage = storage::setup_storage(&config).await?;

    let records = create_file_record_store(&config, pool)
        .context("Failed to initialize files record store")?;

    let state = Arc::new(AppState::new(config.clone(), storage, records));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
