//! Configuration validation
//!
//! Validates critical configuration values at startup to catch misconfigurations early.

use anyhow::Result;
use filemeta_core::{Config, StorageBackend};

/// Validate critical configuration values
///
/// Re-runs the structural checks of `Config::validate` and adds deployment
/// warnings that are not hard errors.
pub fn validate_config(config: &Config) -> Result<()> {
    config.validate()?;

    if config.is_production() {
        if let Some(url) = config.service_url() {
            if url.starts_with("http://") {
                tracing::warn!(
                    service_url = %url,
                    "SERVICE_URL uses plain http in production - the service role key is sent unencrypted"
                );
            }
        }

        if config.storage_backend() == StorageBackend::Local {
            tracing::warn!("Local storage backend configured in production");
        }
    }

    if config.http_client_timeout_secs() > 300 {
        tracing::warn!(
            http_client_timeout_secs = config.http_client_timeout_secs(),
            "HTTP_CLIENT_TIMEOUT_SECS is very high - a stalled download will hold the request open"
        );
    }

    Ok(())
}
