//! Configuration module
//!
//! Process configuration is read once at startup from the environment (plus an
//! optional `.env` file) and validated before any listener or client is built.

use std::env;

use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 8000;
const MAX_CONNECTIONS: u32 = 5;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const HTTP_CLIENT_TIMEOUT_SECS: u64 = 30;
const MAX_BODY_BYTES: usize = 1024 * 1024;
const HTTP_CONCURRENCY_LIMIT: usize = 1024;

/// Log output format for the tracing subscriber
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Which record store implementation receives the `files` update
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordStoreBackend {
    /// Direct SQL through a Postgres pool (`DATABASE_URL`)
    Postgres,
    /// PostgREST endpoint under `{SERVICE_URL}/rest/v1`
    Rest,
}

/// Server-level configuration
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub log_format: LogFormat,
    pub max_body_bytes: usize,
    pub http_concurrency_limit: usize,
}

/// Ingestion configuration: storage and record store collaborators
#[derive(Clone, Debug)]
pub struct IngestConfig {
    pub base: BaseConfig,
    // Hosted service endpoint + privileged credential (storage and REST record store)
    pub service_url: Option<String>,
    pub service_role_key: Option<String>,
    pub http_client_timeout_secs: u64,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, etc.)
    pub aws_region: Option<String>,
    pub local_storage_path: Option<String>,
    // Database configuration
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<IngestConfig>);

impl Config {
    fn as_ingest(&self) -> &IngestConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.as_ingest().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        let config = IngestConfig::from_env()?;
        Ok(Config(Box::new(config)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_ingest().validate()
    }

    // Convenience getters for common fields
    pub fn server_port(&self) -> u16 {
        self.as_ingest().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_ingest().base.environment
    }

    pub fn log_format(&self) -> LogFormat {
        self.as_ingest().base.log_format
    }

    pub fn max_body_bytes(&self) -> usize {
        self.as_ingest().base.max_body_bytes
    }

    pub fn http_concurrency_limit(&self) -> usize {
        self.as_ingest().base.http_concurrency_limit
    }

    pub fn service_url(&self) -> Option<&str> {
        self.as_ingest().service_url.as_deref()
    }

    pub fn service_role_key(&self) -> Option<&str> {
        self.as_ingest().service_role_key.as_deref()
    }

    pub fn http_client_timeout_secs(&self) -> u64 {
        self.as_ingest().http_client_timeout_secs
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_ingest().storage_backend
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_ingest().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_ingest().s3_endpoint.as_deref()
    }

    pub fn aws_region(&self) -> Option<&str> {
        self.as_ingest().aws_region.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_ingest().local_storage_path.as_deref()
    }

    pub fn database_url(&self) -> Option<&str> {
        self.as_ingest().database_url.as_deref()
    }

    pub fn db_max_connections(&self) -> u32 {
        self.as_ingest().db_max_connections
    }

    pub fn db_timeout_seconds(&self) -> u64 {
        self.as_ingest().db_timeout_seconds
    }

    /// Postgres when `DATABASE_URL` is set, otherwise the REST endpoint.
    pub fn record_store_backend(&self) -> RecordStoreBackend {
        self.as_ingest().record_store_backend()
    }
}

/// First non-empty value among `keys`.
fn lookup_any<F>(lookup: &F, keys: &[&str]) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    keys.iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, anyhow::Error>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup_any(lookup, &[key]) {
        Some(raw) => raw
            .parse()
            .map_err(|_| anyhow::anyhow!("{} must be a valid number (got '{}')", key, raw)),
        None => Ok(default),
    }
}

impl IngestConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build and validate configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup_any(&lookup, &["ENVIRONMENT", "APP_ENV"])
            .unwrap_or_else(|| "development".to_string());

        let log_format = match lookup_any(&lookup, &["LOG_FORMAT"])
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            None | Some("compact") | Some("text") => LogFormat::Compact,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(anyhow::anyhow!(
                    "LOG_FORMAT must be 'compact' or 'json' (got '{}')",
                    other
                ))
            }
        };

        let storage_backend = match lookup_any(&lookup, &["STORAGE_BACKEND"]) {
            Some(raw) => raw.parse()?,
            None => StorageBackend::Supabase,
        };

        let base = BaseConfig {
            server_port: parse_or(&lookup, "PORT", SERVER_PORT)?,
            environment,
            log_format,
            max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", MAX_BODY_BYTES)?,
            http_concurrency_limit: parse_or(
                &lookup,
                "HTTP_CONCURRENCY_LIMIT",
                HTTP_CONCURRENCY_LIMIT,
            )?,
        };

        let config = IngestConfig {
            base,
            service_url: lookup_any(&lookup, &["SERVICE_URL", "SUPABASE_URL"])
                .map(|url| url.trim_end_matches('/').to_string()),
            service_role_key: lookup_any(
                &lookup,
                &["SERVICE_ROLE_KEY", "SUPABASE_SERVICE_ROLE_KEY"],
            ),
            http_client_timeout_secs: parse_or(
                &lookup,
                "HTTP_CLIENT_TIMEOUT_SECS",
                HTTP_CLIENT_TIMEOUT_SECS,
            )?,
            storage_backend,
            s3_region: lookup_any(&lookup, &["S3_REGION"]),
            s3_endpoint: lookup_any(&lookup, &["S3_ENDPOINT"]),
            aws_region: lookup_any(&lookup, &["AWS_REGION"]),
            local_storage_path: lookup_any(&lookup, &["LOCAL_STORAGE_PATH"]),
            database_url: lookup_any(&lookup, &["DATABASE_URL"]),
            db_max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", MAX_CONNECTIONS)?,
            db_timeout_seconds: parse_or(&lookup, "DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS)?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn record_store_backend(&self) -> RecordStoreBackend {
        if self.database_url.is_some() {
            RecordStoreBackend::Postgres
        } else {
            RecordStoreBackend::Rest
        }
    }

    fn needs_service_credentials(&self) -> bool {
        self.storage_backend == StorageBackend::Supabase
            || self.record_store_backend() == RecordStoreBackend::Rest
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.needs_service_credentials() {
            let url = self.service_url.as_deref().ok_or_else(|| {
                anyhow::anyhow!("SERVICE_URL (or SUPABASE_URL) must be set")
            })?;
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow::anyhow!(
                    "SERVICE_URL must be an http:// or https:// URL"
                ));
            }
            if self.service_role_key.is_none() {
                return Err(anyhow::anyhow!(
                    "SERVICE_ROLE_KEY (or SUPABASE_SERVICE_ROLE_KEY) must be set"
                ));
            }
        }

        if let Some(url) = self.database_url.as_deref() {
            if !(url.starts_with("postgres://") || url.starts_with("postgresql://")) {
                return Err(anyhow::anyhow!(
                    "DATABASE_URL must be a valid PostgreSQL connection string"
                ));
            }
            if self.db_max_connections == 0 {
                return Err(anyhow::anyhow!("DB_MAX_CONNECTIONS cannot be 0"));
            }
            if self.db_timeout_seconds == 0 {
                return Err(anyhow::anyhow!("DB_TIMEOUT_SECONDS cannot be 0"));
            }
        }

        match self.storage_backend {
            StorageBackend::Supabase => {}
            StorageBackend::S3 => {
                if self.s3_region.is_none() && self.aws_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set when using S3 storage backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH must be set when using local storage backend"
                    ));
                }
            }
        }

        if self.http_client_timeout_secs == 0 {
            return Err(anyhow::anyhow!("HTTP_CLIENT_TIMEOUT_SECS cannot be 0"));
        }
        if self.base.max_body_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_BODY_BYTES cannot be 0"));
        }
        if self.base.http_concurrency_limit == 0 {
            return Err(anyhow::anyhow!("HTTP_CONCURRENCY_LIMIT cannot be 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_with_service_credentials() {
        let config = IngestConfig::from_lookup(lookup_from(&[
            ("SUPABASE_URL", "https://project.supabase.co/"),
            ("SUPABASE_SERVICE_ROLE_KEY", "service-key"),
        ]))
        .unwrap();

        assert_eq!(config.base.server_port, 8000);
        assert_eq!(config.storage_backend, StorageBackend::Supabase);
        assert_eq!(config.record_store_backend(), RecordStoreBackend::Rest);
        assert_eq!(
            config.service_url.as_deref(),
            Some("https://project.supabase.co")
        );
        assert_eq!(config.base.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_missing_service_url_fails_fast() {
        let err = IngestConfig::from_lookup(lookup_from(&[("SERVICE_ROLE_KEY", "k")]))
            .unwrap_err()
            .to_string();
        assert!(err.contains("SERVICE_URL"));
    }

    #[test]
    fn test_missing_service_role_key_fails_fast() {
        let err = IngestConfig::from_lookup(lookup_from(&[(
            "SERVICE_URL",
            "https://project.supabase.co",
        )]))
        .unwrap_err()
        .to_string();
        assert!(err.contains("SERVICE_ROLE_KEY"));
    }

    #[test]
    fn test_empty_values_count_as_missing() {
        let result = IngestConfig::from_lookup(lookup_from(&[
            ("SERVICE_URL", "  "),
            ("SERVICE_ROLE_KEY", "k"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_local_storage_with_postgres_needs_no_service_credentials() {
        let config = IngestConfig::from_lookup(lookup_from(&[
            ("STORAGE_BACKEND", "local"),
            ("LOCAL_STORAGE_PATH", "/tmp/filemeta"),
            ("DATABASE_URL", "postgresql://localhost/filemeta"),
        ]))
        .unwrap();

        assert_eq!(config.storage_backend, StorageBackend::Local);
        assert_eq!(config.record_store_backend(), RecordStoreBackend::Postgres);
    }

    #[test]
    fn test_s3_requires_region() {
        let err = IngestConfig::from_lookup(lookup_from(&[
            ("STORAGE_BACKEND", "s3"),
            ("DATABASE_URL", "postgresql://localhost/filemeta"),
        ]))
        .unwrap_err()
        .to_string();
        assert!(err.contains("S3_REGION"));
    }

    #[test]
    fn test_invalid_database_url_rejected() {
        let result = IngestConfig::from_lookup(lookup_from(&[
            ("SERVICE_URL", "https://project.supabase.co"),
            ("SERVICE_ROLE_KEY", "k"),
            ("DATABASE_URL", "mysql://localhost/db"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_port_rejected() {
        let err = IngestConfig::from_lookup(lookup_from(&[
            ("SERVICE_URL", "https://project.supabase.co"),
            ("SERVICE_ROLE_KEY", "k"),
            ("PORT", "eighty"),
        ]))
        .unwrap_err()
        .to_string();
        assert!(err.contains("PORT"));
    }

    #[test]
    fn test_json_log_format() {
        let config = IngestConfig::from_lookup(lookup_from(&[
            ("SERVICE_URL", "https://project.supabase.co"),
            ("SERVICE_ROLE_KEY", "k"),
            ("LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.base.log_format, LogFormat::Json);
    }

    #[test]
    fn test_is_production() {
        let mut config = IngestConfig::from_lookup(lookup_from(&[
            ("SERVICE_URL", "https://project.supabase.co"),
            ("SERVICE_ROLE_KEY", "k"),
            ("APP_ENV", "prod"),
        ]))
        .unwrap();
        assert!(Config(Box::new(config.clone())).is_production());

        config.base.environment = "staging".to_string();
        assert!(!Config(Box::new(config)).is_production());
    }
}
