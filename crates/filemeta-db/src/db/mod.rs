//! Database repositories for data access layer
//!
//! The ingest service only ever updates one table, `files`. It can be reached
//! directly over a Postgres pool or through the hosted PostgREST endpoint.
//
// `files` repositories (trait, Postgres, REST)
pub mod files;

pub use files::{create_file_record_store, FileRecordStore, PostgresFileRepository};
#[cfg(feature = "rest")]
pub use files::RestFileRepository;
