//! Domain models
//!
//! Inbound webhook payloads and the `files` record shapes.

pub mod event;
pub mod file;

pub use event::{IngestionEvent, MissingFields};
pub use file::{FileRecord, FileRecordUpdate};
