//! filemeta API library
//!
//! This crate provides the webhook handler, health probes, middleware, and application setup.

// Module declarations
pub mod constants;
mod handlers;
mod middleware;
pub mod services;
pub mod setup;
mod telemetry;

// Public modules
pub mod error;
pub mod state;

// Re-exports
pub use error::IngestError;
pub use services::IngestService;
pub use state::AppState;
