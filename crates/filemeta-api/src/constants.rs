//! API constants

/// Body of the 200 response to a processed event
pub const SUCCESS_MESSAGE: &str = "File processed and database updated successfully!";

/// Webhook endpoint paths; `/` matches a function deployed at its own URL
pub const PROCESS_FILE_PATHS: [&str; 2] = ["/", "/process-file"];

/// Object probed by the storage health check; a missing object still counts as healthy
pub const HEALTH_CHECK_BUCKET: &str = "health-check";
pub const HEALTH_CHECK_KEY: &str = "health-check-non-existent-key";

/// Request ID header
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";
