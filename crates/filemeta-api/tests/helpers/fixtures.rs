//! Webhook payloads and object contents used across tests.

use serde_json::{json, Value};

pub const BUCKET: &str = "documents";
pub const OBJECT_ID: &str = "6f1c3c1e-8f57-4e43-9d1e-3c2c1a0e9b11";

pub const REPORT_MARKDOWN: &str = "---\nName: Report\n---\nHello world\nSecond line";

/// Object-created payload as posted by the storage webhook
pub fn object_created(object_path: &str, mimetype: Option<&str>) -> Value {
    let mut metadata = json!({ "size": 1024, "cacheControl": "max-age=3600" });
    if let Some(mimetype) = mimetype {
        metadata["mimetype"] = json!(mimetype);
    }
    json!({
        "type": "INSERT",
        "table": "objects",
        "schema": "storage",
        "record": {
            "bucket_id": BUCKET,
            "name": object_path,
            "id": OBJECT_ID,
            "owner": null,
            "metadata": metadata
        },
        "old_record": null
    })
}
