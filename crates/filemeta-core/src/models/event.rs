//! Storage webhook payload.
//!
//! The storage layer posts `{ "record": { "bucket_id", "name", "id", "metadata": { "mimetype" } } }`
//! whenever an object is created. Only these four fields are read; everything else is ignored.

use serde::Serialize;
use serde_json::Value;

/// One object-created notification, validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestionEvent {
    pub bucket_id: String,
    /// Full object path within the bucket (`record.name`)
    pub object_path: String,
    /// Storage object id (`record.id`), the unique key of the `files` row
    pub storage_object_id: String,
    /// MIME type reported by the storage layer, if any
    pub mimetype: Option<String>,
}

/// Required payload fields that were absent, empty or not strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Missing required fields in payload: {}", .fields.join(", "))]
pub struct MissingFields {
    pub fields: Vec<&'static str>,
}

fn non_empty_str<'a>(value: Option<&'a Value>) -> Option<&'a str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

impl IngestionEvent {
    /// Extract the event from a decoded webhook body.
    ///
    /// A body without a `record` object is reported as missing every required field.
    pub fn from_payload(payload: &Value) -> Result<Self, MissingFields> {
        let record = payload.get("record").filter(|r| r.is_object());

        let bucket_id = non_empty_str(record.and_then(|r| r.get("bucket_id")));
        let object_path = non_empty_str(record.and_then(|r| r.get("name")));
        let storage_object_id = non_empty_str(record.and_then(|r| r.get("id")));

        match (bucket_id, object_path, storage_object_id) {
            (Some(bucket_id), Some(object_path), Some(storage_object_id)) => Ok(Self {
                bucket_id: bucket_id.to_string(),
                object_path: object_path.to_string(),
                storage_object_id: storage_object_id.to_string(),
                mimetype: non_empty_str(
                    record
                        .and_then(|r| r.get("metadata"))
                        .and_then(|m| m.get("mimetype")),
                )
                .map(String::from),
            }),
            _ => {
                let mut fields = Vec::new();
                if bucket_id.is_none() {
                    fields.push("bucket_id");
                }
                if object_path.is_none() {
                    fields.push("name");
                }
                if storage_object_id.is_none() {
                    fields.push("id");
                }
                Err(MissingFields { fields })
            }
        }
    }

    /// Final path segment of the object path (text after the last `/`).
    pub fn file_name(&self) -> &str {
        self.object_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.object_path)
    }
}
