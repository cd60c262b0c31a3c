use serde::{Deserialize, Serialize};

/// Row of the `files` table as seen by this service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FileRecord {
    pub storage_object_id: String,
    pub name: Option<String>,
    pub mime_type: Option<String>,
}

/// Columns written for one processed object.
///
/// `mime_type: None` leaves the stored value untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRecordUpdate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}
