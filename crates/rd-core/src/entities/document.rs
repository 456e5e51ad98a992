use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// An uploaded file attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ResearchDocument {
    pub id: String,
    pub project_id: String,
    pub name: String,
    /// Path of the stored file, relative to the media directory.
    pub file_path: String,
    /// File name as uploaded, used for `Content-Disposition`.
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub description: String,
    pub uploaded_at: DateTime<Utc>,
}
