//! Uploaded document storage.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_media_dir() -> String {
    "media".to_string()
}

/// 25 MiB.
const fn default_max_upload_bytes() -> u64 {
    25 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Root directory for uploaded files.
    #[serde(default = "default_media_dir")]
    pub media_dir: String,

    /// Largest accepted upload.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            media_dir: default_media_dir(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl StorageConfig {
    /// Directory research documents are written to.
    #[must_use]
    pub fn documents_dir(&self) -> PathBuf {
        PathBuf::from(&self.media_dir).join("research_documents")
    }
}
