//! Uploaded document files on local disk.
//!
//! Files live under `<media_dir>/research_documents/` with a UUID prefix so
//! two uploads of the same name never collide. Stored paths are relative to
//! the media directory.

use std::io;
use std::path::{Component, Path, PathBuf};

use uuid::Uuid;

pub const DOCUMENTS_SUBDIR: &str = "research_documents";

#[derive(Debug, Clone)]
pub struct DocumentStore {
    media_dir: PathBuf,
    max_upload_bytes: u64,
}

impl DocumentStore {
    pub fn new(media_dir: impl Into<PathBuf>, max_upload_bytes: u64) -> Self {
        Self {
            media_dir: media_dir.into(),
            max_upload_bytes,
        }
    }

    #[must_use]
    pub const fn max_upload_bytes(&self) -> u64 {
        self.max_upload_bytes
    }

    /// Write an upload and return its path relative to the media directory.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the directory or file cannot be written.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<String> {
        let relative = format!(
            "{DOCUMENTS_SUBDIR}/{}-{}",
            Uuid::new_v4(),
            sanitize_file_name(original_name)
        );
        let absolute = self.media_dir.join(&relative);
        if let Some(parent) = absolute.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&absolute, bytes).await?;
        tracing::debug!(path = %absolute.display(), size = bytes.len(), "stored document");
        Ok(relative)
    }

    /// # Errors
    ///
    /// `NotFound` if the file is gone or the path escapes the media directory.
    pub async fn read(&self, relative: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.resolve(relative)?).await
    }

    /// Remove a stored file. A file that is already gone is not an error.
    ///
    /// # Errors
    ///
    /// Returns any other I/O error.
    pub async fn remove(&self, relative: &str) -> io::Result<()> {
        match tokio::fs::remove_file(self.resolve(relative)?).await {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }

    fn resolve(&self, relative: &str) -> io::Result<PathBuf> {
        let path = Path::new(relative);
        if path.components().all(|c| matches!(c, Component::Normal(_))) {
            Ok(self.media_dir.join(path))
        } else {
            Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("refusing stored path {relative}"),
            ))
        }
    }
}

/// Reduce an uploaded file name to a safe single path component.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = cleaned.trim_start_matches('.');
    if trimmed.is_empty() {
        "upload".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("protocol.pdf", "protocol.pdf")]
    #[case("../../etc/passwd", "passwd")]
    #[case("C:\\Users\\me\\data set.xlsx", "data_set.xlsx")]
    #[case(".hidden", "hidden")]
    #[case("", "upload")]
    fn sanitizes_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_file_name(input), expected);
    }

    #[tokio::test]
    async fn save_read_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path(), 1024);
        let relative = store.save("notes.txt", b"hello").await.unwrap();
        assert!(relative.starts_with("research_documents/"));
        assert!(relative.ends_with("-notes.txt"));
        assert_eq!(store.read(&relative).await.unwrap(), b"hello");

        store.remove(&relative).await.unwrap();
        assert!(store.read(&relative).await.is_err());
        store.remove(&relative).await.unwrap();
    }

    #[tokio::test]
    async fn rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let store = DocumentStore::new(dir.path(), 1024);
        let err = store.read("../secret").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
