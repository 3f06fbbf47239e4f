//! Filesystem storage backend.

use async_trait::async_trait;
use std::path::PathBuf;
use tracing::{debug, instrument};
use vasari_error::{PublishError, PublishErrorKind, VasariResult};
use vasari_interface::AssetStore;

/// Filesystem-backed asset storage.
///
/// Writes objects under a base directory served by a static file host;
/// the public URL is `{public_base_url}/{key}`. Writes go through a temp
/// file plus rename so a crash mid-write never leaves a torn object at
/// the published path.
pub struct FileSystemStore {
    base_path: PathBuf,
    public_base_url: String,
}

impl FileSystemStore {
    /// Create a new filesystem store rooted at `base_path`.
    ///
    /// Creates the base directory if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    #[instrument(skip(base_path))]
    pub fn new(base_path: impl Into<PathBuf>, public_base_url: String) -> VasariResult<Self> {
        let base_path = base_path.into();

        std::fs::create_dir_all(&base_path).map_err(|e| {
            PublishError::new(PublishErrorKind::Upload(format!(
                "create {}: {}",
                base_path.display(),
                e
            )))
        })?;

        Ok(Self {
            base_path,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn resolve(&self, key: &str) -> VasariResult<PathBuf> {
        // Keys are derived server-side, but refuse traversal outright.
        if key.split('/').any(|part| part == ".." || part.is_empty()) {
            return Err(
                PublishError::new(PublishErrorKind::InvalidKey(key.to_string())).into(),
            );
        }
        Ok(self.base_path.join(key))
    }
}

#[async_trait]
impl AssetStore for FileSystemStore {
    #[instrument(skip(self, data), fields(key = %key, bytes = data.len()))]
    async fn put(&self, key: &str, data: &[u8], _content_type: &str) -> VasariResult<String> {
        let path = self.resolve(key)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                PublishError::new(PublishErrorKind::Upload(format!(
                    "create {}: {}",
                    parent.display(),
                    e
                )))
            })?;
        }

        let temp_path = path.with_extension("tmp");
        tokio::fs::write(&temp_path, data).await.map_err(|e| {
            PublishError::new(PublishErrorKind::Upload(format!(
                "{}: {}",
                temp_path.display(),
                e
            )))
        })?;

        tokio::fs::rename(&temp_path, &path).await.map_err(|e| {
            PublishError::new(PublishErrorKind::Upload(format!(
                "rename {} to {}: {}",
                temp_path.display(),
                path.display(),
                e
            )))
        })?;

        let public_url = format!("{}/{}", self.public_base_url, key);
        debug!(path = %path.display(), url = %public_url, "Stored asset");
        Ok(public_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn store(dir: &Path) -> FileSystemStore {
        FileSystemStore::new(dir, "https://assets.example.com".to_string()).unwrap()
    }

    #[tokio::test]
    async fn writes_and_reports_public_url() {
        let dir = tempfile::TempDir::new().unwrap();
        let url = store(dir.path())
            .put("acme/whats-new.png", b"png bytes", "image/png")
            .await
            .unwrap();

        assert_eq!(url, "https://assets.example.com/acme/whats-new.png");
        let written = std::fs::read(dir.path().join("acme/whats-new.png")).unwrap();
        assert_eq!(written, b"png bytes");
    }

    #[tokio::test]
    async fn overwrites_existing_key() {
        let dir = tempfile::TempDir::new().unwrap();
        let fs = store(dir.path());
        fs.put("acme/a.png", b"first", "image/png").await.unwrap();
        fs.put("acme/a.png", b"second", "image/png").await.unwrap();

        let written = std::fs::read(dir.path().join("acme/a.png")).unwrap();
        assert_eq!(written, b"second");
    }

    #[tokio::test]
    async fn rejects_traversal_keys() {
        let dir = tempfile::TempDir::new().unwrap();
        let result = store(dir.path())
            .put("../outside.png", b"x", "image/png")
            .await;
        assert!(result.is_err());
    }
}
