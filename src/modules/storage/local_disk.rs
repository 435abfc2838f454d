use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::core::config::StorageConfig;
use crate::core::error::Result;
use crate::modules::storage::{validate_key, AssetKind, ContentStore};

/// Content store backed by a local directory tree.
///
/// Keys map 1:1 to paths under the root; the same tree is exposed read-only
/// through the HTTP static-file route at `public_base_path`.
pub struct LocalDiskStore {
    root: PathBuf,
    public_base_path: String,
}

impl LocalDiskStore {
    /// Open the store, creating the root and one subdirectory per asset kind.
    pub async fn new(config: &StorageConfig) -> Result<Self> {
        for kind in [AssetKind::Image, AssetKind::Document, AssetKind::Avatar] {
            tokio::fs::create_dir_all(config.root.join(kind.prefix())).await?;
        }

        debug!("Content store opened at {}", config.root.display());

        Ok(Self {
            root: config.root.clone(),
            public_base_path: config.public_base_path.clone(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }
}

#[async_trait]
impl ContentStore for LocalDiskStore {
    async fn put(&self, key: &str, data: &[u8]) -> Result<()> {
        let path = self.resolve(key)?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&path, data).await?;
        debug!("Stored {} ({} bytes)", key, data.len());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let path = self.resolve(key)?;
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(
                crate::core::error::AppError::NotFound(format!("No stored object for '{}'", key)),
            ),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let path = self.resolve(key)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                debug!("Deleted {}", key);
                Ok(())
            }
            // Idempotent: a missing file is already deleted
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                warn!("Failed to delete {}: {}", key, e);
                Err(e.into())
            }
        }
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}", self.public_base_path, key)
    }

    fn key_from_url(&self, url: &str) -> Option<String> {
        let prefix = format!("{}/", self.public_base_path);
        url.strip_prefix(&prefix).and_then(|key| {
            if validate_key(key).is_ok() {
                Some(key.to_string())
            } else {
                None
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AppError;

    fn temp_config() -> StorageConfig {
        StorageConfig {
            root: std::env::temp_dir().join(format!("estateplans-test-{}", uuid::Uuid::new_v4())),
            public_base_path: "/uploads".to_string(),
        }
    }

    #[tokio::test]
    async fn put_get_delete_roundtrip() {
        let config = temp_config();
        let store = LocalDiskStore::new(&config).await.unwrap();

        store.put("documents/test.pdf", b"plan bytes").await.unwrap();
        assert_eq!(store.get("documents/test.pdf").await.unwrap(), b"plan bytes");

        store.delete("documents/test.pdf").await.unwrap();
        assert!(matches!(
            store.get("documents/test.pdf").await,
            Err(AppError::NotFound(_))
        ));

        tokio::fs::remove_dir_all(&config.root).await.unwrap();
    }

    #[tokio::test]
    async fn delete_of_missing_key_is_ok() {
        let config = temp_config();
        let store = LocalDiskStore::new(&config).await.unwrap();

        assert!(store.delete("images/never-existed.png").await.is_ok());

        tokio::fs::remove_dir_all(&config.root).await.unwrap();
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let config = temp_config();
        let store = LocalDiskStore::new(&config).await.unwrap();

        assert!(store.put("../outside.txt", b"x").await.is_err());
        assert!(store.get("images/../../etc/passwd").await.is_err());

        tokio::fs::remove_dir_all(&config.root).await.unwrap();
    }

    #[tokio::test]
    async fn url_mapping_roundtrips() {
        let config = temp_config();
        let store = LocalDiskStore::new(&config).await.unwrap();

        let url = store.public_url("images/abc.png");
        assert_eq!(url, "/uploads/images/abc.png");
        assert_eq!(store.key_from_url(&url).as_deref(), Some("images/abc.png"));

        assert_eq!(store.key_from_url("/other/images/abc.png"), None);
        assert_eq!(store.key_from_url("/uploads/../etc/passwd"), None);

        tokio::fs::remove_dir_all(&config.root).await.unwrap();
    }
}
