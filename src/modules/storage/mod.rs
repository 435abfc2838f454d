//! Content store for uploaded plan assets
//!
//! Feature services talk to the [`ContentStore`] trait (put/get/delete by
//! key) so the CRUD logic is independent of where bytes actually live.
//! The shipped backend is [`LocalDiskStore`], a directory tree partitioned
//! by asset kind and served statically under the configured path prefix.

mod local_disk;

pub use local_disk::LocalDiskStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::core::error::Result;

/// Kind of uploaded asset; determines the key namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Plan photo shown in the catalog
    Image,
    /// Downloadable plan document (PDF/ZIP/RAR)
    Document,
    /// Admin profile picture
    Avatar,
}

impl AssetKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            AssetKind::Image => "images",
            AssetKind::Document => "documents",
            AssetKind::Avatar => "avatars",
        }
    }
}

/// Storage abstraction for uploaded assets
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Write bytes under the given key, creating parent directories/prefixes
    async fn put(&self, key: &str, data: &[u8]) -> Result<()>;

    /// Read the bytes stored under the key
    async fn get(&self, key: &str) -> Result<Vec<u8>>;

    /// Remove the object; deleting a missing key is not an error
    async fn delete(&self, key: &str) -> Result<()>;

    /// Public URL path under which the key is served
    fn public_url(&self, key: &str) -> String;

    /// Inverse of `public_url`; `None` if the URL is not one of ours
    fn key_from_url(&self, url: &str) -> Option<String>;
}

/// Generate a collision-resistant storage key for an upload.
///
/// The client-supplied filename is never used for the storage path; only a
/// sanitized extension survives.
pub fn generate_key(kind: AssetKind, original_filename: &str) -> String {
    let extension = sanitize_extension(original_filename);
    format!("{}/{}.{}", kind.prefix(), Uuid::new_v4(), extension)
}

fn sanitize_extension(filename: &str) -> String {
    let ext = filename
        .rsplit('.')
        .next()
        .unwrap_or("bin")
        .to_ascii_lowercase();

    if ext.is_empty()
        || ext.len() > 10
        || ext == filename.to_ascii_lowercase()
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        "bin".to_string()
    } else {
        ext
    }
}

/// Reject keys that could escape the store root.
pub(crate) fn validate_key(key: &str) -> Result<()> {
    use crate::core::error::AppError;

    let valid = !key.is_empty()
        && !key.starts_with('/')
        && !key.contains('\\')
        && !key.contains('\0')
        && !key.split('/').any(|seg| seg.is_empty() || seg.starts_with('.'));

    if valid {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!("Invalid storage key: {}", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_keys_are_namespaced_by_kind() {
        let key = generate_key(AssetKind::Image, "photo.PNG");
        assert!(key.starts_with("images/"));
        assert!(key.ends_with(".png"));

        let key = generate_key(AssetKind::Document, "villa-plan.pdf");
        assert!(key.starts_with("documents/"));
        assert!(key.ends_with(".pdf"));
    }

    #[test]
    fn generated_keys_are_unique() {
        let a = generate_key(AssetKind::Avatar, "me.jpg");
        let b = generate_key(AssetKind::Avatar, "me.jpg");
        assert_ne!(a, b);
    }

    #[test]
    fn client_filename_cannot_steer_the_path() {
        let key = generate_key(AssetKind::Document, "../../etc/passwd");
        assert!(key.starts_with("documents/"));
        assert!(!key.contains(".."));

        let key = generate_key(AssetKind::Image, "no-extension");
        assert!(key.ends_with(".bin"));
    }

    #[test]
    fn validate_key_rejects_traversal() {
        assert!(validate_key("images/a.png").is_ok());
        assert!(validate_key("../secret").is_err());
        assert!(validate_key("images/../../x").is_err());
        assert!(validate_key("/absolute").is_err());
        assert!(validate_key("images/.hidden").is_err());
        assert!(validate_key("").is_err());
    }
}
