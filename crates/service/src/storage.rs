use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;
use uuid::Uuid;

use crate::errors::ServiceError;

/// Stores uploaded binary assets and hands back an opaque token that
/// later identifies the asset for deletion.
#[async_trait]
pub trait FileStore: Send + Sync {
    async fn store(&self, bytes: &[u8], original_name: &str) -> Result<String, ServiceError>;
    async fn delete(&self, token: &str) -> Result<(), ServiceError>;
}

/// Filesystem-backed store. Tokens are `<uuid>_<sanitized name>` file
/// names under a single upload directory.
pub struct LocalFileStore {
    root: PathBuf,
}

impl LocalFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn sanitize(original_name: &str) -> String {
        let cleaned: String = original_name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
            .collect();
        if cleaned.is_empty() {
            "upload.bin".to_string()
        } else {
            cleaned
        }
    }

    fn checked_path(&self, token: &str) -> Result<PathBuf, ServiceError> {
        // Tokens are bare file names; anything path-like is rejected.
        if token.is_empty() || token.contains('/') || token.contains('\\') || token.contains("..") {
            return Err(ServiceError::Storage(format!("invalid asset token: {token}")));
        }
        Ok(self.root.join(token))
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn store(&self, bytes: &[u8], original_name: &str) -> Result<String, ServiceError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| ServiceError::Storage(format!("create upload dir: {e}")))?;
        let token = format!("{}_{}", Uuid::new_v4(), Self::sanitize(original_name));
        let path = self.root.join(&token);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ServiceError::Storage(format!("write {}: {e}", path.display())))?;
        debug!(token = %token, size = bytes.len(), "asset stored");
        Ok(token)
    }

    async fn delete(&self, token: &str) -> Result<(), ServiceError> {
        let path = self.checked_path(token)?;
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| ServiceError::Storage(format!("delete {}: {e}", path.display())))?;
        debug!(token = %token, "asset deleted");
        Ok(())
    }
}

/// In-memory store that records calls; used by service tests to assert
/// delete-before-store ordering without touching the filesystem.
pub mod mock {
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct RecordingFileStore {
        next: AtomicU64,
        pub stored: Mutex<Vec<String>>,
        pub deleted: Mutex<Vec<String>>,
        pub fail_next_delete: AtomicBool,
    }

    #[async_trait]
    impl FileStore for RecordingFileStore {
        async fn store(&self, _bytes: &[u8], original_name: &str) -> Result<String, ServiceError> {
            let n = self.next.fetch_add(1, Ordering::SeqCst);
            let token = format!("asset-{n}-{original_name}");
            self.stored.lock().unwrap().push(token.clone());
            Ok(token)
        }

        async fn delete(&self, token: &str) -> Result<(), ServiceError> {
            if self.fail_next_delete.swap(false, Ordering::SeqCst) {
                return Err(ServiceError::Storage("simulated delete failure".into()));
            }
            self.deleted.lock().unwrap().push(token.to_string());
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn store_then_delete_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        let token = store.store(b"png-bytes", "foto perfil.png").await.unwrap();
        assert!(token.ends_with("foto_perfil.png"));
        assert!(dir.path().join(&token).exists());

        store.delete(&token).await.unwrap();
        assert!(!dir.path().join(&token).exists());
    }

    #[tokio::test]
    async fn delete_unknown_token_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        let err = store.delete("never-stored.png").await.unwrap_err();
        assert!(matches!(err, ServiceError::Storage(_)));
    }

    #[tokio::test]
    async fn path_like_tokens_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalFileStore::new(dir.path());
        assert!(store.delete("../etc/passwd").await.is_err());
        assert!(store.delete("a/b.png").await.is_err());
        assert!(store.delete("").await.is_err());
    }
}
