use crate::keys;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory storage implementation
///
/// Paths are the bare `{directory}/{filename}` keys. Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    files: Arc<RwLock<HashMap<String, Bytes>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored files
    pub async fn len(&self) -> usize {
        self.files.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.files.read().await.is_empty()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn save(&self, data: Bytes, filename: &str, directory: &str) -> StorageResult<String> {
        let key = keys::storage_key(directory, filename)?;
        let size = data.len();

        self.files.write().await.insert(key.clone(), data);

        tracing::info!(key = %key, size_bytes = size, "Memory storage save successful");

        Ok(key)
    }

    async fn load(&self, path: &str) -> StorageResult<Vec<u8>> {
        keys::validate_key(path)?;
        self.files
            .read()
            .await
            .get(path)
            .map(|data| data.to_vec())
            .ok_or_else(|| StorageError::NotFound(path.to_string()))
    }

    async fn exists(&self, path: &str) -> bool {
        keys::validate_key(path).is_ok() && self.files.read().await.contains_key(path)
    }

    async fn delete(&self, path: &str) -> bool {
        if keys::validate_key(path).is_err() {
            return false;
        }
        let removed = self.files.write().await.remove(path).is_some();
        if removed {
            tracing::info!(key = %path, "Memory storage delete successful");
        }
        removed
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}

#[cfg(all(test, feature = "storage-memory"))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_roundtrip() {
        let storage = MemoryStorage::new();
        let path = storage
            .save(Bytes::from_static(b"abc"), "p.jpg", "profiles")
            .await
            .unwrap();

        assert_eq!(path, "profiles/p.jpg");
        assert!(storage.exists(&path).await);
        assert_eq!(storage.load(&path).await.unwrap(), b"abc".to_vec());
        assert_eq!(storage.len().await, 1);
    }

    #[tokio::test]
    async fn test_memory_storage_delete() {
        let storage = MemoryStorage::new();
        let path = storage
            .save(Bytes::from_static(b"abc"), "p.jpg", "profiles")
            .await
            .unwrap();

        assert!(storage.delete(&path).await);
        assert!(!storage.delete(&path).await);
        assert!(!storage.delete("../escape").await);
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_clones_share_files() {
        let storage = MemoryStorage::new();
        let clone = storage.clone();
        storage
            .save(Bytes::from_static(b"abc"), "p.jpg", "")
            .await
            .unwrap();
        assert!(clone.exists("p.jpg").await);
    }

    #[tokio::test]
    async fn test_missing_file_not_found() {
        let storage = MemoryStorage::new();
        assert!(matches!(
            storage.load("nope.jpg").await,
            Err(StorageError::NotFound(_))
        ));
    }
}
