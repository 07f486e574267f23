use crate::keys;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "uploads")
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage { base_path })
    }

    /// Convert a path returned by `save` back into a filesystem path.
    ///
    /// The path must live under the base directory and must not contain
    /// traversal sequences.
    fn resolve(&self, path: &str) -> StorageResult<PathBuf> {
        let candidate = Path::new(path);
        let relative = candidate.strip_prefix(&self.base_path).map_err(|_| {
            StorageError::InvalidKey(format!(
                "Path {} is outside storage directory {}",
                path,
                self.base_path.display()
            ))
        })?;

        let relative = relative
            .to_str()
            .ok_or_else(|| StorageError::InvalidKey(format!("Path is not valid UTF-8: {}", path)))?;
        keys::validate_key(relative)?;

        Ok(candidate.to_path_buf())
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn save(&self, data: Bytes, filename: &str, directory: &str) -> StorageResult<String> {
        let key = keys::storage_key(directory, filename)?;
        let path = self.base_path.join(&key);
        let size = data.len();

        self.ensure_parent_dir(&path).await?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::SaveFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::SaveFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::SaveFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage save successful"
        );

        Ok(path.to_string_lossy().into_owned())
    }

    async fn load(&self, path: &str) -> StorageResult<Vec<u8>> {
        let resolved = self.resolve(path)?;
        let start = std::time::Instant::now();

        if !fs::try_exists(&resolved).await.unwrap_or(false) {
            return Err(StorageError::NotFound(path.to_string()));
        }

        let data = fs::read(&resolved).await.map_err(|e| {
            StorageError::LoadFailed(format!("Failed to read file {}: {}", resolved.display(), e))
        })?;

        tracing::debug!(
            path = %resolved.display(),
            size_bytes = data.len(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage load successful"
        );

        Ok(data)
    }

    async fn exists(&self, path: &str) -> bool {
        match self.resolve(path) {
            Ok(resolved) => fs::try_exists(&resolved).await.unwrap_or(false),
            Err(_) => false,
        }
    }

    async fn delete(&self, path: &str) -> bool {
        let resolved = match self.resolve(path) {
            Ok(resolved) => resolved,
            Err(e) => {
                tracing::warn!(path = %path, error = %e, "Refusing to delete invalid path");
                return false;
            }
        };
        let start = std::time::Instant::now();

        if !fs::try_exists(&resolved).await.unwrap_or(false) {
            return false;
        }

        if let Err(e) = fs::remove_file(&resolved).await {
            tracing::warn!(
                path = %resolved.display(),
                error = %e,
                "Local storage delete failed"
            );
            return false;
        }

        tracing::info!(
            path = %resolved.display(),
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage delete successful"
        );

        true
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
