//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("Load failed: {0}")]
    LoadFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage path: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// The image processor never touches the filesystem; processed bytes are handed
/// to an implementation of this trait.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Save `data` as `filename` inside `directory` and return its path.
    ///
    /// The directory is created if absent. An existing file with the same name
    /// is overwritten.
    async fn save(&self, data: Bytes, filename: &str, directory: &str) -> StorageResult<String>;

    /// Read a previously saved file.
    async fn load(&self, path: &str) -> StorageResult<Vec<u8>>;

    /// Check if a file exists. Invalid paths do not exist.
    async fn exists(&self, path: &str) -> bool;

    /// Delete a file.
    ///
    /// Returns `false` when the path does not exist, is invalid, or cannot be
    /// removed. Never errors.
    async fn delete(&self, path: &str) -> bool;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
