//! Shared key generation for storage backends.
//!
//! Key format: `{directory}/{filename}`, or just `{filename}` when the directory is empty.

use crate::{StorageError, StorageResult};

fn check_component(kind: &str, value: &str) -> StorageResult<()> {
    if value.contains("..") || value.starts_with('/') || value.contains('\\') {
        return Err(StorageError::InvalidKey(format!(
            "{} contains invalid characters: {}",
            kind, value
        )));
    }
    Ok(())
}

/// Generate a storage key for the given directory and filename.
pub fn storage_key(directory: &str, filename: &str) -> StorageResult<String> {
    if filename.trim().is_empty() || filename.contains('/') {
        return Err(StorageError::InvalidKey(format!(
            "Invalid filename: {:?}",
            filename
        )));
    }
    check_component("Filename", filename)?;
    check_component("Directory", directory)?;

    let directory = directory.trim_end_matches('/');
    if directory.is_empty() {
        Ok(filename.to_string())
    } else {
        Ok(format!("{}/{}", directory, filename))
    }
}

/// Validate a key handed back by a caller (relative, no traversal).
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::InvalidKey("Empty storage path".to_string()));
    }
    check_component("Path", key)
}
