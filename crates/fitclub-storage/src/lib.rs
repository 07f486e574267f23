//! FitClub Storage Library
//!
//! This crate provides the storage abstraction that receives processed images,
//! with a local filesystem backend and an in-memory backend.
//!
//! # Path format
//!
//! Callers save a file under a `directory` with a `filename`. Both parts are
//! validated by the `keys` module: they must not contain `..` or start with `/`.
//! `save` returns the path that `load`, `exists` and `delete` accept:
//!
//! - **Local**: `{base_path}/{directory}/{filename}`
//! - **Memory**: `{directory}/{filename}`

pub mod factory;
pub(crate) mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-memory")]
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use fitclub_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryStorage;
pub use traits::{Storage, StorageError, StorageResult};
