//! FitClub Core Library
//!
//! This crate provides the configuration, error types and constants shared by
//! the FitClub media crates.

pub mod config;
pub mod constants;
pub mod error;
pub mod storage_types;

// Re-export commonly used types
pub use config::MediaConfig;
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use storage_types::StorageBackend;
