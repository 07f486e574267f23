//! Processing error taxonomy
//!
//! Validation failures are raised before any transform. Decode failures name
//! the operation that could not read its input. Transform failures cover
//! everything after a successful decode (encoding, label rendering, blocking
//! task failures).

use crate::validator::ValidationError;
use fitclub_core::AppError;
use fitclub_storage::StorageError;
use std::fmt::Display;

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("{operation}: failed to decode image: {message}")]
    Decode {
        operation: &'static str,
        message: String,
    },

    #[error("{operation}: {message}")]
    Transform {
        operation: &'static str,
        message: String,
    },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type ProcessingResult<T> = Result<T, ProcessingError>;

impl ProcessingError {
    pub fn decode(operation: &'static str, err: impl Display) -> Self {
        ProcessingError::Decode {
            operation,
            message: err.to_string(),
        }
    }

    pub fn transform(operation: &'static str, err: impl Display) -> Self {
        ProcessingError::Transform {
            operation,
            message: err.to_string(),
        }
    }

    /// Name of the failing operation, if the error came from a transform
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            ProcessingError::Decode { operation, .. }
            | ProcessingError::Transform { operation, .. } => Some(operation),
            _ => None,
        }
    }
}

impl From<ProcessingError> for AppError {
    fn from(err: ProcessingError) -> Self {
        match err {
            ProcessingError::Validation(ValidationError::FileTooLarge { .. }) => {
                AppError::PayloadTooLarge(err.to_string())
            }
            ProcessingError::Validation(e) => AppError::ImageValidation(e.to_string()),
            ProcessingError::Decode { .. } => AppError::ImageDecode(err.to_string()),
            ProcessingError::Transform { .. } => AppError::ImageProcessing(err.to_string()),
            ProcessingError::Storage(StorageError::NotFound(path)) => AppError::NotFound(path),
            ProcessingError::Storage(e @ StorageError::ConfigError(_)) => {
                AppError::from(anyhow::Error::new(e))
            }
            ProcessingError::Storage(e) => AppError::Storage(e.to_string()),
        }
    }
}
