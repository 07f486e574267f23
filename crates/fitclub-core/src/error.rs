//! Error types module
//!
//! All application-facing errors are unified under the `AppError` enum. Each
//! variant self-describes how it should be reported through [`ErrorMetadata`].

/// Severity an error is logged at by the host application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Warn,
    Error,
}

/// How an error is presented to clients and operators
pub trait ErrorMetadata {
    fn http_status_code(&self) -> u16;

    /// Stable code such as `IMAGE_VALIDATION_ERROR`
    fn error_code(&self) -> &'static str;

    /// True when the same request may succeed if retried
    fn is_recoverable(&self) -> bool;

    fn suggested_action(&self) -> Option<&'static str>;

    /// Message safe to show to the uploader
    fn client_message(&self) -> String;

    /// True when the internal message must not leave the server
    fn is_sensitive(&self) -> bool;

    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Image rejected: {0}")]
    ImageValidation(String),

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("Image decode error: {0}")]
    ImageDecode(String),

    #[error("Image processing error: {0}")]
    ImageProcessing(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
            source: err,
        }
    }
}

struct Presentation {
    status: u16,
    code: &'static str,
    recoverable: bool,
    action: Option<&'static str>,
    sensitive: bool,
    log_level: LogLevel,
}

const fn client_fault(status: u16, code: &'static str, action: &'static str) -> Presentation {
    Presentation {
        status,
        code,
        recoverable: false,
        action: Some(action),
        sensitive: false,
        log_level: LogLevel::Debug,
    }
}

const fn server_fault(code: &'static str, recoverable: bool, action: &'static str) -> Presentation {
    Presentation {
        status: 500,
        code,
        recoverable,
        action: Some(action),
        sensitive: true,
        log_level: LogLevel::Error,
    }
}

impl AppError {
    fn presentation(&self) -> Presentation {
        match self {
            AppError::ImageValidation(_) => client_fault(
                400,
                "IMAGE_VALIDATION_ERROR",
                "Upload a JPEG, PNG, WEBP or BMP image no larger than 4000x4000",
            ),
            AppError::PayloadTooLarge(_) => client_fault(
                413,
                "PAYLOAD_TOO_LARGE",
                "Reduce file size and upload again",
            ),
            AppError::ImageDecode(_) => Presentation {
                log_level: LogLevel::Warn,
                ..client_fault(
                    400,
                    "IMAGE_DECODE_ERROR",
                    "Check image format and try a different file",
                )
            },
            AppError::NotFound(_) => {
                client_fault(404, "NOT_FOUND", "Verify the file path exists")
            }
            AppError::ImageProcessing(_) => server_fault(
                "IMAGE_PROCESSING_ERROR",
                false,
                "Contact support if this error persists",
            ),
            AppError::Storage(_) => server_fault("STORAGE_ERROR", true, "Retry after a short delay"),
            AppError::Internal { .. } => {
                server_fault("INTERNAL_ERROR", false, "Check the server configuration")
            }
        }
    }
}

impl AppError {
    /// Variant name, for structured logs
    pub fn error_type(&self) -> &str {
        match self {
            AppError::ImageValidation(_) => "ImageValidation",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::ImageDecode(_) => "ImageDecode",
            AppError::ImageProcessing(_) => "ImageProcessing",
            AppError::Storage(_) => "Storage",
            AppError::NotFound(_) => "NotFound",
            AppError::Internal { .. } => "Internal",
        }
    }

    /// Display message followed by up to five `Caused by:` lines
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();
        let mut chain = std::iter::successors(self.source(), |&err| err.source());

        for err in chain.by_ref().take(5) {
            details.push_str(&format!("\n  Caused by: {}", err));
        }
        if chain.next().is_some() {
            details.push_str("\n  ... (truncated)");
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        self.presentation().status
    }

    fn error_code(&self) -> &'static str {
        self.presentation().code
    }

    fn is_recoverable(&self) -> bool {
        self.presentation().recoverable
    }

    fn suggested_action(&self) -> Option<&'static str> {
        self.presentation().action
    }

    fn is_sensitive(&self) -> bool {
        self.presentation().sensitive
    }

    fn log_level(&self) -> LogLevel {
        self.presentation().log_level
    }

    fn client_message(&self) -> String {
        match self {
            AppError::ImageValidation(msg)
            | AppError::PayloadTooLarge(msg)
            | AppError::ImageDecode(msg)
            | AppError::NotFound(msg) => msg.clone(),
            AppError::ImageProcessing(_) => "Failed to process image".to_string(),
            AppError::Storage(_) => "Failed to access storage".to_string(),
            AppError::Internal { .. } => "Internal server error".to_string(),
        }
    }
}
