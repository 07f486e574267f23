use crate::metadata::ImageMetadata;
use fitclub_core::constants::{MAX_IMAGE_DIMENSION, MAX_IMAGE_SIZE_MB};
use fitclub_core::MediaConfig;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;

/// Reasons an upload is rejected before any transform
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty file")]
    EmptyFile,

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Unsupported image format: {format} (allowed: {allowed})")]
    UnsupportedFormat { format: String, allowed: String },

    #[error("Image dimensions too large: {width}x{height} (max: {max}x{max})")]
    DimensionsTooLarge { width: u32, height: u32, max: u32 },

    #[error("Invalid image file: {0}")]
    Undecodable(String),
}

/// Image upload validator
///
/// The mandatory first gate before any transform. Never panics on malformed
/// input; decode problems are reported as [`ValidationError::Undecodable`].
#[derive(Debug, Clone)]
pub struct ImageValidator {
    max_file_size: usize,
    max_dimension: u32,
    allowed_formats: Vec<ImageFormat>,
}

impl Default for ImageValidator {
    fn default() -> Self {
        Self::new(
            MAX_IMAGE_SIZE_MB * 1024 * 1024,
            MAX_IMAGE_DIMENSION,
            Self::supported_formats(),
        )
    }
}

impl ImageValidator {
    pub fn new(max_file_size: usize, max_dimension: u32, allowed_formats: Vec<ImageFormat>) -> Self {
        Self {
            max_file_size,
            max_dimension,
            allowed_formats,
        }
    }

    pub fn from_config(config: &MediaConfig) -> Self {
        Self::new(
            config.max_file_size_bytes,
            config.max_dimension,
            Self::supported_formats(),
        )
    }

    /// Formats the processor accepts
    pub fn supported_formats() -> Vec<ImageFormat> {
        vec![
            ImageFormat::Jpeg,
            ImageFormat::Png,
            ImageFormat::WebP,
            ImageFormat::Bmp,
        ]
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub fn max_dimension(&self) -> u32 {
        self.max_dimension
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        Ok(())
    }

    /// Validate detected format
    pub fn validate_format(&self, format: ImageFormat) -> Result<(), ValidationError> {
        if !self.allowed_formats.contains(&format) {
            return Err(ValidationError::UnsupportedFormat {
                format: format!("{:?}", format),
                allowed: self
                    .allowed_formats
                    .iter()
                    .map(|f| format!("{:?}", f))
                    .collect::<Vec<_>>()
                    .join(", "),
            });
        }

        Ok(())
    }

    /// Validate pixel dimensions
    pub fn validate_dimensions(&self, width: u32, height: u32) -> Result<(), ValidationError> {
        if width > self.max_dimension || height > self.max_dimension {
            return Err(ValidationError::DimensionsTooLarge {
                width,
                height,
                max: self.max_dimension,
            });
        }

        Ok(())
    }

    /// Validate an uploaded buffer and describe it
    ///
    /// Order: size, format, header dimensions, full decode. Dimensions are
    /// read from the header so oversized images are rejected without
    /// allocating their pixels.
    pub fn validate(&self, data: &[u8]) -> Result<ImageMetadata, ValidationError> {
        self.validate_file_size(data.len())?;

        let format = ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| ValidationError::Undecodable(e.to_string()))?
            .format()
            .ok_or_else(|| ValidationError::Undecodable("unrecognized image format".to_string()))?;
        self.validate_format(format)?;

        let (width, height) = ImageReader::with_format(Cursor::new(data), format)
            .into_dimensions()
            .map_err(|e| ValidationError::Undecodable(e.to_string()))?;
        self.validate_dimensions(width, height)?;

        ImageReader::with_format(Cursor::new(data), format)
            .decode()
            .map_err(|e| ValidationError::Undecodable(e.to_string()))?;

        tracing::debug!(
            format = ?format,
            width = width,
            height = height,
            size_bytes = data.len(),
            "Image validated"
        );

        Ok(ImageMetadata {
            width,
            height,
            format: format!("{:?}", format),
            size_bytes: data.len() as u64,
        })
    }
}

/// `(ok, reason)` view of a validation result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub ok: bool,
    pub reason: String,
}

impl From<&Result<ImageMetadata, ValidationError>> for ValidationOutcome {
    fn from(result: &Result<ImageMetadata, ValidationError>) -> Self {
        match result {
            Ok(_) => ValidationOutcome {
                ok: true,
                reason: "Image is valid".to_string(),
            },
            Err(e) => ValidationOutcome {
                ok: false,
                reason: e.to_string(),
            },
        }
    }
}
