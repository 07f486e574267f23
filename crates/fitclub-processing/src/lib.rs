//! FitClub Processing Library
//!
//! Validation and transformation of fitness images (profile pictures, workout
//! photos, before/after progress comparisons), plus the upload pipeline that
//! hands processed bytes to a [`Storage`](fitclub_storage::Storage) backend.
//!
//! Every transform is a stateless function from input bytes to a JPEG buffer.
//! Environment-dependent capabilities (fonts) are injected as a
//! [`LabelRenderer`].

pub mod compression;
pub mod error;
pub mod image;
pub mod metadata;
pub mod naming;
pub mod pipeline;
pub mod validator;

// Re-export commonly used types
pub use compression::{encode_jpeg, JpegQuality};
pub use error::{ProcessingError, ProcessingResult};
pub use crate::image::{
    load_label_renderer, BitmapLabelRenderer, FontLabelRenderer, ImageProcessor, LabelError,
    LabelRenderer, Size, WatermarkStyle,
};
pub use metadata::ImageMetadata;
pub use naming::{generate_filename, generate_filename_at, ImageKind};
pub use pipeline::{MediaPipeline, StoredImage, StoredWorkout};
pub use validator::{ImageValidator, ValidationError, ValidationOutcome};
