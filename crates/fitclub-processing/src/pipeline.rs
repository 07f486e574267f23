//! Upload pipeline: validate → process → store.
//!
//! Validation always runs first and short-circuits before any transform.
//! Decoding and encoding are CPU-bound, so each upload's image work runs in
//! a single `spawn_blocking` task and only the storage calls run on the
//! async pool.

use bytes::Bytes;
use image::{ImageFormat, ImageReader};
use serde::Serialize;
use std::fmt::Display;
use std::io::Cursor;
use std::sync::Arc;

use fitclub_core::MediaConfig;
use fitclub_storage::{create_storage, Storage};

use crate::error::{ProcessingError, ProcessingResult};
use crate::image::processor::{PROFILE_SIZE, THUMBNAIL_SIZE, WORKOUT_MAX_SIZE};
use crate::image::{load_label_renderer, ImageProcessor, LabelRenderer};
use crate::metadata::ImageMetadata;
use crate::naming::{generate_filename, ImageKind};
use crate::validator::ImageValidator;

/// Pixel height of the workout watermark text
pub const WATERMARK_FONT_PX: f32 = 20.0;
/// Pixel height of the BEFORE/AFTER labels
pub const COMPARISON_FONT_PX: f32 = 30.0;

/// A processed image that has been written to storage
#[derive(Debug, Clone, Serialize)]
pub struct StoredImage {
    pub kind: ImageKind,
    pub filename: String,
    /// Path returned by the storage backend; pass it to `remove`
    pub path: String,
    pub width: u32,
    pub height: u32,
    pub size_bytes: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoredWorkout {
    pub photo: StoredImage,
    pub thumbnail: StoredImage,
    /// Description of the upload as received
    pub source: ImageMetadata,
}

pub struct MediaPipeline {
    storage: Arc<dyn Storage>,
    validator: ImageValidator,
    labels: Arc<dyn LabelRenderer>,
    watermark_labels: Arc<dyn LabelRenderer>,
    watermark_enabled: bool,
}

impl MediaPipeline {
    /// Pipeline with watermarking on, using `labels` for both the watermark
    /// and comparison headers
    pub fn new(
        storage: Arc<dyn Storage>,
        validator: ImageValidator,
        labels: Arc<dyn LabelRenderer>,
    ) -> Self {
        Self {
            storage,
            validator,
            watermark_labels: labels.clone(),
            labels,
            watermark_enabled: true,
        }
    }

    /// Build storage, validator and label renderers from configuration
    pub async fn from_config(config: &MediaConfig) -> ProcessingResult<Self> {
        let storage = create_storage(config).await?;
        let validator = ImageValidator::from_config(config);
        let labels = load_label_renderer(&config.font_paths, COMPARISON_FONT_PX);
        let watermark_labels = load_label_renderer(&config.font_paths, WATERMARK_FONT_PX);

        tracing::info!(
            backend = %storage.backend_type(),
            max_file_size = validator.max_file_size(),
            max_dimension = validator.max_dimension(),
            watermark_enabled = config.watermark_enabled,
            "Media pipeline initialized"
        );

        Ok(Self::new(storage, validator, labels)
            .with_watermark_labels(watermark_labels)
            .with_watermark_enabled(config.watermark_enabled))
    }

    pub fn with_watermark_labels(mut self, renderer: Arc<dyn LabelRenderer>) -> Self {
        self.watermark_labels = renderer;
        self
    }

    pub fn with_watermark_enabled(mut self, enabled: bool) -> Self {
        self.watermark_enabled = enabled;
        self
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    /// Validate, crop to a 200x200 square and store under `profiles/`
    pub async fn store_profile_picture(
        &self,
        owner_id: impl Display,
        data: Bytes,
    ) -> ProcessingResult<StoredImage> {
        let validator = self.validator.clone();
        let processed = run_blocking("resize_profile", move || {
            validator.validate(&data)?;
            ImageProcessor::resize_profile(&data, PROFILE_SIZE)
        })
        .await?;

        let stored = self.save(owner_id, ImageKind::Profile, processed).await?;
        tracing::info!(path = %stored.path, size_bytes = stored.size_bytes, "Profile picture stored");
        Ok(stored)
    }

    /// Validate, shrink and watermark a workout photo, then store it under
    /// `workouts/` with a thumbnail under `thumbnails/`
    ///
    /// If the thumbnail cannot be saved the photo is deleted again, so a
    /// workout is either stored completely or not at all.
    pub async fn store_workout_photo(
        &self,
        owner_id: impl Display,
        data: Bytes,
    ) -> ProcessingResult<StoredWorkout> {
        let validator = self.validator.clone();
        let watermark = self
            .watermark_enabled
            .then(|| self.watermark_labels.clone());

        let (source, photo, thumbnail) = run_blocking("process_workout_photo", move || {
            let source = validator.validate(&data)?;
            let photo =
                ImageProcessor::process_workout_photo(&data, WORKOUT_MAX_SIZE, watermark.as_deref())?;
            let thumbnail = ImageProcessor::create_thumbnail(&data, THUMBNAIL_SIZE)?;
            Ok((source, photo, thumbnail))
        })
        .await?;

        let owner_id = owner_id.to_string();
        let photo = self.save(&owner_id, ImageKind::Workout, photo).await?;
        let thumbnail = match self.save(&owner_id, ImageKind::Thumbnail, thumbnail).await {
            Ok(thumbnail) => thumbnail,
            Err(e) => {
                tracing::warn!(
                    path = %photo.path,
                    error = %e,
                    "Thumbnail save failed, removing workout photo"
                );
                self.storage.delete(&photo.path).await;
                return Err(e);
            }
        };

        tracing::info!(
            owner_id = %owner_id,
            photo = %photo.path,
            thumbnail = %thumbnail.path,
            source_width = source.width,
            source_height = source.height,
            "Workout photo stored"
        );

        Ok(StoredWorkout {
            photo,
            thumbnail,
            source,
        })
    }

    /// Validate both images, compose them and store under `progress/`
    pub async fn store_progress_comparison(
        &self,
        owner_id: impl Display,
        before: Bytes,
        after: Bytes,
    ) -> ProcessingResult<StoredImage> {
        let validator = self.validator.clone();
        let labels = self.labels.clone();
        let processed = run_blocking("create_progress_comparison", move || {
            validator.validate(&before)?;
            validator.validate(&after)?;
            ImageProcessor::create_progress_comparison(&before, &after, labels.as_ref())
        })
        .await?;

        let stored = self.save(owner_id, ImageKind::Progress, processed).await?;
        tracing::info!(path = %stored.path, size_bytes = stored.size_bytes, "Progress comparison stored");
        Ok(stored)
    }

    /// Delete a stored image; `false` if it was missing or the path is invalid
    pub async fn remove(&self, path: &str) -> bool {
        self.storage.delete(path).await
    }

    async fn save(
        &self,
        owner_id: impl Display,
        kind: ImageKind,
        data: Bytes,
    ) -> ProcessingResult<StoredImage> {
        let (width, height) = ImageReader::with_format(Cursor::new(&data[..]), ImageFormat::Jpeg)
            .into_dimensions()
            .map_err(|e| ProcessingError::transform("save", e))?;
        let filename = generate_filename(owner_id, kind);
        let size_bytes = data.len() as u64;
        let path = self.storage.save(data, &filename, kind.directory()).await?;

        Ok(StoredImage {
            kind,
            filename,
            path,
            width,
            height,
            size_bytes,
        })
    }
}

/// Run CPU-bound image work off the async pool
async fn run_blocking<T, F>(operation: &'static str, work: F) -> ProcessingResult<T>
where
    F: FnOnce() -> ProcessingResult<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|e| ProcessingError::transform(operation, e))?
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::BitmapLabelRenderer;
    use crate::validator::ValidationError;
    use fitclub_storage::MemoryStorage;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn jpeg(width: u32, height: u32) -> Bytes {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([90, 140, 60])));
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Jpeg)
            .unwrap();
        Bytes::from(buffer)
    }

    fn pipeline(storage: Arc<MemoryStorage>) -> MediaPipeline {
        MediaPipeline::new(
            storage,
            ImageValidator::default(),
            Arc::new(BitmapLabelRenderer::default()),
        )
    }

    #[tokio::test]
    async fn test_profile_picture_saved_under_profiles() {
        let storage = Arc::new(MemoryStorage::new());
        let stored = pipeline(storage.clone())
            .store_profile_picture(42, jpeg(640, 480))
            .await
            .unwrap();

        assert!(stored.path.starts_with("profiles/profile_42_"));
        assert_eq!(stored.kind, ImageKind::Profile);
        assert_eq!((stored.width, stored.height), (200, 200));
        assert!(storage.exists(&stored.path).await);
    }

    #[tokio::test]
    async fn test_invalid_upload_stores_nothing() {
        let storage = Arc::new(MemoryStorage::new());
        let err = pipeline(storage.clone())
            .store_workout_photo(42, Bytes::from_static(b"not an image"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ProcessingError::Validation(ValidationError::Undecodable(_))
        ));
        assert!(storage.is_empty().await);
    }

    #[tokio::test]
    async fn test_remove_delegates_to_storage() {
        let storage = Arc::new(MemoryStorage::new());
        let pipeline = pipeline(storage.clone());
        let stored = pipeline
            .store_profile_picture("7", jpeg(100, 100))
            .await
            .unwrap();

        assert!(pipeline.remove(&stored.path).await);
        assert!(!pipeline.remove(&stored.path).await);
        assert!(storage.is_empty().await);
    }

    #[test]
    fn test_stored_image_serializes() {
        let stored = StoredImage {
            kind: ImageKind::Thumbnail,
            filename: "thumbnail_1_20260101000000_abcdef01.jpg".to_string(),
            path: "thumbnails/thumbnail_1_20260101000000_abcdef01.jpg".to_string(),
            width: 150,
            height: 150,
            size_bytes: 1234,
        };
        let json = serde_json::to_value(&stored).unwrap();
        assert_eq!(json["kind"], "thumbnail");
        assert_eq!(json["size_bytes"], 1234);
    }
}
