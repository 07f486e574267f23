//! Image processor - stateless fitness image transforms
//!
//! Each operation decodes its own input, so calling one directly on bytes
//! that never went through [`ImageProcessor::validate`] fails with a
//! [`ProcessingError::Decode`] naming the operation instead of panicking.

use crate::compression::{encode_jpeg, JpegQuality};
use crate::error::{ProcessingError, ProcessingResult};
use crate::image::label::LabelRenderer;
use crate::image::resize::{self, Size};
use crate::image::watermark::WatermarkStyle;
use crate::metadata::ImageMetadata;
use crate::validator::{ImageValidator, ValidationError, ValidationOutcome};
use bytes::Bytes;
use image::{imageops, DynamicImage, ImageReader, Rgb, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;
use std::io::Cursor;

pub const PROFILE_SIZE: Size = Size::square(200);
pub const THUMBNAIL_SIZE: Size = Size::square(150);
pub const WORKOUT_MAX_SIZE: Size = Size::new(800, 600);

pub const COMPARISON_HEIGHT: u32 = 400;
pub const COMPARISON_GAP: u32 = 20;
pub const COMPARISON_HEADER: u32 = 60;
/// Widest a single side of a comparison may be after scaling
pub const COMPARISON_MAX_SIDE_WIDTH: u32 = 1600;
const SEPARATOR_WIDTH: u32 = 2;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const SEPARATOR_COLOR: Rgba<u8> = Rgba([200, 200, 200, 255]);
const LABEL_COLOR: Rgba<u8> = Rgba([0, 0, 0, 255]);

pub struct ImageProcessor;

impl ImageProcessor {
    /// Validate with the default limits (10 MiB, 4000x4000, JPEG/PNG/WebP/BMP)
    pub fn validate(data: &[u8]) -> Result<ImageMetadata, ValidationError> {
        ImageValidator::default().validate(data)
    }

    /// `(ok, reason)` form of [`ImageProcessor::validate`]
    pub fn check(data: &[u8]) -> ValidationOutcome {
        ValidationOutcome::from(&Self::validate(data))
    }

    /// Square profile picture: aspect-fill to exactly `target`, center crop
    pub fn resize_profile(data: &[u8], target: Size) -> ProcessingResult<Bytes> {
        const OP: &str = "resize_profile";
        check_target(target, OP)?;
        let img = decode(data, OP)?;

        let resized = resize::fill(&img, target);
        tracing::debug!(
            from_width = img.width(),
            from_height = img.height(),
            width = target.width,
            height = target.height,
            "Profile picture resized"
        );

        encode_jpeg(&resized, JpegQuality::PROFILE).map_err(|e| ProcessingError::transform(OP, e))
    }

    /// Thumbnail letterboxed onto a white `target` canvas
    ///
    /// The source is shrunk to fit (never enlarged) and centered, so the whole
    /// image stays visible.
    pub fn create_thumbnail(data: &[u8], target: Size) -> ProcessingResult<Bytes> {
        const OP: &str = "create_thumbnail";
        check_target(target, OP)?;
        let img = decode(data, OP)?;

        let scaled = resize::shrink_to_fit(&img, target);
        let mut canvas = RgbImage::from_pixel(target.width, target.height, BACKGROUND);
        let x = (target.width - scaled.width()) / 2;
        let y = (target.height - scaled.height()) / 2;
        imageops::replace(&mut canvas, &scaled, x as i64, y as i64);

        tracing::debug!(
            content_width = scaled.width(),
            content_height = scaled.height(),
            offset_x = x,
            offset_y = y,
            "Thumbnail created"
        );

        encode_jpeg(&canvas, JpegQuality::THUMBNAIL).map_err(|e| ProcessingError::transform(OP, e))
    }

    /// Workout photo shrunk to `max_size`, optionally watermarked
    ///
    /// A failing watermark renderer does not fail the call: the photo is
    /// returned without the watermark and a warning is logged.
    pub fn process_workout_photo(
        data: &[u8],
        max_size: Size,
        watermark: Option<&dyn LabelRenderer>,
    ) -> ProcessingResult<Bytes> {
        Self::process_workout_photo_with_style(data, max_size, watermark, &WatermarkStyle::default())
    }

    pub fn process_workout_photo_with_style(
        data: &[u8],
        max_size: Size,
        watermark: Option<&dyn LabelRenderer>,
        style: &WatermarkStyle,
    ) -> ProcessingResult<Bytes> {
        const OP: &str = "process_workout_photo";
        check_target(max_size, OP)?;
        let img = decode(data, OP)?;

        let mut photo = resize::shrink_to_fit(&img, max_size);

        if let Some(renderer) = watermark {
            match style.apply(&photo, renderer) {
                Ok(marked) => photo = marked,
                Err(e) => {
                    tracing::warn!(
                        error = %e,
                        width = photo.width(),
                        height = photo.height(),
                        "Watermark failed, storing workout photo without it"
                    );
                }
            }
        }

        encode_jpeg(&photo, JpegQuality::WORKOUT).map_err(|e| ProcessingError::transform(OP, e))
    }

    /// Side-by-side before/after composite with a labelled header
    ///
    /// Both images are scaled to [`COMPARISON_HEIGHT`] independently, so
    /// their widths may differ. A side wider than
    /// [`COMPARISON_MAX_SIDE_WIDTH`] after scaling is center-cropped to it.
    /// Label failures are errors here.
    pub fn create_progress_comparison(
        before: &[u8],
        after: &[u8],
        labels: &dyn LabelRenderer,
    ) -> ProcessingResult<Bytes> {
        const OP: &str = "create_progress_comparison";
        let before = decode(before, "create_progress_comparison(before)")?;
        let after = decode(after, "create_progress_comparison(after)")?;

        let before =
            resize::scale_to_height_capped(&before, COMPARISON_HEIGHT, COMPARISON_MAX_SIDE_WIDTH);
        let after =
            resize::scale_to_height_capped(&after, COMPARISON_HEIGHT, COMPARISON_MAX_SIDE_WIDTH);
        let (before_width, after_width) = (before.width(), after.width());

        let width = before_width + COMPARISON_GAP + after_width;
        let height = COMPARISON_HEIGHT + COMPARISON_HEADER;
        let after_x = before_width + COMPARISON_GAP;

        let mut canvas = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
        imageops::replace(
            &mut canvas,
            &DynamicImage::ImageRgb8(before).to_rgba8(),
            0,
            COMPARISON_HEADER as i64,
        );
        imageops::replace(
            &mut canvas,
            &DynamicImage::ImageRgb8(after).to_rgba8(),
            after_x as i64,
            COMPARISON_HEADER as i64,
        );

        let separator_x = before_width + (COMPARISON_GAP - SEPARATOR_WIDTH) / 2;
        draw_filled_rect_mut(
            &mut canvas,
            Rect::at(separator_x as i32, COMPARISON_HEADER as i32)
                .of_size(SEPARATOR_WIDTH, COMPARISON_HEIGHT),
            SEPARATOR_COLOR,
        );

        for (text, left, span) in [("BEFORE", 0, before_width), ("AFTER", after_x, after_width)] {
            let (text_width, text_height) = labels
                .measure(text)
                .map_err(|e| ProcessingError::transform(OP, e))?;
            let x = left as i64 + (span as i64 - text_width as i64) / 2;
            let y = (COMPARISON_HEADER as i64 - text_height as i64) / 2;
            labels
                .draw(&mut canvas, text, x as i32, y.max(0) as i32, LABEL_COLOR)
                .map_err(|e| ProcessingError::transform(OP, e))?;
        }

        tracing::debug!(
            width = width,
            height = height,
            before_width = before_width,
            after_width = after_width,
            "Progress comparison composed"
        );

        let canvas = DynamicImage::ImageRgba8(canvas).to_rgb8();
        encode_jpeg(&canvas, JpegQuality::COMPARISON).map_err(|e| ProcessingError::transform(OP, e))
    }
}

fn check_target(target: Size, operation: &'static str) -> ProcessingResult<()> {
    if target.width == 0 || target.height == 0 {
        return Err(ProcessingError::transform(
            operation,
            format!("target size {}x{} is empty", target.width, target.height),
        ));
    }
    Ok(())
}

/// Decode any supported format, reporting failures against `operation`
fn decode(data: &[u8], operation: &'static str) -> ProcessingResult<DynamicImage> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ProcessingError::decode(operation, e))?
        .decode()
        .map_err(|e| ProcessingError::decode(operation, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::bitmap_font::BitmapLabelRenderer;
    use image::{GrayImage, ImageFormat, Luma};

    fn png(img: DynamicImage) -> Vec<u8> {
        let mut buffer = Vec::new();
        img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
            .unwrap();
        buffer
    }

    fn solid(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        png(DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color))))
    }

    fn dimensions(data: &[u8]) -> (u32, u32) {
        let img = image::load_from_memory_with_format(data, ImageFormat::Jpeg).unwrap();
        (img.width(), img.height())
    }

    #[test]
    fn test_decode_error_names_operation() {
        let err = ImageProcessor::create_thumbnail(b"garbage", THUMBNAIL_SIZE).unwrap_err();
        assert!(matches!(err, ProcessingError::Decode { .. }));
        assert_eq!(err.operation(), Some("create_thumbnail"));
    }

    #[test]
    fn test_resize_profile_accepts_grayscale() {
        let gray = png(DynamicImage::ImageLuma8(GrayImage::from_pixel(300, 120, Luma([90]))));
        let out = ImageProcessor::resize_profile(&gray, PROFILE_SIZE).unwrap();
        assert_eq!(dimensions(&out), (200, 200));
    }

    #[test]
    fn test_resize_profile_drops_alpha() {
        let rgba = png(DynamicImage::ImageRgba8(RgbaImage::from_pixel(
            64,
            64,
            Rgba([255, 0, 0, 10]),
        )));
        let out = ImageProcessor::resize_profile(&rgba, Size::square(32)).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.color(), image::ColorType::Rgb8);
    }

    #[test]
    fn test_thumbnail_centers_small_image_without_enlarging() {
        let out = ImageProcessor::create_thumbnail(&solid(50, 30, [0, 0, 0]), THUMBNAIL_SIZE).unwrap();
        let img = image::load_from_memory(&out).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (150, 150));

        // Content occupies (50..100, 60..90); the corners stay white
        assert!(img.get_pixel(0, 0)[0] > 240);
        assert!(img.get_pixel(149, 149)[0] > 240);
        assert!(img.get_pixel(75, 75)[0] < 20);
        assert!(img.get_pixel(30, 75)[0] > 240);
    }

    #[test]
    fn test_workout_photo_without_watermark_keeps_size() {
        let out =
            ImageProcessor::process_workout_photo(&solid(640, 480, [10, 20, 30]), WORKOUT_MAX_SIZE, None)
                .unwrap();
        assert_eq!(dimensions(&out), (640, 480));
    }

    #[test]
    fn test_comparison_layout() {
        let labels = BitmapLabelRenderer::with_scale(3);
        let out = ImageProcessor::create_progress_comparison(
            &solid(300, 400, [200, 0, 0]),
            &solid(200, 100, [0, 0, 200]),
            &labels,
        )
        .unwrap();

        // before stays 300 wide, after scales to 800x400
        let img = image::load_from_memory(&out).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (300 + 20 + 800, 460));

        // separator in the middle of the gap, white elsewhere in the gap
        let separator = img.get_pixel(300 + 9, 260);
        assert!(separator[0] < 235);
        assert!(img.get_pixel(302, 260)[0] > 235);

        // halves at the right place
        let before = img.get_pixel(150, 260);
        assert!(before[0] > 150 && before[2] < 60);
        let after = img.get_pixel(320 + 400, 260);
        assert!(after[2] > 150 && after[0] < 60);
    }

    #[test]
    fn test_zero_target_rejected() {
        let data = solid(10, 10, [0, 0, 0]);

        let err = ImageProcessor::create_thumbnail(&data, Size::square(0)).unwrap_err();
        assert!(matches!(err, ProcessingError::Transform { .. }));
        assert_eq!(err.operation(), Some("create_thumbnail"));

        let err = ImageProcessor::resize_profile(&data, Size::new(200, 0)).unwrap_err();
        assert_eq!(err.operation(), Some("resize_profile"));

        let err = ImageProcessor::process_workout_photo(&data, Size::new(0, 600), None).unwrap_err();
        assert_eq!(err.operation(), Some("process_workout_photo"));
    }

    #[test]
    fn test_comparison_caps_panoramic_side() {
        let labels = BitmapLabelRenderer::default();
        let out = ImageProcessor::create_progress_comparison(
            &solid(4000, 1, [200, 0, 0]),
            &solid(300, 400, [0, 0, 200]),
            &labels,
        )
        .unwrap();
        assert_eq!(
            dimensions(&out),
            (COMPARISON_MAX_SIDE_WIDTH + COMPARISON_GAP + 300, 460)
        );
    }

    #[test]
    fn test_comparison_decode_error_names_side() {
        let labels = BitmapLabelRenderer::default();
        let err = ImageProcessor::create_progress_comparison(&solid(10, 10, [0, 0, 0]), b"nope", &labels)
            .unwrap_err();
        assert_eq!(err.operation(), Some("create_progress_comparison(after)"));
    }

    #[test]
    fn test_check_outcome() {
        assert!(ImageProcessor::check(&solid(10, 10, [1, 1, 1])).ok);
        assert!(!ImageProcessor::check(&[]).ok);
    }
}
