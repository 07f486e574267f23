//! Resize geometry

use image::imageops::FilterType;
use image::{DynamicImage, RgbImage};

/// Target box in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn square(side: u32) -> Self {
        Self::new(side, side)
    }
}

/// Largest size with the source aspect ratio that fits inside `max`.
///
/// Never upsizes: a source already inside the box is returned unchanged.
/// Each side is at least 1 pixel.
pub fn fit_within(src_width: u32, src_height: u32, max: Size) -> (u32, u32) {
    if src_width <= max.width && src_height <= max.height {
        return (src_width, src_height);
    }

    let ratio = f64::min(
        max.width as f64 / src_width as f64,
        max.height as f64 / src_height as f64,
    );

    let width = ((src_width as f64 * ratio).round() as u32).clamp(1, max.width.max(1));
    let height = ((src_height as f64 * ratio).round() as u32).clamp(1, max.height.max(1));
    (width, height)
}

/// Width that keeps the aspect ratio when scaling to `target_height`
pub fn width_for_height(src_width: u32, src_height: u32, target_height: u32) -> u32 {
    let scaled = src_width as f64 * target_height as f64 / src_height.max(1) as f64;
    (scaled.round() as u32).max(1)
}

/// Aspect-fill to exactly `target`, center-cropping the overflow
pub fn fill(img: &DynamicImage, target: Size) -> RgbImage {
    img.resize_to_fill(target.width, target.height, FilterType::Lanczos3)
        .to_rgb8()
}

/// Shrink to fit inside `max`; images already inside are only normalized to RGB8
pub fn shrink_to_fit(img: &DynamicImage, max: Size) -> RgbImage {
    let (width, height) = fit_within(img.width(), img.height(), max);
    if (width, height) == (img.width(), img.height()) {
        return img.to_rgb8();
    }

    tracing::debug!(
        from_width = img.width(),
        from_height = img.height(),
        to_width = width,
        to_height = height,
        "Shrinking image to fit"
    );

    img.resize_exact(width, height, FilterType::Lanczos3).to_rgb8()
}

/// Scale to `target_height`, preserving aspect ratio (up or down)
pub fn scale_to_height(img: &DynamicImage, target_height: u32) -> RgbImage {
    let width = width_for_height(img.width(), img.height(), target_height);
    if (width, target_height) == (img.width(), img.height()) {
        return img.to_rgb8();
    }
    img.resize_exact(width, target_height, FilterType::Lanczos3)
        .to_rgb8()
}

/// Scale to `target_height` like [`scale_to_height`], but never wider than
/// `max_width`
///
/// Sources that would come out wider are center-cropped before resizing, so
/// the intermediate buffer is bounded by `max_width` as well.
pub fn scale_to_height_capped(img: &DynamicImage, target_height: u32, max_width: u32) -> RgbImage {
    let width = width_for_height(img.width(), img.height(), target_height);
    if width <= max_width {
        return scale_to_height(img, target_height);
    }

    let crop_width = (max_width as f64 * img.height() as f64 / target_height.max(1) as f64).round()
        as u32;
    let crop_width = crop_width.clamp(1, img.width());
    let x = (img.width() - crop_width) / 2;

    tracing::debug!(
        from_width = img.width(),
        from_height = img.height(),
        crop_width = crop_width,
        max_width = max_width,
        "Cropping wide image before scaling"
    );

    img.crop_imm(x, 0, crop_width, img.height())
        .resize_exact(max_width, target_height, FilterType::Lanczos3)
        .to_rgb8()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_fit_within_keeps_small_images() {
        assert_eq!(fit_within(100, 80, Size::new(800, 600)), (100, 80));
        assert_eq!(fit_within(800, 600, Size::new(800, 600)), (800, 600));
    }

    #[test]
    fn test_fit_within_landscape() {
        assert_eq!(fit_within(1200, 900, Size::new(800, 600)), (800, 600));
        assert_eq!(fit_within(1600, 600, Size::new(800, 600)), (800, 300));
    }

    #[test]
    fn test_fit_within_portrait() {
        assert_eq!(fit_within(300, 600, Size::square(150)), (75, 150));
        assert_eq!(fit_within(900, 1200, Size::new(800, 600)), (450, 600));
    }

    #[test]
    fn test_fit_within_extreme_aspect_keeps_one_pixel() {
        assert_eq!(fit_within(4000, 1, Size::square(150)), (150, 1));
        assert_eq!(fit_within(1, 4000, Size::square(150)), (1, 150));
    }

    #[test]
    fn test_width_for_height() {
        assert_eq!(width_for_height(800, 600, 400), 533);
        assert_eq!(width_for_height(300, 300, 400), 400);
        assert_eq!(width_for_height(1, 4000, 400), 1);
    }

    #[test]
    fn test_fill_is_exact() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(640, 360, Rgb([1, 2, 3])));
        let out = fill(&img, Size::square(200));
        assert_eq!(out.dimensions(), (200, 200));
    }

    #[test]
    fn test_shrink_to_fit_never_upsizes() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(20, 10));
        assert_eq!(shrink_to_fit(&img, Size::square(150)).dimensions(), (20, 10));
    }

    #[test]
    fn test_scale_to_height_upsizes() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(100, 50));
        assert_eq!(scale_to_height(&img, 400).dimensions(), (800, 400));
    }

    #[test]
    fn test_scale_to_height_capped_leaves_normal_images_alone() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(100, 50));
        assert_eq!(scale_to_height_capped(&img, 400, 1600).dimensions(), (800, 400));
    }

    #[test]
    fn test_scale_to_height_capped_crops_panoramas() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(4000, 1));
        assert_eq!(scale_to_height_capped(&img, 400, 1600).dimensions(), (1600, 400));

        let img = DynamicImage::ImageRgb8(RgbImage::new(4000, 20));
        assert_eq!(scale_to_height_capped(&img, 400, 1600).dimensions(), (1600, 400));
    }

    #[test]
    fn test_scale_to_height_capped_keeps_center() {
        // left and right thirds red, middle third green
        let mut img = RgbImage::from_pixel(3000, 10, Rgb([255, 0, 0]));
        for x in 1000..2000 {
            for y in 0..10 {
                img.put_pixel(x, y, Rgb([0, 255, 0]));
            }
        }
        let out = scale_to_height_capped(&DynamicImage::ImageRgb8(img), 400, 1600);
        let center = out.get_pixel(800, 200);
        assert!(center[1] > 200 && center[0] < 50);
    }
}
