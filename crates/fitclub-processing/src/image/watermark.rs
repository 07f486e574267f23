use crate::image::label::{LabelError, LabelRenderer};
use fitclub_core::constants::WATERMARK_TEXT;
use image::{imageops, DynamicImage, RgbImage, Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

/// Text watermark appearance
#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkStyle {
    pub text: String,
    /// Space between the text and the edge of its backing box
    pub padding: u32,
    /// Distance from the right and bottom edges of the photo
    pub margin: u32,
    pub backing_color: Rgba<u8>,
    pub text_color: Rgba<u8>,
}

impl Default for WatermarkStyle {
    fn default() -> Self {
        Self {
            text: WATERMARK_TEXT.to_string(),
            padding: 5,
            margin: 10,
            backing_color: Rgba([0, 0, 0, 128]),
            text_color: Rgba([255, 255, 255, 180]),
        }
    }
}

impl WatermarkStyle {
    /// Top-left corner and size of the backing box on a `width`x`height` photo.
    ///
    /// The box hugs the bottom-right corner and is clamped to the photo's
    /// top-left when the photo is smaller than box plus margin.
    pub fn backing_rect(&self, width: u32, height: u32, text_size: (u32, u32)) -> (i32, i32, u32, u32) {
        let box_width = text_size.0 + 2 * self.padding;
        let box_height = text_size.1 + 2 * self.padding;

        let x = (width as i64 - box_width as i64 - self.margin as i64).max(0);
        let y = (height as i64 - box_height as i64 - self.margin as i64).max(0);

        (x as i32, y as i32, box_width, box_height)
    }

    /// Draw the watermark onto a copy of `img`
    ///
    /// Backing box and text go onto a transparent layer which is then
    /// alpha-composited over the photo.
    pub fn apply(&self, img: &RgbImage, renderer: &dyn LabelRenderer) -> Result<RgbImage, LabelError> {
        let (width, height) = img.dimensions();
        let text_size = renderer.measure(&self.text)?;
        let (x, y, box_width, box_height) = self.backing_rect(width, height, text_size);

        let mut layer = RgbaImage::new(width, height);
        draw_filled_rect_mut(
            &mut layer,
            Rect::at(x, y).of_size(box_width.max(1), box_height.max(1)),
            self.backing_color,
        );
        renderer.draw(
            &mut layer,
            &self.text,
            x + self.padding as i32,
            y + self.padding as i32,
            self.text_color,
        )?;

        let mut composed = DynamicImage::ImageRgb8(img.clone()).to_rgba8();
        imageops::overlay(&mut composed, &layer, 0, 0);

        tracing::debug!(
            text = %self.text,
            x = x,
            y = y,
            box_width = box_width,
            box_height = box_height,
            "Watermark applied"
        );

        Ok(DynamicImage::ImageRgba8(composed).to_rgb8())
    }
}
