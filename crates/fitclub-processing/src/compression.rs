//! JPEG output encoding
//!
//! Every transform re-encodes to baseline JPEG from an RGB8 buffer, whatever
//! the input codec was. Only the quality differs per operation.

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

/// JPEG quality (1-100)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JpegQuality(u8);

impl JpegQuality {
    pub const PROFILE: JpegQuality = JpegQuality(85);
    pub const THUMBNAIL: JpegQuality = JpegQuality(80);
    pub const WORKOUT: JpegQuality = JpegQuality(85);
    pub const COMPARISON: JpegQuality = JpegQuality(90);

    pub fn value(self) -> u8 {
        self.0
    }
}

/// Encode an RGB image as JPEG
pub fn encode_jpeg(img: &RgbImage, quality: JpegQuality) -> Result<Bytes, image::ImageError> {
    let (width, height) = img.dimensions();
    let estimated_size = (width as usize * height as usize) / 4;
    let mut buffer = Vec::with_capacity(estimated_size);

    let mut encoder = JpegEncoder::new_with_quality(&mut buffer, quality.value());
    encoder.encode_image(img)?;

    tracing::debug!(
        width = width,
        height = height,
        quality = quality.value(),
        size_bytes = buffer.len(),
        "Encoded JPEG"
    );

    Ok(Bytes::from(buffer))
}
