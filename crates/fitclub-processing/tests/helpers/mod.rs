//! Test helpers for fitclub-processing integration tests.
//!
//! Run from workspace root: `cargo test -p fitclub-processing`.

#![allow(dead_code)]

pub mod fixtures;

use fitclub_processing::{LabelError, LabelRenderer};
use image::{Rgba, RgbaImage};

/// Renderer that behaves like a host without usable fonts
pub struct FailingRenderer;

impl LabelRenderer for FailingRenderer {
    fn measure(&self, _text: &str) -> Result<(u32, u32), LabelError> {
        Err(LabelError::FontUnavailable("no fonts in test".to_string()))
    }

    fn draw(
        &self,
        _canvas: &mut RgbaImage,
        _text: &str,
        _x: i32,
        _y: i32,
        _color: Rgba<u8>,
    ) -> Result<(), LabelError> {
        Err(LabelError::Render("no fonts in test".to_string()))
    }
}

/// Decode an output buffer, asserting it is a JPEG
pub fn decode_jpeg(data: &[u8]) -> image::RgbImage {
    assert_eq!(
        image::guess_format(data).expect("recognizable output"),
        image::ImageFormat::Jpeg
    );
    image::load_from_memory(data)
        .expect("decodable output")
        .to_rgb8()
}
