//! Test fixtures: images generated in memory.

use flate2::write::ZlibEncoder;
use flate2::{Compression, Crc};
use image::{
    DynamicImage, GrayImage, ImageBuffer, ImageFormat, Luma, Rgb, RgbImage, Rgba, RgbaImage,
};
use std::io::{Cursor, Write};

pub const DARK: [u8; 3] = [40, 40, 40];

fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("fixture encodes");
    buffer
}

/// Solid-color image in the given format
pub fn solid(width: u32, height: u32, color: [u8; 3], format: ImageFormat) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb(color))),
        format,
    )
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    solid(width, height, DARK, ImageFormat::Jpeg)
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    solid(width, height, DARK, ImageFormat::Png)
}

/// Semi-transparent RGBA PNG
pub fn translucent_png(width: u32, height: u32) -> Vec<u8> {
    encode(
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([20, 200, 20, 90]))),
        ImageFormat::Png,
    )
}

pub fn grayscale_png(width: u32, height: u32) -> Vec<u8> {
    encode(
        DynamicImage::ImageLuma8(GrayImage::from_pixel(width, height, Luma([70]))),
        ImageFormat::Png,
    )
}

/// Horizontal gradient, so crops and offsets are visible in the output
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let img = RgbImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / width.max(1)) as u8;
        Rgb([v, v, v])
    });
    encode(DynamicImage::ImageRgb8(img), ImageFormat::Png)
}

/// 16 bits per channel, solid red
pub fn rgb16_png(width: u32, height: u32) -> Vec<u8> {
    let img: ImageBuffer<Rgb<u16>, Vec<u16>> =
        ImageBuffer::from_pixel(width, height, Rgb([u16::MAX, 0, 0]));
    encode(DynamicImage::ImageRgb16(img), ImageFormat::Png)
}

/// Palette PNG (color type 3): left half red, right half blue
///
/// The `image` encoder only writes direct-color PNGs, so the chunks are
/// assembled here.
pub fn indexed_png(width: u32, height: u32) -> Vec<u8> {
    let palette: [u8; 6] = [200, 30, 30, 30, 30, 200];

    let mut scanlines = Vec::with_capacity(((width + 1) * height) as usize);
    for _ in 0..height {
        scanlines.push(0); // filter type None
        scanlines.extend((0..width).map(|x| u8::from(x >= width / 2)));
    }
    let mut zlib = ZlibEncoder::new(Vec::new(), Compression::default());
    zlib.write_all(&scanlines).expect("scanlines compress");
    let idat = zlib.finish().expect("scanlines compress");

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&width.to_be_bytes());
    ihdr.extend_from_slice(&height.to_be_bytes());
    ihdr.extend_from_slice(&[8, 3, 0, 0, 0]);

    let mut png = b"\x89PNG\r\n\x1a\n".to_vec();
    let chunks: [(&[u8; 4], &[u8]); 4] = [
        (b"IHDR", &ihdr[..]),
        (b"PLTE", &palette[..]),
        (b"IDAT", &idat[..]),
        (b"IEND", &[]),
    ];
    for (kind, data) in chunks {
        png.extend_from_slice(&(data.len() as u32).to_be_bytes());
        png.extend_from_slice(kind);
        png.extend_from_slice(data);
        let mut crc = Crc::new();
        crc.update(kind);
        crc.update(data);
        png.extend_from_slice(&crc.sum().to_be_bytes());
    }
    png
}
