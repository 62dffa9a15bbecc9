//! Per-entry raster preparation: decode, rotate, encode

use crate::constants::JPEG_QUALITY;
use crate::layout::effective_dimensions;
use crate::types::*;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView, ImageDecoder, ImageReader, Rgb, RgbImage, imageops};
use std::io::Cursor;

/// A rotated raster encoded as JPEG, sized to its effective dimensions
#[derive(Debug, Clone)]
pub struct PreparedRaster {
    pub width: u32,
    pub height: u32,
    pub jpeg: Vec<u8>,
}

/// Why an entry's page was left blank
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The bytes could not be decoded as an image
    Decode(String),
    /// The image has no pixels to draw
    EmptyRaster,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Decode(msg) => write!(f, "could not decode image: {msg}"),
            SkipReason::EmptyRaster => write!(f, "image has zero width or height"),
        }
    }
}

#[derive(Debug, Clone)]
pub enum RasterOutcome {
    Ready(PreparedRaster),
    Skipped(SkipReason),
}

/// Decode, rotate and encode one image.
///
/// Decode problems are reported as [`RasterOutcome::Skipped`] so the caller
/// can leave the page blank; only encoder failures are returned as errors.
pub fn prepare_raster(bytes: &[u8], rotation_degrees: u32) -> Result<RasterOutcome> {
    let image = match decode_image(bytes) {
        Ok(image) => image,
        Err(e) => return Ok(RasterOutcome::Skipped(SkipReason::Decode(e.to_string()))),
    };

    let Some(rotated) = rotate_image(&image, rotation_degrees) else {
        return Ok(RasterOutcome::Skipped(SkipReason::EmptyRaster));
    };

    let jpeg = encode_jpeg(&rotated, JPEG_QUALITY)?;
    Ok(RasterOutcome::Ready(PreparedRaster {
        width: rotated.width(),
        height: rotated.height(),
        jpeg,
    }))
}

/// Decode image bytes upright: the EXIF orientation, if any, is applied so
/// the result has the dimensions a viewer would show.
pub fn decode_image(bytes: &[u8]) -> image::ImageResult<DynamicImage> {
    let mut decoder = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()?
        .into_decoder()?;
    let orientation = decoder.orientation()?;

    let mut image = DynamicImage::from_decoder(decoder)?;
    image.apply_orientation(orientation);
    Ok(image)
}

/// Render `image` rotated clockwise about its center onto a canvas of its
/// effective dimensions. Returns `None` for images without pixels.
///
/// Transparent pixels are composited onto black.
pub fn rotate_image(image: &DynamicImage, rotation_degrees: u32) -> Option<RgbImage> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let flat = flatten_on_black(image);
    let rotated = match rotation_degrees % 360 {
        0 => flat,
        90 => imageops::rotate90(&flat),
        180 => imageops::rotate180(&flat),
        270 => imageops::rotate270(&flat),
        degrees => rotate_arbitrary(&flat, degrees),
    };
    Some(rotated)
}

fn flatten_on_black(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let scale = |channel: u8| (channel as u16 * a as u16 / 255) as u8;
        Rgb([scale(r), scale(g), scale(b)])
    })
}

// Nearest-neighbour inverse mapping for angles that are not quarter turns.
// Canvas pixels with no source pixel behind them stay black.
fn rotate_arbitrary(source: &RgbImage, rotation_degrees: u32) -> RgbImage {
    let (src_w, src_h) = source.dimensions();
    let (dst_w, dst_h) = effective_dimensions(src_w, src_h, rotation_degrees);

    let theta = (rotation_degrees as f64).to_radians();
    let (sin, cos) = theta.sin_cos();
    let (src_cx, src_cy) = (src_w as f64 / 2.0, src_h as f64 / 2.0);
    let (dst_cx, dst_cy) = (dst_w as f64 / 2.0, dst_h as f64 / 2.0);

    RgbImage::from_fn(dst_w, dst_h, |x, y| {
        let dx = x as f64 + 0.5 - dst_cx;
        let dy = y as f64 + 0.5 - dst_cy;
        let sx = (cos * dx + sin * dy + src_cx).floor();
        let sy = (-sin * dx + cos * dy + src_cy).floor();

        if sx >= 0.0 && sy >= 0.0 && sx < src_w as f64 && sy < src_h as f64 {
            *source.get_pixel(sx as u32, sy as u32)
        } else {
            Rgb([0, 0, 0])
        }
    })
}

fn encode_jpeg(raster: &RgbImage, quality: u8) -> Result<Vec<u8>> {
    let mut jpeg = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg, quality).encode_image(raster)?;
    Ok(jpeg)
}
