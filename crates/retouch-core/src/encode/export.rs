//! JPEG and PNG encoding of RGB images.

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

use crate::raster::Image;

/// Errors that can occur while encoding an image for export.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),
}

/// Encode an image as JPEG.
///
/// `quality` is clamped to 1-100 (100 is highest quality, 90 is a good
/// default for export).
pub fn encode_jpeg(image: &Image, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let quality = quality.clamp(1, 100);
    let mut buffer = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    encoder
        .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

/// Encode an image as lossless PNG.
pub fn encode_png(image: &Image) -> Result<Vec<u8>, EncodeError> {
    validate(image)?;

    let mut buffer = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut buffer);

    encoder
        .write_image(&image.pixels, image.width, image.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

fn validate(image: &Image) -> Result<(), EncodeError> {
    if image.width == 0 || image.height == 0 {
        return Err(EncodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    let expected = Image::expected_len(image.width, image.height);
    if image.pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: image.pixels.len(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_image;

    fn raw(width: u32, height: u32, pixels: Vec<u8>) -> Image {
        // Bypass the debug assertion in Image::new to build malformed buffers.
        Image {
            width,
            height,
            pixels,
        }
    }

    #[test]
    fn test_encode_jpeg_markers() {
        let jpeg = encode_jpeg(&Image::filled(100, 100, [128, 128, 128]), 90).unwrap();

        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
        let len = jpeg.len();
        assert_eq!(&jpeg[len - 2..], &[0xFF, 0xD9]);
    }

    #[test]
    fn test_encode_jpeg_quality_clamping() {
        let img = Image::filled(10, 10, [128, 128, 128]);
        assert!(encode_jpeg(&img, 0).is_ok());
        assert!(encode_jpeg(&img, 255).is_ok());
    }

    #[test]
    fn test_encode_png_is_lossless() {
        let img = Image::new(2, 1, vec![255, 0, 0, 12, 34, 56]);
        let png = encode_png(&img).unwrap();
        assert_eq!(&png[1..4], b"PNG");
        assert_eq!(decode_image(&png).unwrap(), img);
    }

    #[test]
    fn test_encode_invalid_pixel_data() {
        let img = raw(100, 100, vec![128u8; 99 * 100 * 3]);
        assert!(matches!(
            encode_jpeg(&img, 90),
            Err(EncodeError::InvalidPixelData { .. })
        ));
        assert!(matches!(
            encode_png(&img),
            Err(EncodeError::InvalidPixelData { .. })
        ));
    }

    #[test]
    fn test_encode_zero_dimensions() {
        let img = raw(0, 100, vec![]);
        assert!(matches!(
            encode_jpeg(&img, 90),
            Err(EncodeError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            encode_png(&raw(100, 0, vec![])),
            Err(EncodeError::InvalidDimensions { .. })
        ));
    }
}
