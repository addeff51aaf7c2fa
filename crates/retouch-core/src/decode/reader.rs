//! Raster decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::DynamicImage;
use image::ImageReader;
use log::debug;

use super::{DecodeError, Orientation};
use crate::raster::Image;

/// Decode PNG, JPEG, or BMP bytes into an RGB [`Image`], applying EXIF
/// orientation correction.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the format cannot be detected,
/// `DecodeError::CorruptedFile` if the data is truncated or malformed, and
/// `DecodeError::EmptyImage` if the file has no pixels.
pub fn decode_image(bytes: &[u8]) -> Result<Image, DecodeError> {
    let orientation = extract_orientation(bytes);
    let img = read_dynamic(bytes)?;
    if orientation != Orientation::Normal {
        debug!(
            "Applying EXIF orientation {orientation:?} to {}x{} image{}",
            img.width(),
            img.height(),
            if orientation.swaps_dimensions() {
                " (width and height swap)"
            } else {
                ""
            }
        );
    }
    into_canonical(apply_orientation(img, orientation))
}

/// Decode image bytes without applying EXIF orientation.
pub fn decode_image_no_orientation(bytes: &[u8]) -> Result<Image, DecodeError> {
    into_canonical(read_dynamic(bytes)?)
}

/// Extract EXIF orientation value from image bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn read_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    reader.decode().map_err(|e| match e {
        image::ImageError::Unsupported(_) => DecodeError::InvalidFormat,
        other => DecodeError::CorruptedFile(other.to_string()),
    })
}

/// Convert any decoded layout (gray, RGBA, 16-bit, ...) to 8-bit RGB.
fn into_canonical(img: DynamicImage) -> Result<Image, DecodeError> {
    let rgb = img.into_rgb8();
    if rgb.width() == 0 || rgb.height() == 0 {
        return Err(DecodeError::EmptyImage);
    }
    Ok(Image::from_rgb_image(rgb))
}

/// Returns `Orientation::Normal` if no EXIF data is found.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage, RgbaImage};

    fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, format).unwrap();
        buf.into_inner()
    }

    fn two_pixel_png() -> Vec<u8> {
        let rgb = RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 0, 255]).unwrap();
        encode(DynamicImage::ImageRgb8(rgb), ImageFormat::Png)
    }

    #[test]
    fn test_decode_png_keeps_rgb_order() {
        let img = decode_image(&two_pixel_png()).unwrap();
        assert_eq!(img.width, 2);
        assert_eq!(img.height, 1);
        assert_eq!(img.pixels, vec![255, 0, 0, 0, 0, 255]);
    }

    #[test]
    fn test_decode_rgba_drops_alpha() {
        let rgba = RgbaImage::from_raw(1, 1, vec![10, 20, 30, 40]).unwrap();
        let bytes = encode(DynamicImage::ImageRgba8(rgba), ImageFormat::Png);
        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.pixels, vec![10, 20, 30]);
    }

    #[test]
    fn test_decode_bmp() {
        let rgb = RgbImage::from_raw(1, 1, vec![1, 2, 3]).unwrap();
        let bytes = encode(DynamicImage::ImageRgb8(rgb), ImageFormat::Bmp);
        let img = decode_image(&bytes).unwrap();
        assert_eq!(img.pixels, vec![1, 2, 3]);
    }

    #[test]
    fn test_decode_jpeg() {
        let rgb = RgbImage::from_raw(8, 8, vec![128; 8 * 8 * 3]).unwrap();
        let bytes = encode(DynamicImage::ImageRgb8(rgb), ImageFormat::Jpeg);
        let img = decode_image(&bytes).unwrap();
        assert_eq!((img.width, img.height), (8, 8));
        assert_eq!(img.pixels.len(), 8 * 8 * 3);
    }

    #[test]
    fn test_decode_no_orientation() {
        let img = decode_image_no_orientation(&two_pixel_png()).unwrap();
        assert_eq!((img.width, img.height), (2, 1));
    }

    #[test]
    fn test_decode_garbage_is_invalid_format() {
        let result = decode_image(&[0x00, 0x01, 0x02, 0x03]);
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_empty_bytes() {
        assert!(decode_image(&[]).is_err());
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = two_pixel_png();
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_extraction_no_exif() {
        assert_eq!(get_orientation(&two_pixel_png()), Orientation::Normal);
        assert_eq!(get_orientation(&[0x00, 0x01, 0x02]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_rotate90() {
        let rgb = RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb), Orientation::Rotate90CW);
        assert_eq!(result.into_rgb8().dimensions(), (1, 2));
    }

    #[test]
    fn test_swaps_dimensions_matches_applied_orientation() {
        for tag in 1..=8u32 {
            let orientation = Orientation::from(tag);
            let rgb = RgbImage::from_raw(3, 2, vec![0; 3 * 2 * 3]).unwrap();
            let dims = apply_orientation(DynamicImage::ImageRgb8(rgb), orientation)
                .into_rgb8()
                .dimensions();
            let expected = if orientation.swaps_dimensions() { (2, 3) } else { (3, 2) };
            assert_eq!(dims, expected, "{orientation:?}");
        }
    }

    #[test]
    fn test_apply_orientation_flip_horizontal() {
        let rgb = RgbImage::from_raw(2, 1, vec![255, 0, 0, 0, 255, 0]).unwrap();
        let result = apply_orientation(DynamicImage::ImageRgb8(rgb), Orientation::FlipHorizontal)
            .into_rgb8();
        assert_eq!(result.get_pixel(0, 0).0, [0, 255, 0]);
        assert_eq!(result.get_pixel(1, 0).0, [255, 0, 0]);
    }
}
