//! Spatial filters: Gaussian blur and unsharp-mask sharpening.
//!
//! The blur wraps [`imageproc::filter::gaussian_blur_f32`] over an
//! `Rgb32FImage`, so every channel is filtered independently and the result
//! stays unrounded until the final conversion back to 8 bits. Sharpening
//! builds its mask from that unrounded result; a flat region has a zero mask
//! at every kernel size.

use image::Rgb32FImage;

use super::clamp_param;
use crate::raster::Image;

/// Largest accepted kernel size.
pub const MAX_KERNEL_SIZE: u32 = 99;

/// Force a kernel size to be odd and within `1..=MAX_KERNEL_SIZE`.
///
/// Even sizes are incremented by one, so `4` and `5` blur identically.
pub fn normalize_kernel_size(size: u32) -> u32 {
    (size.max(1) | 1).min(MAX_KERNEL_SIZE)
}

/// Gaussian sigma for an odd kernel size, using the conventional
/// `0.3 * ((k - 1) * 0.5 - 1) + 0.8` rule.
pub fn sigma_for_kernel(size: u32) -> f32 {
    0.3 * ((size as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Blur an RGB image with the Gaussian kernel of the given size.
///
/// The size is normalized with [`normalize_kernel_size`]; a kernel of size
/// one is the identity and returns an unchanged copy.
#[must_use = "returns the blurred image"]
pub fn gaussian_blur_rgb(image: &Image, kernel_size: u32) -> Image {
    match blur_samples(image, kernel_size) {
        Some(samples) => {
            let pixels = samples.into_iter().map(to_u8).collect();
            Image::new(image.width, image.height, pixels)
        }
        None => image.clone(),
    }
}

/// Interleaved RGB samples of the blurred image, before rounding.
///
/// `None` when blurring would not change anything (kernel of size one,
/// empty image) or when the buffer does not match the dimensions.
fn blur_samples(image: &Image, kernel_size: u32) -> Option<Vec<f32>> {
    let size = normalize_kernel_size(kernel_size);
    if size <= 1 || image.is_empty() {
        return None;
    }

    let expected = Image::expected_len(image.width, image.height);
    debug_assert_eq!(image.pixels.len(), expected, "Pixel buffer size mismatch");
    if image.pixels.len() != expected {
        return None;
    }

    let samples = image.pixels.iter().map(|&v| f32::from(v)).collect();
    let rgb = Rgb32FImage::from_raw(image.width, image.height, samples)?;
    let blurred = imageproc::filter::gaussian_blur_f32(&rgb, sigma_for_kernel(size));
    Some(blurred.into_raw())
}

#[inline]
fn to_u8(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

// ============================================================================
// Blur
// ============================================================================

/// Gaussian blur with an odd kernel size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Blur {
    radius: u32,
}

impl Blur {
    pub const IDENTITY_RADIUS: u32 = 1;

    /// `radius` is the kernel size in pixels; even values are bumped to the
    /// next odd value and zero becomes one.
    pub fn new(radius: u32) -> Self {
        Self {
            radius: normalize_kernel_size(radius),
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn is_identity(&self) -> bool {
        self.radius == Self::IDENTITY_RADIUS
    }

    pub fn apply(&self, image: &Image) -> Image {
        gaussian_blur_rgb(image, self.radius)
    }
}

impl Default for Blur {
    fn default() -> Self {
        Self::new(Self::IDENTITY_RADIUS)
    }
}

// ============================================================================
// Sharpen
// ============================================================================

/// Unsharp mask: `out = in + amount * (in - blur(in, radius))`.
///
/// The blurred copy is kept in `f32` and the mask is never rounded, so
/// nothing wraps or drifts before the final clamp to 8 bits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sharpen {
    amount: f32,
    radius: u32,
}

impl Sharpen {
    pub const MIN_AMOUNT: f32 = 0.0;
    pub const MAX_AMOUNT: f32 = 5.0;
    pub const IDENTITY_AMOUNT: f32 = 0.0;
    pub const DEFAULT_RADIUS: u32 = 5;

    pub fn new(amount: f32, radius: u32) -> Self {
        Self {
            amount: clamp_param(
                amount,
                Self::MIN_AMOUNT,
                Self::MAX_AMOUNT,
                Self::IDENTITY_AMOUNT,
            ),
            radius: normalize_kernel_size(radius),
        }
    }

    pub fn amount(&self) -> f32 {
        self.amount
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn is_identity(&self) -> bool {
        self.amount == Self::IDENTITY_AMOUNT || self.radius == 1
    }

    pub fn apply(&self, image: &Image) -> Image {
        if self.is_identity() {
            return image.clone();
        }

        let Some(blurred) = blur_samples(image, self.radius) else {
            return image.clone();
        };
        let pixels = image
            .pixels
            .iter()
            .zip(blurred)
            .map(|(&orig, soft)| {
                let orig = f32::from(orig);
                to_u8(orig + self.amount * (orig - soft))
            })
            .collect();

        Image::new(image.width, image.height, pixels)
    }
}

impl Default for Sharpen {
    fn default() -> Self {
        Self::new(Self::IDENTITY_AMOUNT, Self::DEFAULT_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Sharp black-to-white boundary at x=5.
    fn sharp_edge_image() -> Image {
        let mut pixels = Vec::new();
        for _y in 0..10 {
            for x in 0..10 {
                let v = if x < 5 { 0 } else { 255 };
                pixels.extend_from_slice(&[v, v, v]);
            }
        }
        Image::new(10, 10, pixels)
    }

    /// Soft ramp so the unsharp mask has room to push values both ways.
    fn soft_edge_image() -> Image {
        let mut pixels = Vec::new();
        for _y in 0..12 {
            for x in 0..12u32 {
                let v = (60 + x * 12) as u8;
                pixels.extend_from_slice(&[v, v / 2, 255 - v]);
            }
        }
        Image::new(12, 12, pixels)
    }

    #[test]
    fn test_normalize_kernel_size() {
        assert_eq!(normalize_kernel_size(0), 1);
        assert_eq!(normalize_kernel_size(1), 1);
        assert_eq!(normalize_kernel_size(2), 3);
        assert_eq!(normalize_kernel_size(3), 3);
        assert_eq!(normalize_kernel_size(8), 9);
        assert_eq!(normalize_kernel_size(1000), MAX_KERNEL_SIZE);
    }

    #[test]
    fn test_sigma_for_kernel() {
        assert!((sigma_for_kernel(3) - 0.8).abs() < 1e-6);
        assert!((sigma_for_kernel(5) - 1.1).abs() < 1e-6);
        assert!(sigma_for_kernel(9) > sigma_for_kernel(5));
    }

    #[test]
    fn test_blur_smooths_sharp_edge() {
        let blurred = Blur::new(5).apply(&sharp_edge_image());
        let left = blurred.pixel(4, 5).unwrap()[0];
        let right = blurred.pixel(5, 5).unwrap()[0];
        assert!(left > 0, "expected blur to raise left-of-edge above 0, got {left}");
        assert!(right < 255, "expected blur to lower right-of-edge below 255, got {right}");
    }

    #[test]
    fn test_blur_uniform_image_unchanged() {
        let img = Image::filled(10, 10, [100, 150, 200]);
        for size in [3, 7, 15, 31] {
            assert_eq!(Blur::new(size).apply(&img), img, "kernel {size} shifted a flat image");
        }
    }

    #[test]
    fn test_blur_uniform_image_unchanged_at_max_kernel() {
        let img = Image::filled(40, 40, [200, 200, 200]);
        assert_eq!(Blur::new(MAX_KERNEL_SIZE).apply(&img), img);

        let single = Image::filled(1, 1, [200, 17, 255]);
        assert_eq!(Blur::new(MAX_KERNEL_SIZE).apply(&single), single);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "Pixel buffer size mismatch")]
    fn test_blur_mismatched_buffer_is_a_defect() {
        let img = Image {
            width: 3,
            height: 3,
            pixels: vec![50; 24],
        };
        let _ = Blur::new(3).apply(&img);
    }

    #[test]
    #[cfg(not(debug_assertions))]
    fn test_blur_mismatched_buffer_passes_through() {
        let img = Image {
            width: 3,
            height: 3,
            pixels: vec![50; 24],
        };
        assert_eq!(Blur::new(3).apply(&img), img);
    }

    #[test]
    fn test_blur_even_radius_matches_next_odd() {
        let img = soft_edge_image();
        assert_eq!(Blur::new(4).apply(&img), Blur::new(5).apply(&img));
        assert_eq!(Blur::new(4), Blur::new(5));
    }

    #[test]
    fn test_blur_size_one_is_identity() {
        let img = sharp_edge_image();
        assert!(Blur::new(1).is_identity());
        assert!(Blur::new(0).is_identity());
        assert_eq!(Blur::new(0).apply(&img), img);
    }

    #[test]
    fn test_blur_preserves_channels_independently() {
        let img = Image::filled(6, 6, [255, 0, 0]);
        let blurred = Blur::new(5).apply(&img);
        for px in blurred.pixels.chunks_exact(3) {
            assert!(px[0] >= 254);
            assert_eq!(px[1], 0);
            assert_eq!(px[2], 0);
        }
    }

    #[test]
    fn test_sharpen_increases_edge_contrast() {
        let img = soft_edge_image();
        let sharpened = Sharpen::new(2.0, 5).apply(&img);
        // On a ramp the ends overshoot outward.
        let left_in = img.pixel(0, 6).unwrap()[0];
        let left_out = sharpened.pixel(0, 6).unwrap()[0];
        let right_in = img.pixel(11, 6).unwrap()[0];
        let right_out = sharpened.pixel(11, 6).unwrap()[0];
        assert!(left_out <= left_in, "{left_out} should not exceed {left_in}");
        assert!(right_out >= right_in, "{right_out} should not fall below {right_in}");
        assert_ne!(sharpened, img);
    }

    #[test]
    fn test_sharpen_clamps_instead_of_wrapping() {
        let sharpened = Sharpen::new(5.0, 9).apply(&sharp_edge_image());
        // The dark side next to the edge would go negative; it must clamp
        // to 0 rather than wrap to a bright value.
        assert_eq!(sharpened.pixel(4, 5).unwrap()[0], 0);
        assert_eq!(sharpened.pixel(5, 5).unwrap()[0], 255);
    }

    #[test]
    fn test_sharpen_even_radius_matches_next_odd() {
        let img = soft_edge_image();
        assert_eq!(
            Sharpen::new(1.5, 6).apply(&img),
            Sharpen::new(1.5, 7).apply(&img)
        );
    }

    #[test]
    fn test_sharpen_parameters_clamped() {
        let op = Sharpen::new(-3.0, 0);
        assert_eq!(op.amount(), 0.0);
        assert_eq!(op.radius(), 1);
        assert!(op.is_identity());

        let op = Sharpen::new(50.0, 200);
        assert_eq!(op.amount(), Sharpen::MAX_AMOUNT);
        assert_eq!(op.radius(), MAX_KERNEL_SIZE);
    }

    #[test]
    fn test_sharpen_uniform_image_unchanged() {
        let img = Image::filled(8, 8, [90, 90, 90]);
        assert_eq!(Sharpen::new(3.0, 5).apply(&img), img);
    }

    #[test]
    fn test_sharpen_uniform_image_unchanged_at_max_kernel() {
        let img = Image::filled(40, 40, [200, 200, 200]);
        assert_eq!(Sharpen::new(Sharpen::MAX_AMOUNT, MAX_KERNEL_SIZE).apply(&img), img);

        let single = Image::filled(1, 1, [200, 200, 200]);
        assert_eq!(Sharpen::new(Sharpen::MAX_AMOUNT, MAX_KERNEL_SIZE).apply(&single), single);
    }
}
