//! Tonal operations: linear brightness/contrast and the logistic tone curve.
//!
//! Both are per-channel mappings of a single 8-bit value, so each is
//! evaluated once into a 256-entry lookup table and then applied to every
//! channel of every pixel.

use super::clamp_param;
use crate::raster::Image;

// ============================================================================
// Brightness / Contrast
// ============================================================================

/// Linear gain and offset: `out = clamp(round(in * contrast + brightness), 0, 255)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrightnessContrast {
    brightness: i32,
    contrast: f32,
}

impl BrightnessContrast {
    pub const MIN_BRIGHTNESS: i32 = -100;
    pub const MAX_BRIGHTNESS: i32 = 100;
    pub const MIN_CONTRAST: f32 = 0.0;
    pub const MAX_CONTRAST: f32 = 3.0;
    pub const IDENTITY_BRIGHTNESS: i32 = 0;
    pub const IDENTITY_CONTRAST: f32 = 1.0;

    /// Brightness is clamped to -100..=100, contrast to 0.0..=3.0.
    pub fn new(brightness: i32, contrast: f32) -> Self {
        Self {
            brightness: brightness.clamp(Self::MIN_BRIGHTNESS, Self::MAX_BRIGHTNESS),
            contrast: clamp_param(
                contrast,
                Self::MIN_CONTRAST,
                Self::MAX_CONTRAST,
                Self::IDENTITY_CONTRAST,
            ),
        }
    }

    pub fn brightness(&self) -> i32 {
        self.brightness
    }

    pub fn contrast(&self) -> f32 {
        self.contrast
    }

    pub fn is_identity(&self) -> bool {
        self.brightness == Self::IDENTITY_BRIGHTNESS && self.contrast == Self::IDENTITY_CONTRAST
    }

    /// Lookup table for this gain/offset pair.
    pub fn lut(&self) -> CurveLut {
        let mut lut = [0u8; 256];
        let offset = self.brightness as f32;
        for (i, value) in lut.iter_mut().enumerate() {
            *value = (i as f32 * self.contrast + offset).round().clamp(0.0, 255.0) as u8;
        }
        CurveLut { lut }
    }

    pub fn apply(&self, image: &Image) -> Image {
        let mut out = image.clone();
        if !self.is_identity() {
            self.lut().apply(&mut out.pixels);
        }
        out
    }
}

impl Default for BrightnessContrast {
    fn default() -> Self {
        Self::new(Self::IDENTITY_BRIGHTNESS, Self::IDENTITY_CONTRAST)
    }
}

// ============================================================================
// Tone curve
// ============================================================================

/// Logistic S-curve centred on mid-gray.
///
/// `lut[x] = 255 / (1 + exp(-(x - 128) * 5 * strength / 128))`, truncated to
/// 8 bits. Positive strength steepens mid-tone contrast; negative strength
/// produces a descending curve (tones are inverted). Strengths with
/// `|strength| < 0.01` are an exact no-op.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Curve {
    strength: f32,
}

impl Curve {
    pub const MIN_STRENGTH: f32 = -1.0;
    pub const MAX_STRENGTH: f32 = 1.0;
    pub const IDENTITY_STRENGTH: f32 = 0.0;
    /// Below this magnitude the curve is treated as flat.
    pub const EPSILON: f32 = 0.01;
    /// Input value the S-curve pivots around.
    pub const MIDPOINT: f32 = 128.0;
    /// Steepness multiplier applied to `strength`.
    pub const STEEPNESS: f32 = 5.0;

    pub fn new(strength: f32) -> Self {
        Self {
            strength: clamp_param(
                strength,
                Self::MIN_STRENGTH,
                Self::MAX_STRENGTH,
                Self::IDENTITY_STRENGTH,
            ),
        }
    }

    pub fn strength(&self) -> f32 {
        self.strength
    }

    pub fn is_identity(&self) -> bool {
        self.strength.abs() < Self::EPSILON
    }

    pub fn lut(&self) -> CurveLut {
        CurveLut::logistic(self.strength)
    }

    pub fn apply(&self, image: &Image) -> Image {
        let mut out = image.clone();
        if !self.is_identity() {
            self.lut().apply(&mut out.pixels);
        }
        out
    }
}

impl Default for Curve {
    fn default() -> Self {
        Self::new(Self::IDENTITY_STRENGTH)
    }
}

// ============================================================================
// LUT Type
// ============================================================================

/// Pre-computed 256-entry lookup table, applied identically to R, G and B.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurveLut {
    /// LUT values: lut[input] = output
    pub lut: [u8; 256],
}

impl CurveLut {
    /// Logistic S-curve LUT for the given strength.
    ///
    /// Returns the identity LUT when `|strength|` is below [`Curve::EPSILON`].
    pub fn logistic(strength: f32) -> Self {
        if strength.abs() < Curve::EPSILON || strength.is_nan() {
            return Self::identity();
        }

        let factor = Curve::STEEPNESS * strength;
        let mut lut = [0u8; 256];
        for (i, value) in lut.iter_mut().enumerate() {
            let x = i as f32;
            let y = 255.0 / (1.0 + (-(x - Curve::MIDPOINT) * factor / 128.0).exp());
            // Truncation, not rounding: matches an 8-bit cast of the curve.
            *value = y.clamp(0.0, 255.0) as u8;
        }
        Self { lut }
    }

    /// Create identity LUT (no change).
    pub fn identity() -> Self {
        let mut lut = [0u8; 256];
        for (i, value) in lut.iter_mut().enumerate() {
            *value = i as u8;
        }
        Self { lut }
    }

    /// Check if this LUT is identity.
    pub fn is_identity(&self) -> bool {
        self.lut.iter().enumerate().all(|(i, &v)| v == i as u8)
    }

    /// Map every byte of an RGB buffer through the table in place.
    pub fn apply(&self, pixels: &mut [u8]) {
        for value in pixels.iter_mut() {
            *value = self.lut[*value as usize];
        }
    }
}

impl Default for CurveLut {
    fn default() -> Self {
        Self::identity()
    }
}
