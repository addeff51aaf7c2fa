//! Color intensity via an HSV round-trip.

use super::clamp_param;
use crate::raster::{Image, CHANNELS};

/// Multiplies HSV saturation by a non-negative factor.
///
/// `1.0` is identity (within rounding), `0.0` fully desaturates and values
/// above one oversaturate, clamped at full saturation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Saturation {
    factor: f32,
}

impl Saturation {
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 3.0;
    pub const IDENTITY: f32 = 1.0;

    pub fn new(factor: f32) -> Self {
        Self {
            factor: clamp_param(factor, Self::MIN, Self::MAX, Self::IDENTITY),
        }
    }

    pub fn factor(&self) -> f32 {
        self.factor
    }

    pub fn is_identity(&self) -> bool {
        self.factor == Self::IDENTITY
    }

    pub fn apply(&self, image: &Image) -> Image {
        let mut out = image.clone();
        if self.is_identity() {
            return out;
        }

        for chunk in out.pixels.chunks_exact_mut(CHANNELS) {
            let (h, s, v) = rgb_to_hsv(
                chunk[0] as f32 / 255.0,
                chunk[1] as f32 / 255.0,
                chunk[2] as f32 / 255.0,
            );
            let s = (s * self.factor).clamp(0.0, 1.0);
            let (r, g, b) = hsv_to_rgb(h, s, v);

            chunk[0] = to_u8(r);
            chunk[1] = to_u8(g);
            chunk[2] = to_u8(b);
        }
        out
    }
}

impl Default for Saturation {
    fn default() -> Self {
        Self::new(Self::IDENTITY)
    }
}

#[inline]
fn to_u8(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Convert normalized RGB (0.0-1.0) to HSV.
///
/// Hue is in degrees `[0, 360)`, saturation and value in `[0, 1]`.
/// Achromatic colors report hue 0.
#[inline]
pub fn rgb_to_hsv(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let s = if max > 0.0 { delta / max } else { 0.0 };

    let h = if delta <= f32::EPSILON {
        0.0
    } else if max == r {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    (h, s, max)
}

/// Convert HSV back to normalized RGB.
#[inline]
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> (f32, f32, f32) {
    if s <= 0.0 {
        return (v, v, v);
    }

    let c = v * s;
    let h_prime = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (h_prime.rem_euclid(2.0) - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (r + m, g + m, b + m)
}
