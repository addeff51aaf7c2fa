//! Parametric, reversible pixel operations.
//!
//! Every edit the session can perform is one [`Operation`] variant. An
//! operation holds its parameters (clamped once, at construction) and is a
//! pure function from an input [`Image`] to a new output [`Image`]; nothing
//! is modified in place and nothing can fail.
//!
//! ## Canonical order
//!
//! When a pipeline is built from a full parameter set the variants run in
//! this order:
//! 1. Brightness / contrast
//! 2. Saturation
//! 3. Tone curve
//! 4. Blur
//! 5. Sharpen

mod color;
mod filter;
mod tone;

pub use color::{hsv_to_rgb, rgb_to_hsv, Saturation};
pub use filter::{gaussian_blur_rgb, normalize_kernel_size, sigma_for_kernel, Blur, Sharpen};
pub use tone::{BrightnessContrast, Curve, CurveLut};

use crate::raster::Image;

/// A single pipeline step.
///
/// The set of variants is closed: adding one is a compile-time-checked
/// change to [`Operation::apply`] and to
/// [`ParameterSet::from_operations`](crate::ParameterSet::from_operations).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    BrightnessContrast(BrightnessContrast),
    Saturation(Saturation),
    Curve(Curve),
    Blur(Blur),
    Sharpen(Sharpen),
}

/// Discriminant of an [`Operation`], used for logging and lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    BrightnessContrast,
    Saturation,
    Curve,
    Blur,
    Sharpen,
}

impl OperationKind {
    /// Stable lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            OperationKind::BrightnessContrast => "brightness_contrast",
            OperationKind::Saturation => "saturation",
            OperationKind::Curve => "curve",
            OperationKind::Blur => "blur",
            OperationKind::Sharpen => "sharpen",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Operation {
    /// Shorthand for `Operation::BrightnessContrast(BrightnessContrast::new(..))`.
    pub fn brightness_contrast(brightness: i32, contrast: f32) -> Self {
        Operation::BrightnessContrast(BrightnessContrast::new(brightness, contrast))
    }

    /// Shorthand for `Operation::Saturation(Saturation::new(..))`.
    pub fn saturation(saturation: f32) -> Self {
        Operation::Saturation(Saturation::new(saturation))
    }

    /// Shorthand for `Operation::Curve(Curve::new(..))`.
    pub fn curve(strength: f32) -> Self {
        Operation::Curve(Curve::new(strength))
    }

    /// Shorthand for `Operation::Blur(Blur::new(..))`.
    pub fn blur(radius: u32) -> Self {
        Operation::Blur(Blur::new(radius))
    }

    /// Shorthand for `Operation::Sharpen(Sharpen::new(..))`.
    pub fn sharpen(amount: f32, radius: u32) -> Self {
        Operation::Sharpen(Sharpen::new(amount, radius))
    }

    /// Which variant this is.
    pub fn kind(&self) -> OperationKind {
        match self {
            Operation::BrightnessContrast(_) => OperationKind::BrightnessContrast,
            Operation::Saturation(_) => OperationKind::Saturation,
            Operation::Curve(_) => OperationKind::Curve,
            Operation::Blur(_) => OperationKind::Blur,
            Operation::Sharpen(_) => OperationKind::Sharpen,
        }
    }

    /// True if applying this operation leaves every pixel unchanged.
    pub fn is_identity(&self) -> bool {
        match self {
            Operation::BrightnessContrast(op) => op.is_identity(),
            Operation::Saturation(op) => op.is_identity(),
            Operation::Curve(op) => op.is_identity(),
            Operation::Blur(op) => op.is_identity(),
            Operation::Sharpen(op) => op.is_identity(),
        }
    }

    /// True if the parameters equal the variant's `Default`, which is what
    /// [`ParameterSet::from_operations`](crate::ParameterSet::from_operations)
    /// reports for a variant that is absent.
    ///
    /// Stricter than [`Operation::is_identity`]: `sharpen(0.0, 3)` changes no
    /// pixels but still carries a radius worth remembering.
    pub fn is_default(&self) -> bool {
        match self {
            Operation::BrightnessContrast(op) => *op == BrightnessContrast::default(),
            Operation::Saturation(op) => *op == Saturation::default(),
            Operation::Curve(op) => *op == Curve::default(),
            Operation::Blur(op) => *op == Blur::default(),
            Operation::Sharpen(op) => *op == Sharpen::default(),
        }
    }

    /// Produce a new image with this operation applied. The input is not
    /// modified.
    pub fn apply(&self, image: &Image) -> Image {
        match self {
            Operation::BrightnessContrast(op) => op.apply(image),
            Operation::Saturation(op) => op.apply(image),
            Operation::Curve(op) => op.apply(image),
            Operation::Blur(op) => op.apply(image),
            Operation::Sharpen(op) => op.apply(image),
        }
    }
}

impl From<BrightnessContrast> for Operation {
    fn from(op: BrightnessContrast) -> Self {
        Operation::BrightnessContrast(op)
    }
}

impl From<Saturation> for Operation {
    fn from(op: Saturation) -> Self {
        Operation::Saturation(op)
    }
}

impl From<Curve> for Operation {
    fn from(op: Curve) -> Self {
        Operation::Curve(op)
    }
}

impl From<Blur> for Operation {
    fn from(op: Blur) -> Self {
        Operation::Blur(op)
    }
}

impl From<Sharpen> for Operation {
    fn from(op: Sharpen) -> Self {
        Operation::Sharpen(op)
    }
}

/// Clamp a float parameter, mapping NaN to `fallback`.
#[inline]
pub(crate) fn clamp_param(value: f32, min: f32, max: f32, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(min, max)
    }
}
