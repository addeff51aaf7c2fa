//! The complete parameter record exchanged with the UI.

use serde::{Deserialize, Serialize};

use crate::operation::{BrightnessContrast, Blur, Curve, Operation, Saturation, Sharpen};

/// Every adjustable value, always supplied as a complete set.
///
/// Defaults are the identity value of each operation, so
/// `ParameterSet::default()` describes an unedited image. Missing fields
/// in serialized input fall back to these defaults.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParameterSet {
    /// Additive offset (-100 to 100)
    pub brightness: i32,
    /// Multiplicative gain (0.0 to 3.0, 1.0 = unchanged)
    pub contrast: f32,
    /// Saturation gain (0.0 to 3.0, 1.0 = unchanged)
    pub saturation: f32,
    /// S-curve steepness (-1.0 to 1.0, 0.0 = flat)
    pub curve_strength: f32,
    /// Blur kernel size (odd, 1 = no blur)
    pub blur_radius: u32,
    /// Unsharp-mask strength (0.0 to 5.0, 0.0 = no sharpening)
    pub sharpen_amount: f32,
    /// Blur kernel size used to build the unsharp mask (odd)
    pub sharpen_radius: u32,
}

impl ParameterSet {
    pub const DEFAULT_BRIGHTNESS: i32 = BrightnessContrast::IDENTITY_BRIGHTNESS;
    pub const DEFAULT_CONTRAST: f32 = BrightnessContrast::IDENTITY_CONTRAST;
    pub const DEFAULT_SATURATION: f32 = Saturation::IDENTITY;
    pub const DEFAULT_CURVE_STRENGTH: f32 = Curve::IDENTITY_STRENGTH;
    pub const DEFAULT_BLUR_RADIUS: u32 = Blur::IDENTITY_RADIUS;
    pub const DEFAULT_SHARPEN_AMOUNT: f32 = Sharpen::IDENTITY_AMOUNT;
    pub const DEFAULT_SHARPEN_RADIUS: u32 = Sharpen::DEFAULT_RADIUS;

    /// Create a new ParameterSet with identity values
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// One operation per variant, in canonical order, with parameters
    /// clamped. Identity operations are included.
    pub fn to_operations(&self) -> [Operation; 5] {
        [
            Operation::brightness_contrast(self.brightness, self.contrast),
            Operation::saturation(self.saturation),
            Operation::curve(self.curve_strength),
            Operation::blur(self.blur_radius),
            Operation::sharpen(self.sharpen_amount, self.sharpen_radius),
        ]
    }

    /// Recover the parameter set an operation list represents.
    ///
    /// Variants that do not appear keep their identity value. If a variant
    /// appears more than once the last occurrence wins, since it is the one
    /// the user touched most recently.
    pub fn from_operations(operations: &[Operation]) -> Self {
        let mut params = Self::default();
        for op in operations {
            match op {
                Operation::BrightnessContrast(bc) => {
                    params.brightness = bc.brightness();
                    params.contrast = bc.contrast();
                }
                Operation::Saturation(s) => params.saturation = s.factor(),
                Operation::Curve(c) => params.curve_strength = c.strength(),
                Operation::Blur(b) => params.blur_radius = b.radius(),
                Operation::Sharpen(s) => {
                    params.sharpen_amount = s.amount();
                    params.sharpen_radius = s.radius();
                }
            }
        }
        params
    }

    /// The same set with every field clamped to its valid range, as the
    /// operations would see it.
    pub fn clamped(&self) -> Self {
        Self::from_operations(&self.to_operations())
    }
}

impl Default for ParameterSet {
    fn default() -> Self {
        Self {
            brightness: Self::DEFAULT_BRIGHTNESS,
            contrast: Self::DEFAULT_CONTRAST,
            saturation: Self::DEFAULT_SATURATION,
            curve_strength: Self::DEFAULT_CURVE_STRENGTH,
            blur_radius: Self::DEFAULT_BLUR_RADIUS,
            sharpen_amount: Self::DEFAULT_SHARPEN_AMOUNT,
            sharpen_radius: Self::DEFAULT_SHARPEN_RADIUS,
        }
    }
}
