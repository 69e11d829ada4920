/// Hue shift selected with the slider
///
/// The shift is a fraction of a full turn of the color wheel. It is
/// uploaded to the GPU as-is and the fragment shader adds it to every
/// pixel's hue modulo 1.0.

use serde::{Deserialize, Serialize};

/// Hue rotation in turns, clamped to [0.0, 1.0]
///
/// 0.0 and 1.0 are both the identity rotation.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(from = "f32", into = "f32")]
pub struct HueShift(f32);

impl HueShift {
    /// Slider range
    pub const MIN: f32 = 0.0;
    pub const MAX: f32 = 1.0;
    /// Slider step
    pub const STEP: f32 = 0.01;

    pub fn new(turns: f32) -> Self {
        if turns.is_nan() {
            return Self::default();
        }
        Self(turns.clamp(Self::MIN, Self::MAX))
    }

    /// Shift as a fraction of a turn
    pub fn turns(self) -> f32 {
        self.0
    }

    /// Shift in degrees, [0, 360], snapped to the slider step first
    ///
    /// The f32 nearest to a stop such as 0.45 sits just below it, and the
    /// caption floors the degrees, so scaling it directly loses a degree.
    pub fn degrees(self) -> f64 {
        let steps = (1.0 / Self::STEP as f64).round();
        (f64::from(self.0) * steps).round() / steps * 360.0
    }

    /// True when the shift leaves every color unchanged
    pub fn is_identity(self) -> bool {
        self.0 == Self::MIN || self.0 == Self::MAX
    }
}

impl From<f32> for HueShift {
    fn from(turns: f32) -> Self {
        Self::new(turns)
    }
}

impl From<HueShift> for f32 {
    fn from(shift: HueShift) -> Self {
        shift.0
    }
}
