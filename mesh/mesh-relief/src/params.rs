//! Parameters for relief assembly.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{ReliefError, ReliefResult};

/// Thickness of the backing slab under the relief, in millimeters.
pub const BASE_THICKNESS: f64 = 1.0;

/// Slab footprint relative to the relief footprint.
pub const BASE_OVERHANG: f64 = 1.02;

/// Parameters for [`assemble_relief`](crate::assemble_relief).
///
/// The vertical displacement of a cell is
/// `depth * height_scale * displacement_intensity`.
///
/// # Example
///
/// ```
/// use mesh_relief::ReliefParams;
///
/// let params = ReliefParams::default().with_size(80.0).with_height_scale(1.5);
/// assert!((params.scale() - 1.5).abs() < 1e-12);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ReliefParams {
    /// Edge length of the square relief footprint. Default: 100.0
    pub size: f64,

    /// Multiplier on heightfield depths. Default: 1.0
    pub height_scale: f64,

    /// Overall displacement factor, for previewing exaggerated reliefs.
    /// Default: 1.0
    pub displacement_intensity: f64,
}

impl Default for ReliefParams {
    fn default() -> Self {
        Self {
            size: 100.0,
            height_scale: 1.0,
            displacement_intensity: 1.0,
        }
    }
}

impl ReliefParams {
    /// Set the footprint edge length.
    #[must_use]
    pub const fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    /// Set the height scale.
    #[must_use]
    pub const fn with_height_scale(mut self, scale: f64) -> Self {
        self.height_scale = scale;
        self
    }

    /// Set the displacement intensity.
    #[must_use]
    pub const fn with_displacement_intensity(mut self, intensity: f64) -> Self {
        self.displacement_intensity = intensity;
        self
    }

    /// Combined vertical scale applied to depths.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.height_scale * self.displacement_intensity
    }

    /// Validate the parameters.
    ///
    /// # Errors
    ///
    /// Returns the first non-positive or non-finite parameter.
    pub fn validate(&self) -> ReliefResult<()> {
        if !positive(self.size) {
            return Err(ReliefError::InvalidSize(self.size));
        }
        if !positive(self.height_scale) {
            return Err(ReliefError::InvalidHeightScale(self.height_scale));
        }
        if !positive(self.displacement_intensity) {
            return Err(ReliefError::InvalidIntensity(self.displacement_intensity));
        }
        Ok(())
    }
}

fn positive(value: f64) -> bool {
    value.is_finite() && value > 0.0
}
