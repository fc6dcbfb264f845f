//! Parameters for heightfield construction.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{HeightfieldError, HeightfieldResult};

/// Default grid resolution (cells per side).
pub const DEFAULT_RESOLUTION: usize = 256;

/// Largest accepted grid resolution.
pub const MAX_RESOLUTION: usize = 4096;

/// Largest accepted blur radius, in cells.
pub const MAX_BLUR_RADIUS: usize = 64;

/// Default quantization level count.
pub const DEFAULT_LEVELS: usize = 6;

/// Default mid-tone gamma.
pub const DEFAULT_GAMMA: f64 = 1.12;

/// Default shallowest relief depth (brightest pixels), in millimeters.
pub const MIN_RELIEF_DEPTH: f64 = 0.8;

/// Default deepest relief depth (darkest pixels), in millimeters.
pub const MAX_RELIEF_DEPTH: f64 = 3.0;

/// How the source image is resampled onto the square grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Sampling {
    /// Take the pixel under each cell center.
    Nearest,
    /// Interpolate the four pixels around each cell center.
    #[default]
    Bilinear,
}

/// Parameters for [`build_heightfield`](crate::build_heightfield).
///
/// # Example
///
/// ```
/// use mesh_heightfield::{HeightfieldParams, Sampling};
///
/// let params = HeightfieldParams::default()
///     .with_resolution(128)
///     .with_levels(8)
///     .with_sampling(Sampling::Nearest);
/// assert!(params.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HeightfieldParams {
    /// Cells per side of the output grid. Default: 256
    pub resolution: usize,

    /// Box blur radius in cells; 0 disables smoothing. Default: 1
    pub blur_radius: usize,

    /// Number of discrete depth levels. Default: 6
    pub levels: usize,

    /// Exponent applied to the inverted luminance. Default: 1.12
    pub gamma: f64,

    /// Depth assigned to the brightest cells. Default: 0.8
    pub min_depth: f64,

    /// Depth assigned to the darkest cells. Default: 3.0
    pub max_depth: f64,

    /// Resampling mode. Default: bilinear
    pub sampling: Sampling,
}

impl Default for HeightfieldParams {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            blur_radius: 1,
            levels: DEFAULT_LEVELS,
            gamma: DEFAULT_GAMMA,
            min_depth: MIN_RELIEF_DEPTH,
            max_depth: MAX_RELIEF_DEPTH,
            sampling: Sampling::Bilinear,
        }
    }
}

impl HeightfieldParams {
    /// Set the grid resolution.
    #[must_use]
    pub const fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution;
        self
    }

    /// Set the blur radius.
    #[must_use]
    pub const fn with_blur_radius(mut self, radius: usize) -> Self {
        self.blur_radius = radius;
        self
    }

    /// Set the number of quantization levels.
    #[must_use]
    pub const fn with_levels(mut self, levels: usize) -> Self {
        self.levels = levels;
        self
    }

    /// Set the mid-tone gamma.
    #[must_use]
    pub const fn with_gamma(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Set the depth bounds.
    #[must_use]
    pub const fn with_depth_range(mut self, min_depth: f64, max_depth: f64) -> Self {
        self.min_depth = min_depth;
        self.max_depth = max_depth;
        self
    }

    /// Set the resampling mode.
    #[must_use]
    pub const fn with_sampling(mut self, sampling: Sampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Reject parameters that would make the pipeline divide by zero or
    /// produce non-finite depths.
    ///
    /// # Errors
    ///
    /// Returns the first offending parameter as a [`HeightfieldError`].
    pub fn validate(&self) -> HeightfieldResult<()> {
        if !(2..=MAX_RESOLUTION).contains(&self.resolution) {
            return Err(HeightfieldError::InvalidResolution {
                resolution: self.resolution,
                max: MAX_RESOLUTION,
            });
        }
        if self.blur_radius > MAX_BLUR_RADIUS {
            return Err(HeightfieldError::InvalidBlurRadius {
                radius: self.blur_radius,
                max: MAX_BLUR_RADIUS,
            });
        }
        if self.levels < 2 {
            return Err(HeightfieldError::InvalidLevels(self.levels));
        }
        if !(self.gamma.is_finite() && self.gamma > 0.0) {
            return Err(HeightfieldError::InvalidGamma(self.gamma));
        }
        if !(self.min_depth.is_finite() && self.max_depth.is_finite())
            || self.min_depth > self.max_depth
        {
            return Err(HeightfieldError::InvalidDepthRange {
                min: self.min_depth,
                max: self.max_depth,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = HeightfieldParams::default();
        assert_eq!(params.resolution, 256);
        assert_eq!(params.blur_radius, 1);
        assert_eq!(params.levels, 6);
        assert!((params.gamma - 1.12).abs() < 1e-12);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn rejects_small_resolution() {
        let err = HeightfieldParams::default().with_resolution(1).validate();
        assert!(matches!(err, Err(HeightfieldError::InvalidResolution { resolution: 1, .. })));
    }

    #[test]
    fn rejects_oversized_resolution() {
        let err = HeightfieldParams::default()
            .with_resolution(MAX_RESOLUTION + 1)
            .validate();
        assert!(err.is_err());
    }

    #[test]
    fn rejects_huge_blur_radius() {
        let params = HeightfieldParams::default()
            .with_resolution(2)
            .with_blur_radius(usize::MAX);
        let err = params.validate().unwrap_err();
        assert!(matches!(err, HeightfieldError::InvalidBlurRadius { .. }));
        assert!(err.is_invalid_parameters());

        let at_limit = HeightfieldParams::default().with_blur_radius(MAX_BLUR_RADIUS);
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn rejects_single_level() {
        let err = HeightfieldParams::default().with_levels(1).validate();
        assert!(matches!(err, Err(HeightfieldError::InvalidLevels(1))));
    }

    #[test]
    fn rejects_bad_gamma_and_depths() {
        assert!(HeightfieldParams::default().with_gamma(0.0).validate().is_err());
        assert!(HeightfieldParams::default().with_gamma(f64::NAN).validate().is_err());
        assert!(
            HeightfieldParams::default()
                .with_depth_range(3.0, 1.0)
                .validate()
                .is_err()
        );
        assert!(
            HeightfieldParams::default()
                .with_depth_range(0.0, f64::INFINITY)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn equal_depth_bounds_are_allowed() {
        let params = HeightfieldParams::default().with_depth_range(2.0, 2.0);
        assert!(params.validate().is_ok());
    }
}
