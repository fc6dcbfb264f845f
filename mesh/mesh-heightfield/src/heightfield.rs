//! Heightfield construction from a decoded image.

#![allow(clippy::cast_precision_loss)]

use tracing::{debug, info};

use crate::error::{HeightfieldError, HeightfieldResult};
use crate::grid::{Grid, box_blur, sample_luminance};
use crate::params::HeightfieldParams;
use crate::raster::RasterImage;

/// Luminance spans narrower than this are treated as a flat image.
const DEGENERATE_RANGE: f64 = 1e-6;

/// A square grid of relief depths.
///
/// Row 0 is the top row of the source image. Every value is finite and lies
/// within `[min_depth, max_depth]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightfield {
    resolution: usize,
    depths: Vec<f64>,
    min_depth: f64,
    max_depth: f64,
}

impl Heightfield {
    /// Wrap precomputed depths, checking the heightfield invariants.
    ///
    /// # Errors
    ///
    /// Returns [`HeightfieldError::InvalidResolution`] if `resolution < 2` or
    /// `depths.len() != resolution^2`, [`HeightfieldError::InvalidDepthRange`]
    /// for bad bounds, and [`HeightfieldError::DepthOutOfRange`] for the
    /// first value outside them.
    pub fn from_depths(
        resolution: usize,
        depths: Vec<f64>,
        min_depth: f64,
        max_depth: f64,
    ) -> HeightfieldResult<Self> {
        if resolution < 2 || depths.len() != resolution * resolution {
            return Err(HeightfieldError::InvalidResolution {
                resolution,
                max: crate::params::MAX_RESOLUTION,
            });
        }
        if !(min_depth.is_finite() && max_depth.is_finite()) || min_depth > max_depth {
            return Err(HeightfieldError::InvalidDepthRange {
                min: min_depth,
                max: max_depth,
            });
        }
        if let Some((index, &value)) = depths
            .iter()
            .enumerate()
            .find(|&(_, &d)| !(min_depth..=max_depth).contains(&d))
        {
            return Err(HeightfieldError::DepthOutOfRange {
                index,
                value,
                min: min_depth,
                max: max_depth,
            });
        }
        Ok(Self {
            resolution,
            depths,
            min_depth,
            max_depth,
        })
    }

    /// Cells per side.
    #[must_use]
    pub const fn resolution(&self) -> usize {
        self.resolution
    }

    /// Row-major depth values.
    #[must_use]
    pub fn depths(&self) -> &[f64] {
        &self.depths
    }

    /// Depth at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn depth(&self, x: usize, y: usize) -> Option<f64> {
        (x < self.resolution && y < self.resolution).then(|| self.depths[y * self.resolution + x])
    }

    /// Lower depth bound (assigned to the brightest input).
    #[must_use]
    pub const fn min_depth(&self) -> f64 {
        self.min_depth
    }

    /// Upper depth bound (assigned to the darkest input).
    #[must_use]
    pub const fn max_depth(&self) -> f64 {
        self.max_depth
    }

    /// Smallest and largest depth actually present.
    #[must_use]
    pub fn depth_range(&self) -> (f64, f64) {
        self.depths
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &d| {
                (lo.min(d), hi.max(d))
            })
    }

    /// Sorted distinct depth values.
    #[must_use]
    pub fn distinct_depths(&self) -> Vec<f64> {
        let mut values = self.depths.clone();
        values.sort_by(f64::total_cmp);
        values.dedup();
        values
    }
}

/// Convert a decoded image into a quantized relief heightfield.
///
/// The pipeline is:
///
/// 1. Resample to a `resolution x resolution` luminance grid
///    (`0.2126 R + 0.7152 G + 0.0722 B`).
/// 2. Box blur with edge clamping.
/// 3. Normalize by the global luminance range (a flat image uses a unit
///    range instead of dividing by zero).
/// 4. Invert, so bright pixels become shallow and dark pixels deep.
/// 5. Apply `value^gamma`.
/// 6. Quantize to `levels` evenly spaced steps.
/// 7. Map `[0, 1]` onto `[min_depth, max_depth]`.
///
/// # Errors
///
/// Returns a parameter error from [`HeightfieldParams::validate`] before any
/// pixel is touched.
///
/// # Example
///
/// ```
/// use mesh_heightfield::{build_heightfield, HeightfieldParams, RasterImage};
///
/// let img = RasterImage::from_fn(8, 8, |x, _| {
///     let v = (x * 32) as u8;
///     [v, v, v, 255]
/// })?;
/// let params = HeightfieldParams::default().with_resolution(8);
/// let field = build_heightfield(&img, &params)?;
///
/// assert_eq!(field.resolution(), 8);
/// assert!(field.distinct_depths().len() <= params.levels);
/// # Ok::<(), mesh_heightfield::HeightfieldError>(())
/// ```
pub fn build_heightfield(
    image: &RasterImage,
    params: &HeightfieldParams,
) -> HeightfieldResult<Heightfield> {
    params.validate()?;

    info!(
        width = image.width(),
        height = image.height(),
        resolution = params.resolution,
        blur_radius = params.blur_radius,
        levels = params.levels,
        "Building heightfield"
    );

    let luminance = sample_luminance(image, params.resolution, params.sampling);
    let blurred = box_blur(&luminance, params.blur_radius);
    let depths = luminance_to_depths(blurred, params);

    let field = Heightfield {
        resolution: params.resolution,
        depths,
        min_depth: params.min_depth,
        max_depth: params.max_depth,
    };

    debug!(levels_used = field.distinct_depths().len(), "Heightfield built");
    Ok(field)
}

/// Steps 3-7: normalize, invert, gamma, quantize, remap.
fn luminance_to_depths(grid: Grid, params: &HeightfieldParams) -> Vec<f64> {
    let (lo, hi) = grid.min_max().unwrap_or((0.0, 0.0));
    let span = hi - lo;
    let range = if span > DEGENERATE_RANGE {
        span
    } else {
        debug!(min = lo, max = hi, "Degenerate luminance range, using unit range");
        1.0
    };

    let steps = (params.levels - 1) as f64;
    let depth_span = params.max_depth - params.min_depth;

    let mut values = grid.into_values();
    for v in &mut values {
        let normalized = ((*v - lo) / range).clamp(0.0, 1.0);
        let shaped = (1.0 - normalized).powf(params.gamma);
        let quantized = (shaped * steps).round() / steps;
        *v = depth_span
            .mul_add(quantized, params.min_depth)
            .clamp(params.min_depth, params.max_depth);
    }
    values
}
