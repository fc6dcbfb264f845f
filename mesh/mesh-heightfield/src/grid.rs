//! Square scalar grids and the resample and blur passes over them.

// Grid coordinates are small; conversions between usize, u32 and f64 are exact.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]

use rayon::prelude::*;

use crate::params::{MAX_BLUR_RADIUS, Sampling};
use crate::raster::RasterImage;

/// A `size x size` grid of `f64` values in row-major order.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    values: Vec<f64>,
}

impl Grid {
    /// Create a grid with every cell set to `value`.
    #[must_use]
    pub fn filled(size: usize, value: f64) -> Self {
        Self {
            size,
            values: vec![value; size * size],
        }
    }

    /// Wrap existing values. Returns `None` unless `values.len() == size * size`.
    #[must_use]
    pub fn from_values(size: usize, values: Vec<f64>) -> Option<Self> {
        (values.len() == size * size).then_some(Self { size, values })
    }

    /// Cells per side.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Row-major cell values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the grid, returning its values.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Value at `(x, y)`, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, x: usize, y: usize) -> Option<f64> {
        (x < self.size && y < self.size).then(|| self.values[y * self.size + x])
    }

    /// Smallest and largest cell value, or `None` for an empty grid.
    #[must_use]
    pub fn min_max(&self) -> Option<(f64, f64)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Resample `image` onto a `resolution x resolution` luminance grid.
///
/// Cell centers are mapped onto pixel centers, so the grid covers the whole
/// image regardless of aspect ratio. Lookups outside the image clamp to the
/// nearest edge pixel.
#[must_use]
pub fn sample_luminance(image: &RasterImage, resolution: usize, sampling: Sampling) -> Grid {
    let sx = f64::from(image.width()) / resolution as f64;
    let sy = f64::from(image.height()) / resolution as f64;

    let mut values = vec![0.0; resolution * resolution];
    values
        .par_chunks_mut(resolution.max(1))
        .enumerate()
        .for_each(|(y, row)| {
            let fy = (y as f64 + 0.5) * sy;
            for (x, cell) in row.iter_mut().enumerate() {
                let fx = (x as f64 + 0.5) * sx;
                *cell = match sampling {
                    Sampling::Nearest => image.luminance(fx as u32, fy as u32),
                    Sampling::Bilinear => bilinear(image, fx - 0.5, fy - 0.5),
                };
            }
        });

    Grid {
        size: resolution,
        values,
    }
}

fn bilinear(image: &RasterImage, fx: f64, fy: f64) -> f64 {
    let fx = fx.clamp(0.0, f64::from(image.width() - 1));
    let fy = fy.clamp(0.0, f64::from(image.height() - 1));
    let (x0, y0) = (fx.floor() as u32, fy.floor() as u32);
    let (tx, ty) = (fx - f64::from(x0), fy - f64::from(y0));

    let top = lerp(image.luminance(x0, y0), image.luminance(x0 + 1, y0), tx);
    let bottom = lerp(
        image.luminance(x0, y0 + 1),
        image.luminance(x0 + 1, y0 + 1),
        tx,
    );
    lerp(top, bottom, ty)
}

// Written as a + (b - a) * t so equal endpoints return exactly `a`.
#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (b - a).mul_add(t, a)
}

/// Square box blur with edge clamping.
///
/// Each output cell is the mean of the `(2r + 1)^2` input cells around it,
/// with out-of-range coordinates clamped to the border. Rows are computed in
/// parallel; the input is only read and each output row is written by one
/// worker. A radius of zero returns an exact copy; radii above
/// [`MAX_BLUR_RADIUS`] are clamped to it.
#[must_use]
pub fn box_blur(grid: &Grid, radius: usize) -> Grid {
    let radius = radius.min(MAX_BLUR_RADIUS);
    if radius == 0 || grid.size == 0 {
        return grid.clone();
    }

    let n = grid.size;
    let last = n - 1;
    let window = (2 * radius + 1) as f64;
    let norm = 1.0 / (window * window);

    let mut values = vec![0.0; n * n];
    values.par_chunks_mut(n).enumerate().for_each(|(y, row)| {
        for (x, cell) in row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for dy in -(radius as isize)..=radius as isize {
                let sy = clamp_offset(y, dy, last);
                let src_row = &grid.values[sy * n..(sy + 1) * n];
                for dx in -(radius as isize)..=radius as isize {
                    sum += src_row[clamp_offset(x, dx, last)];
                }
            }
            *cell = sum * norm;
        }
    });

    Grid { size: n, values }
}

#[inline]
fn clamp_offset(base: usize, delta: isize, last: usize) -> usize {
    base.saturating_add_signed(delta).min(last)
}
