//! Image to relief heightfield conversion for lithoforge.
//!
//! Turns a decoded RGBA image into a square grid of quantized depths:
//!
//! - [`RasterImage`] - Immutable RGBA8 pixel buffer
//! - [`sample_luminance`] / [`box_blur`] - Resample and smoothing passes
//! - [`build_heightfield`] - The full normalize, invert, gamma, quantize pipeline
//! - [`Heightfield`] - The result, ready for relief assembly
//!
//! Dark pixels become deep relief and bright pixels shallow relief, so a
//! backlit print reproduces the photo.
//!
//! # Features
//!
//! - `image`: decode PNG and JPEG bytes through the `image` crate
//! - `serde`: serialize [`HeightfieldParams`] and [`Sampling`]
//!
//! # Example
//!
//! ```
//! use mesh_heightfield::{build_heightfield, HeightfieldParams, RasterImage};
//!
//! // A horizontal gradient, black on the left.
//! let img = RasterImage::from_fn(64, 32, |x, _| {
//!     let v = (x * 4) as u8;
//!     [v, v, v, 255]
//! })?;
//!
//! let field = build_heightfield(&img, &HeightfieldParams::default().with_resolution(32))?;
//! let left = field.depth(0, 16).unwrap_or_default();
//! let right = field.depth(31, 16).unwrap_or_default();
//! assert!(left > right);
//! # Ok::<(), mesh_heightfield::HeightfieldError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod grid;
mod heightfield;
mod params;
mod raster;

pub use error::{HeightfieldError, HeightfieldResult};
pub use grid::{Grid, box_blur, sample_luminance};
pub use heightfield::{Heightfield, build_heightfield};
pub use params::{
    DEFAULT_GAMMA, DEFAULT_LEVELS, DEFAULT_RESOLUTION, HeightfieldParams, MAX_BLUR_RADIUS,
    MAX_RELIEF_DEPTH, MAX_RESOLUTION, MIN_RELIEF_DEPTH, Sampling,
};
pub use raster::RasterImage;
