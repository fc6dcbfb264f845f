//! Relief mesh assembly for lithoforge.
//!
//! Turns a [`Heightfield`](mesh_heightfield::Heightfield) into printable
//! geometry:
//!
//! - a displaced grid surface, two triangles per heightfield quad, UV-mapped
//!   to the source image
//! - a flat backing slab of fixed thickness with a small overhang
//!
//! Both are returned as siblings in a [`ReliefMesh`].
//!
//! # Example
//!
//! ```
//! use mesh_heightfield::{build_heightfield, HeightfieldParams, RasterImage};
//! use mesh_relief::{assemble_relief, ReliefParams};
//!
//! let img = RasterImage::from_fn(16, 16, |x, y| {
//!     let v = ((x ^ y) * 16) as u8;
//!     [v, v, v, 255]
//! })?;
//! let field = build_heightfield(&img, &HeightfieldParams::default().with_resolution(16))?;
//! let relief = assemble_relief(&field, &ReliefParams::default())?;
//!
//! assert_eq!(relief.surface.faces.len(), 2 * 15 * 15);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod error;
mod params;
mod relief;

pub use error::{ReliefError, ReliefResult};
pub use params::{BASE_OVERHANG, BASE_THICKNESS, ReliefParams};
pub use relief::{RELIEF_ROOT_NAME, ReliefMesh, assemble_relief};
