//! Binary STL output for lithoforge.
//!
//! This crate turns a world-space [`TriangleSoup`](mesh_types::TriangleSoup)
//! into the binary STL layout accepted by every slicer:
//!
//! - [`encode_stl_binary`] - In-memory byte buffer, for downloads
//! - [`write_stl_binary`] - Streaming into any [`std::io::Write`]
//! - [`save_stl`] - Atomic file save (temporary file, then rename)
//! - [`decode_stl_binary`] / [`load_stl`] - Read-back, for verification
//!
//! Encoding cannot fail on a well-formed soup; malformed input is rejected
//! before the first byte is produced.
//!
//! # Example
//!
//! ```
//! use mesh_io::{encode_stl_binary, stl_binary_size, DEFAULT_STL_HEADER};
//! use mesh_types::{cuboid, Point3, TriangleSoup};
//!
//! let slab = cuboid(Point3::origin(), Point3::new(10.0, 10.0, 1.0));
//! let soup = TriangleSoup::from_indexed(&slab);
//!
//! let bytes = encode_stl_binary(&soup, DEFAULT_STL_HEADER)?;
//! assert_eq!(bytes.len(), stl_binary_size(12));
//! # Ok::<(), mesh_io::IoError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod error;
mod stl;

pub use error::{IoError, IoResult};
pub use stl::{
    DEFAULT_STL_HEADER, STL_HEADER_SIZE, STL_TRIANGLE_SIZE, decode_stl_binary, encode_stl_binary,
    load_stl, save_stl, stl_binary_size, write_stl_binary,
};
