//! Photo to printable lithophane.
//!
//! This umbrella crate re-exports the lithoforge mesh crates and wires them
//! into the two export paths:
//!
//! ```text
//! RasterImage ─ build_heightfield ─ assemble_relief ─┐
//!                                                    ├─ flatten_scene ─ encode_stl_binary ─ bytes
//!                        SceneGraph (loaded asset) ──┘
//! ```
//!
//! Dark pixels become thick relief and bright pixels thin relief, so the
//! print reproduces the photo when lit from behind.
//!
//! # Quick Start
//!
//! ```
//! use lithoforge::prelude::*;
//!
//! // A decoded image, from the `image` feature or any other decoder.
//! let img = RasterImage::from_fn(64, 64, |x, y| {
//!     let v = ((x * y) % 256) as u8;
//!     [v, v, v, 255]
//! })?;
//!
//! let config = LithophaneConfig::default()
//!     .with_heightfield(HeightfieldParams::default().with_resolution(64));
//! let relief = image_to_relief(&img, &config)?;
//! let bytes = export_stl(relief, &config.stl_header)?;
//!
//! assert_eq!(bytes.len(), 84 + 50 * (2 * 63 * 63 + 12));
//! # Ok::<(), LithoError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`types`] - Core data structures: `IndexedMesh`, `Vertex`, `TriangleSoup`
//! - [`transform`] - 4x4 affine transforms for scene nodes
//! - [`heightfield`] - Image to quantized depth grid
//! - [`relief`] - Depth grid to displaced surface plus backing slab
//! - [`scene`] - Scene graph and world-space flattening
//! - [`io`] - Binary STL encode, atomic save, read-back
//!
//! # Feature Flags
//!
//! - `image` - Decode PNG and JPEG into a `RasterImage`
//! - `serde` - Serialize parameters and [`LithophaneConfig`]

#![warn(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod config;
mod error;
mod pipeline;

pub use config::LithophaneConfig;
pub use error::{LithoError, LithoResult};
pub use pipeline::{ExportSource, export_stl, image_to_relief, image_to_stl, save_export};

// =============================================================================
// Re-exports
// =============================================================================

/// Core data structures: `IndexedMesh`, `Vertex`, `TriangleSoup`.
pub use mesh_types as types;

/// 4x4 affine transforms.
pub use mesh_transform as transform;

/// Image to heightfield conversion.
pub use mesh_heightfield as heightfield;

/// Relief surface and slab assembly.
pub use mesh_relief as relief;

/// Scene graph and flattening.
pub use mesh_scene as scene;

/// Binary STL I/O.
pub use mesh_io as io;

// =============================================================================
// Prelude
// =============================================================================

/// Common imports for lithophane generation.
///
/// # Usage
///
/// ```
/// use lithoforge::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use mesh_types::{IndexedMesh, MeshBounds, MeshTopology, TriangleSoup, Vertex};

    // Transform
    pub use mesh_transform::Transform3D;

    // Pipeline stages
    pub use mesh_heightfield::{Heightfield, HeightfieldParams, RasterImage, build_heightfield};
    pub use mesh_relief::{ReliefMesh, ReliefParams, assemble_relief};
    pub use mesh_scene::{SceneGraph, flatten_scene};

    // I/O
    pub use mesh_io::{encode_stl_binary, load_stl, save_stl};

    // End to end
    pub use crate::{
        ExportSource, LithoError, LithoResult, LithophaneConfig, export_stl, image_to_relief,
        image_to_stl, save_export,
    };
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prelude_imports() {
        use prelude::*;

        let mesh = IndexedMesh::new();
        assert_eq!(mesh.vertex_count(), 0);
        assert_eq!(mesh.face_count(), 0);
        assert_eq!(SceneGraph::new("root").node_count(), 1);
    }

    #[test]
    fn test_module_reexports() {
        let _ = types::TriangleSoup::new();
        let _ = heightfield::HeightfieldParams::default();
        let _ = relief::ReliefParams::default();
        assert_eq!(io::stl_binary_size(0), 84);
    }
}
