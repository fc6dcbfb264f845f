//! Core mesh types for lithoforge.
//!
//! This crate provides the data model shared by the relief and export
//! pipelines:
//!
//! - [`Vertex`] - A point in 3D space with an optional normal and UV
//! - [`IndexedMesh`] - A triangle mesh with indexed vertices (grid meshes, slabs)
//! - [`TriangleSoup`] - Unindexed world-space triangles, the serializer's input
//! - [`Triangle`] - A concrete triangle with vertex positions
//! - [`Aabb`] - Axis-aligned bounding box
//!
//! # Units
//!
//! This library is **unit-agnostic**. All coordinates are `f64`.
//! The relief pipeline treats them as millimeters.
//!
//! # Coordinate System
//!
//! Uses a **right-handed coordinate system** with Z up. Relief surfaces lie
//! in the XY plane and are displaced along +Z.
//!
//! Face winding is **counter-clockwise (CCW) when viewed from outside**.
//! Normals point outward by the right-hand rule.
//!
//! # Example
//!
//! ```
//! use mesh_types::{IndexedMesh, MeshTopology, TriangleSoup, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.5, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! let soup = TriangleSoup::from_indexed(&mesh);
//! assert_eq!(soup.triangle_count(), 1);
//! assert_eq!(mesh.face_count(), 1);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod bounds;
mod mesh;
mod soup;
mod traits;
mod triangle;
mod vertex;

pub use bounds::Aabb;
pub use mesh::{IndexedMesh, cuboid};
pub use soup::{SoupNormals, TriangleSoup};
pub use traits::{MeshBounds, MeshTopology};
pub use triangle::Triangle;
pub use vertex::{Vertex, VertexAttributes};

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
