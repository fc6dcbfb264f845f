//! Affine transforms for scene nodes and meshes.
//!
//! [`Transform3D`] wraps a 4x4 matrix and provides the operations the scene
//! flattener needs: composing parent and local transforms, moving points and
//! direction vectors, and carrying normals through non-uniform scales.
//!
//! # Example
//!
//! ```
//! use mesh_transform::Transform3D;
//! use mesh_types::{IndexedMesh, Vertex};
//!
//! let mut mesh = IndexedMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0));
//! mesh.faces.push([0, 1, 2]);
//!
//! let moved = Transform3D::translation(1.0, 2.0, 3.0).apply_to_mesh(&mesh);
//! assert_eq!(moved.vertices[0].position.z, 3.0);
//! ```

// Safety: Deny unwrap/expect in library code. Tests may use them (workspace warns).
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]

mod transform;

pub use transform::Transform3D;
