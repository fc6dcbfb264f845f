//! Traits shared by the indexed and unindexed mesh representations.

use crate::{Aabb, Triangle};

/// Minimal topology interface so exporters can treat an [`IndexedMesh`]
/// and a [`TriangleSoup`] uniformly.
///
/// [`IndexedMesh`]: crate::IndexedMesh
/// [`TriangleSoup`]: crate::TriangleSoup
pub trait MeshTopology {
    /// Get the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get the number of faces (triangles).
    fn face_count(&self) -> usize;

    /// Check if the mesh is empty.
    fn is_empty(&self) -> bool {
        self.vertex_count() == 0 || self.face_count() == 0
    }

    /// Get a triangle by face index with resolved vertex positions.
    ///
    /// Returns `None` if the face index is out of bounds.
    fn triangle(&self, face_index: usize) -> Option<Triangle>;

    /// Iterate over all triangles with resolved vertex positions, skipping
    /// faces that reference missing vertices.
    fn triangles(&self) -> impl Iterator<Item = Triangle>;
}

/// Trait for types that can compute a bounding box.
pub trait MeshBounds {
    /// Compute the axis-aligned bounding box.
    ///
    /// Returns an empty AABB if the mesh has no vertices.
    fn bounds(&self) -> Aabb;
}
