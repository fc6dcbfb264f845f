//! Indexed triangle mesh.

use crate::{Aabb, MeshBounds, MeshTopology, Triangle, Vertex};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle mesh.
///
/// Grid-shaped geometry (relief surfaces, backing slabs, meshes attached to
/// scene nodes) is stored this way: vertices once, faces as index triples.
///
/// # Winding Order
///
/// Faces use **counter-clockwise (CCW) winding** when viewed from outside.
///
/// # Example
///
/// ```
/// use mesh_types::{IndexedMesh, Vertex, MeshTopology};
///
/// let vertices = vec![
///     Vertex::from_coords(0.0, 0.0, 0.0),
///     Vertex::from_coords(1.0, 0.0, 0.0),
///     Vertex::from_coords(0.0, 1.0, 0.0),
/// ];
/// let mesh = IndexedMesh::from_parts(vertices, vec![[0, 1, 2]]);
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.face_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IndexedMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Triangle faces as indices into the vertex array.
    /// Each face is `[v0, v1, v2]` with counter-clockwise winding.
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
        }
    }

    /// Create a mesh from vertices and faces.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, faces: Vec<[u32; 3]>) -> Self {
        Self { vertices, faces }
    }

    /// Check that every face references an existing vertex.
    #[must_use]
    pub fn indices_in_bounds(&self) -> bool {
        let n = self.vertices.len();
        self.faces
            .iter()
            .all(|face| face.iter().all(|&i| (i as usize) < n))
    }

    /// Check whether every vertex carries a normal.
    #[must_use]
    pub fn has_vertex_normals(&self) -> bool {
        !self.vertices.is_empty() && self.vertices.iter().all(|v| v.normal().is_some())
    }

    /// Recompute smooth vertex normals from the adjacent faces.
    ///
    /// Each face contributes its unnormalized normal, so larger faces weigh
    /// more. Faces referencing missing vertices are ignored. Vertices
    /// touched only by degenerate or ignored faces fall back to +Z.
    pub fn compute_vertex_normals(&mut self) {
        let mut accum = vec![Vector3::<f64>::zeros(); self.vertices.len()];

        for (face_index, face) in self.faces.iter().enumerate() {
            let Some(tri) = self.triangle(face_index) else {
                continue;
            };
            let n = tri.normal_unnormalized();
            for &i in face {
                accum[i as usize] += n;
            }
        }

        for (vertex, n) in self.vertices.iter_mut().zip(accum) {
            vertex.attributes.normal = Some(n.try_normalize(f64::EPSILON).unwrap_or_else(Vector3::z));
        }
    }
}

impl MeshTopology for IndexedMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.faces.len()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let &[i0, i1, i2] = self.faces.get(face_index)?;
        Some(Triangle::new(
            self.vertices.get(i0 as usize)?.position,
            self.vertices.get(i1 as usize)?.position,
            self.vertices.get(i2 as usize)?.position,
        ))
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        (0..self.faces.len()).filter_map(|i| self.triangle(i))
    }
}

impl MeshBounds for IndexedMesh {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.vertices.iter().map(|v| &v.position))
    }
}

/// Build a closed box spanning `min`..`max` with outward-facing winding.
///
/// Used for backing slabs beneath relief surfaces.
///
/// # Example
///
/// ```
/// use mesh_types::{cuboid, MeshTopology, Point3};
///
/// let slab = cuboid(Point3::new(-1.0, -1.0, -0.5), Point3::new(1.0, 1.0, 0.0));
/// assert_eq!(slab.vertex_count(), 8);
/// assert_eq!(slab.face_count(), 12);
/// ```
#[must_use]
pub fn cuboid(min: Point3<f64>, max: Point3<f64>) -> IndexedMesh {
    let b = Aabb::new(min, max);
    let (lo, hi) = (b.min, b.max);

    let corners = [
        [lo.x, lo.y, lo.z],
        [hi.x, lo.y, lo.z],
        [hi.x, hi.y, lo.z],
        [lo.x, hi.y, lo.z],
        [lo.x, lo.y, hi.z],
        [hi.x, lo.y, hi.z],
        [hi.x, hi.y, hi.z],
        [lo.x, hi.y, hi.z],
    ];

    #[rustfmt::skip]
    let faces = vec![
        [0, 2, 1], [0, 3, 2], // -Z
        [4, 5, 6], [4, 6, 7], // +Z
        [0, 1, 5], [0, 5, 4], // -Y
        [3, 7, 6], [3, 6, 2], // +Y
        [0, 4, 7], [0, 7, 3], // -X
        [1, 2, 6], [1, 6, 5], // +X
    ];

    IndexedMesh::from_parts(corners.into_iter().map(Vertex::from).collect(), faces)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn signed_volume(mesh: &IndexedMesh) -> f64 {
        mesh.triangles()
            .map(|t| t.v0.coords.dot(&t.v1.coords.cross(&t.v2.coords)))
            .sum::<f64>()
            / 6.0
    }

    #[test]
    fn cuboid_is_closed_and_outward() {
        let slab = cuboid(Point3::new(0.0, 0.0, -2.0), Point3::new(3.0, 4.0, 0.0));
        assert_relative_eq!(signed_volume(&slab), 24.0, epsilon = 1e-10);
        assert!(slab.indices_in_bounds());
    }

    #[test]
    fn flat_grid_normals_point_up() {
        let mut mesh = IndexedMesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 1.0, 0.0),
                Vertex::from_coords(1.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [1, 3, 2]],
        );
        assert!(!mesh.has_vertex_normals());

        mesh.compute_vertex_normals();
        assert!(mesh.has_vertex_normals());
        for v in &mesh.vertices {
            assert_eq!(v.normal(), Some(Vector3::z()));
        }
    }

    #[test]
    fn triangle_lookup_rejects_bad_index() {
        let mesh = IndexedMesh::from_parts(vec![Vertex::from_coords(0.0, 0.0, 0.0)], vec![[0, 1, 2]]);
        assert!(!mesh.indices_in_bounds());
        assert!(mesh.triangle(0).is_none());
        assert!(mesh.triangle(5).is_none());
    }

    #[test]
    fn out_of_range_faces_are_skipped() {
        let mut mesh = IndexedMesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 1.0, 0.0),
            ],
            vec![[0, 1, 2], [0, 1, 9]],
        );
        assert_eq!(mesh.triangles().count(), 1);

        mesh.compute_vertex_normals();
        for v in &mesh.vertices {
            assert_eq!(v.normal(), Some(Vector3::z()));
        }
    }

    #[test]
    fn cuboid_bounds_match_corners() {
        let slab = cuboid(Point3::new(1.0, 1.0, 1.0), Point3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(slab.bounds().min.z, -1.0);
        assert_relative_eq!(slab.bounds().max.x, 1.0);
    }
}
