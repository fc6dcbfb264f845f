//! Unindexed triangle soup.

use crate::{Aabb, IndexedMesh, MeshBounds, MeshTopology, Triangle};
use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Normals carried alongside a [`TriangleSoup`].
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SoupNormals {
    /// No normals; consumers derive facet normals from the vertices.
    #[default]
    None,
    /// One normal per triangle.
    PerFace(Vec<Vector3<f64>>),
    /// One normal per vertex (three per triangle).
    PerVertex(Vec<Vector3<f64>>),
}

impl SoupNormals {
    /// Number of stored normal vectors.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::None => 0,
            Self::PerFace(n) | Self::PerVertex(n) => n.len(),
        }
    }

    /// Check whether no normals are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A flat list of world-space triangles with no shared vertices.
///
/// Every three consecutive entries of `positions` form one triangle, so a
/// well-formed soup has `positions.len() % 3 == 0`. This is the sole input
/// to STL serialization.
///
/// # Example
///
/// ```
/// use mesh_types::{Point3, TriangleSoup};
///
/// let mut soup = TriangleSoup::new();
/// soup.push_triangle([
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// ]);
///
/// assert!(soup.is_well_formed());
/// assert_eq!(soup.triangle_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleSoup {
    /// Vertex positions, three per triangle.
    pub positions: Vec<Point3<f64>>,

    /// Optional normals.
    pub normals: SoupNormals,
}

impl TriangleSoup {
    /// Create an empty soup.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            positions: Vec::new(),
            normals: SoupNormals::None,
        }
    }

    /// Create a soup from raw positions without normals.
    #[must_use]
    pub const fn from_positions(positions: Vec<Point3<f64>>) -> Self {
        Self {
            positions,
            normals: SoupNormals::None,
        }
    }

    /// Expand an indexed mesh into a soup.
    ///
    /// Vertex normals are carried over as [`SoupNormals::PerVertex`] when
    /// every vertex has one. Faces referencing missing vertices are skipped.
    #[must_use]
    pub fn from_indexed(mesh: &IndexedMesh) -> Self {
        let keep_normals = mesh.has_vertex_normals();
        let mut positions = Vec::with_capacity(mesh.faces.len() * 3);
        let mut normals = Vec::with_capacity(if keep_normals { mesh.faces.len() * 3 } else { 0 });

        for face in &mesh.faces {
            let Some(corners) = face
                .iter()
                .map(|&i| mesh.vertices.get(i as usize))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            for v in corners {
                positions.push(v.position);
                if keep_normals {
                    normals.push(v.normal().unwrap_or_else(Vector3::zeros));
                }
            }
        }

        Self {
            positions,
            normals: if keep_normals {
                SoupNormals::PerVertex(normals)
            } else {
                SoupNormals::None
            },
        }
    }

    /// Number of complete triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }

    /// Check the soup invariants: whole triangles, and normal counts that
    /// match the normal mode.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        if self.positions.len() % 3 != 0 {
            return false;
        }
        match &self.normals {
            SoupNormals::None => true,
            SoupNormals::PerFace(n) => n.len() == self.triangle_count(),
            SoupNormals::PerVertex(n) => n.len() == self.positions.len(),
        }
    }

    /// Append one triangle. Any stored normals are dropped, since the new
    /// triangle has none.
    pub fn push_triangle(&mut self, corners: [Point3<f64>; 3]) {
        self.positions.extend(corners);
        self.normals = SoupNormals::None;
    }

    /// Append another soup. Normals survive only when both sides use the
    /// same mode.
    pub fn append(&mut self, mut other: Self) {
        let was_empty = self.positions.is_empty();
        let other_empty = other.positions.is_empty();
        self.positions.append(&mut other.positions);
        self.normals = match (std::mem::take(&mut self.normals), other.normals) {
            (_, n) if was_empty => n,
            (n, _) if other_empty => n,
            (SoupNormals::PerFace(mut a), SoupNormals::PerFace(mut b)) => {
                a.append(&mut b);
                SoupNormals::PerFace(a)
            }
            (SoupNormals::PerVertex(mut a), SoupNormals::PerVertex(mut b)) => {
                a.append(&mut b);
                SoupNormals::PerVertex(a)
            }
            _ => SoupNormals::None,
        };
    }
}

impl MeshTopology for TriangleSoup {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    fn face_count(&self) -> usize {
        self.triangle_count()
    }

    fn triangle(&self, face_index: usize) -> Option<Triangle> {
        let base = face_index.checked_mul(3)?;
        match self.positions.get(base..base.checked_add(3)?)? {
            &[v0, v1, v2] => Some(Triangle::new(v0, v1, v2)),
            _ => None,
        }
    }

    fn triangles(&self) -> impl Iterator<Item = Triangle> {
        self.positions
            .chunks_exact(3)
            .map(|c| Triangle::new(c[0], c[1], c[2]))
    }
}

impl MeshBounds for TriangleSoup {
    fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Vertex, cuboid};

    fn unit_triangle() -> [Point3<f64>; 3] {
        [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
        ]
    }

    #[test]
    fn from_indexed_expands_every_face() {
        let slab = cuboid(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        let soup = TriangleSoup::from_indexed(&slab);
        assert_eq!(soup.triangle_count(), 12);
        assert_eq!(soup.vertex_count(), 36);
        assert_eq!(soup.normals, SoupNormals::None);
        assert!(soup.is_well_formed());
    }

    #[test]
    fn from_indexed_keeps_complete_vertex_normals() {
        let mut mesh = IndexedMesh::from_parts(
            unit_triangle().into_iter().map(Vertex::new).collect(),
            vec![[0, 1, 2]],
        );
        mesh.compute_vertex_normals();
        let soup = TriangleSoup::from_indexed(&mesh);
        assert!(matches!(&soup.normals, SoupNormals::PerVertex(n) if n.len() == 3));
    }

    #[test]
    fn partial_triangle_is_malformed() {
        let mut soup = TriangleSoup::from_positions(unit_triangle().to_vec());
        assert!(soup.is_well_formed());
        soup.positions.push(Point3::origin());
        assert!(!soup.is_well_formed());
        assert_eq!(soup.triangle_count(), 1);
    }

    #[test]
    fn normal_count_must_match_mode() {
        let mut soup = TriangleSoup::from_positions(unit_triangle().to_vec());
        soup.normals = SoupNormals::PerFace(vec![Vector3::z(), Vector3::z()]);
        assert!(!soup.is_well_formed());
        soup.normals = SoupNormals::PerVertex(vec![Vector3::z(); 3]);
        assert!(soup.is_well_formed());
    }

    #[test]
    fn append_mixed_modes_drops_normals() {
        let mut a = TriangleSoup::from_positions(unit_triangle().to_vec());
        a.normals = SoupNormals::PerFace(vec![Vector3::z()]);
        let b = TriangleSoup::from_positions(unit_triangle().to_vec());

        a.append(b);
        assert_eq!(a.triangle_count(), 2);
        assert_eq!(a.normals, SoupNormals::None);
    }

    #[test]
    fn append_into_empty_takes_other_normals() {
        let mut a = TriangleSoup::new();
        let mut b = TriangleSoup::from_positions(unit_triangle().to_vec());
        b.normals = SoupNormals::PerFace(vec![Vector3::z()]);

        a.append(b);
        assert!(a.is_well_formed());
        assert_eq!(a.normals.len(), 1);
    }
}
