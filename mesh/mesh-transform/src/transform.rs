//! 3D transformation matrix operations.

use mesh_types::{IndexedMesh, Point3};
use nalgebra::{Matrix3, Matrix4, Translation3, UnitQuaternion, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A 3D affine transformation represented as a 4x4 matrix.
///
/// Scene nodes store one of these as their local transform; the flattener
/// multiplies them down the hierarchy (`parent.compose(&local)`).
///
/// # Example
///
/// ```
/// use mesh_transform::Transform3D;
/// use mesh_types::Point3;
///
/// let parent = Transform3D::translation(10.0, 0.0, 0.0);
/// let local = Transform3D::uniform_scale(2.0);
/// let world = parent.compose(&local);
///
/// let p = world.transform_point(&Point3::new(1.0, 0.0, 0.0));
/// assert_eq!(p, Point3::new(12.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Transform3D {
    /// The 4x4 transformation matrix in column-major order.
    matrix: Matrix4<f64>,
}

impl Default for Transform3D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform3D {
    /// Create a transformation from 16 column-major values, the layout
    /// glTF and most asset loaders hand out.
    #[must_use]
    pub fn from_column_slice(values: &[f64; 16]) -> Self {
        Self {
            matrix: Matrix4::from_column_slice(values),
        }
    }

    /// Create the identity transformation (no change).
    #[must_use]
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Create a translation transformation.
    #[must_use]
    pub fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self {
            matrix: Matrix4::new_translation(&Vector3::new(tx, ty, tz)),
        }
    }

    /// Create a uniform scaling transformation.
    #[must_use]
    pub fn uniform_scale(factor: f64) -> Self {
        Self::scale(factor, factor, factor)
    }

    /// Create a non-uniform scaling transformation.
    #[must_use]
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self {
            matrix: Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz)),
        }
    }

    /// Create a rotation of `angle` radians around `axis`.
    ///
    /// Returns the identity if `axis` has zero length.
    #[must_use]
    pub fn rotation_axis(axis: Vector3<f64>, angle: f64) -> Self {
        match nalgebra::Unit::try_new(axis, f64::EPSILON) {
            Some(axis) => Self {
                matrix: UnitQuaternion::from_axis_angle(&axis, angle).to_homogeneous(),
            },
            None => Self::identity(),
        }
    }

    /// Build `T * R * S` from translation, rotation and scale, the
    /// decomposed node transform used by scene-asset formats.
    #[must_use]
    pub fn from_trs(
        translation: Vector3<f64>,
        rotation: UnitQuaternion<f64>,
        scale: Vector3<f64>,
    ) -> Self {
        let t = Translation3::from(translation).to_homogeneous();
        let r = rotation.to_homogeneous();
        let s = Matrix4::new_nonuniform_scaling(&scale);
        Self { matrix: t * r * s }
    }

    /// Get the underlying 4x4 matrix.
    #[must_use]
    pub const fn matrix(&self) -> &Matrix4<f64> {
        &self.matrix
    }

    /// Compose `self` with a child transform: the result applies `child`
    /// first, then `self` (`self * child`).
    #[must_use]
    pub fn compose(&self, child: &Self) -> Self {
        Self {
            matrix: self.matrix * child.matrix,
        }
    }

    /// Determinant of the linear (upper 3x3) part.
    ///
    /// Negative values mean the transform mirrors geometry and flips
    /// triangle winding.
    #[must_use]
    pub fn determinant(&self) -> f64 {
        self.linear().determinant()
    }

    /// Check whether this transform mirrors geometry.
    #[must_use]
    pub fn is_mirroring(&self) -> bool {
        self.determinant() < 0.0
    }

    /// Transform a point (applies translation).
    #[must_use]
    pub fn transform_point(&self, point: &Point3<f64>) -> Point3<f64> {
        self.matrix.transform_point(point)
    }

    /// Transform a direction vector (ignores translation).
    #[must_use]
    pub fn transform_vector(&self, vector: &Vector3<f64>) -> Vector3<f64> {
        self.matrix.transform_vector(vector)
    }

    /// Transform a normal vector with the inverse transpose and renormalize.
    ///
    /// Returns `None` when the linear part is singular or the result has
    /// zero length.
    #[must_use]
    pub fn transform_normal(&self, normal: &Vector3<f64>) -> Option<Vector3<f64>> {
        let inv = self.linear().try_inverse()?;
        (inv.transpose() * normal).try_normalize(f64::EPSILON)
    }

    /// Apply this transformation to all vertices of a mesh.
    ///
    /// Creates a new mesh with transformed positions and normals. Normals
    /// that cannot be carried through a singular transform are cleared.
    #[must_use]
    pub fn apply_to_mesh(&self, mesh: &IndexedMesh) -> IndexedMesh {
        let mut result = mesh.clone();

        for vertex in &mut result.vertices {
            vertex.position = self.transform_point(&vertex.position);
            vertex.attributes.normal = vertex
                .attributes
                .normal
                .and_then(|n| self.transform_normal(&n));
        }

        if self.is_mirroring() {
            for face in &mut result.faces {
                face.swap(1, 2);
            }
        }

        result
    }

    fn linear(&self) -> Matrix3<f64> {
        self.matrix.fixed_view::<3, 3>(0, 0).into_owned()
    }
}
