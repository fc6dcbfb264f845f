//! Vertex types and attributes.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Optional attributes carried by a vertex.
///
/// - `normal`: assigned by the relief assembler or copied from a loaded asset
/// - `uv`: texture coordinates mapping a relief vertex back to its source pixel
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VertexAttributes {
    /// Unit normal vector.
    pub normal: Option<Vector3<f64>>,

    /// Texture coordinates (U, V) in `[0, 1]`.
    pub uv: Option<(f32, f32)>,
}

impl VertexAttributes {
    /// Create empty attributes with no values set.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            normal: None,
            uv: None,
        }
    }

    /// Check if any attributes are set.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.normal.is_none() && self.uv.is_none()
    }
}

/// A vertex in 3D space with optional attributes.
///
/// # Example
///
/// ```
/// use mesh_types::{Vertex, Point3, Vector3};
///
/// let v = Vertex::from_coords(1.0, 2.0, 3.0)
///     .with_normal(Vector3::z())
///     .with_uv(0.25, 0.75);
///
/// assert_eq!(v.position, Point3::new(1.0, 2.0, 3.0));
/// assert_eq!(v.uv(), Some((0.25, 0.75)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f64>,

    /// Optional attributes (normal, UV).
    pub attributes: VertexAttributes,
}

impl Vertex {
    /// Create a new vertex with only position set.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>) -> Self {
        Self {
            position,
            attributes: VertexAttributes::empty(),
        }
    }

    /// Create a vertex from raw coordinates.
    #[inline]
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn from_coords(x: f64, y: f64, z: f64) -> Self {
        Self::new(Point3::new(x, y, z))
    }

    /// Return this vertex with its normal set.
    #[inline]
    #[must_use]
    pub const fn with_normal(mut self, normal: Vector3<f64>) -> Self {
        self.attributes.normal = Some(normal);
        self
    }

    /// Return this vertex with its texture coordinates set.
    #[inline]
    #[must_use]
    pub const fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.attributes.uv = Some((u, v));
        self
    }

    /// Get the normal if set.
    #[inline]
    #[must_use]
    pub const fn normal(&self) -> Option<Vector3<f64>> {
        self.attributes.normal
    }

    /// Get the texture coordinates if set.
    #[inline]
    #[must_use]
    pub const fn uv(&self) -> Option<(f32, f32)> {
        self.attributes.uv
    }
}

impl From<Point3<f64>> for Vertex {
    fn from(position: Point3<f64>) -> Self {
        Self::new(position)
    }
}

impl From<[f64; 3]> for Vertex {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::from_coords(x, y, z)
    }
}
