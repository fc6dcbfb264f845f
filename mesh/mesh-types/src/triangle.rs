//! Triangle type for geometric calculations.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A triangle with concrete vertex positions.
///
/// Winding is **counter-clockwise (CCW) when viewed from the front**
/// (normal points toward viewer).
///
/// # Example
///
/// ```
/// use mesh_types::{Triangle, Point3, Vector3};
///
/// let tri = Triangle::new(
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
/// );
///
/// assert_eq!(tri.facet_normal(), Vector3::z());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Triangle {
    /// First vertex.
    pub v0: Point3<f64>,
    /// Second vertex.
    pub v1: Point3<f64>,
    /// Third vertex.
    pub v2: Point3<f64>,
}

impl Triangle {
    /// Create a new triangle from three points.
    #[inline]
    #[must_use]
    pub const fn new(v0: Point3<f64>, v1: Point3<f64>, v2: Point3<f64>) -> Self {
        Self { v0, v1, v2 }
    }

    /// Compute the (unnormalized) face normal via cross product.
    ///
    /// The magnitude equals twice the triangle's area.
    #[inline]
    #[must_use]
    pub fn normal_unnormalized(&self) -> Vector3<f64> {
        let e1 = self.v1 - self.v0;
        let e2 = self.v2 - self.v0;
        e1.cross(&e2)
    }

    /// Compute the unit face normal.
    ///
    /// Returns `None` for degenerate triangles (zero area).
    #[must_use]
    pub fn normal(&self) -> Option<Vector3<f64>> {
        let n = self.normal_unnormalized();
        let len_sq = n.norm_squared();
        if len_sq > f64::EPSILON * f64::EPSILON {
            Some(n / len_sq.sqrt())
        } else {
            None
        }
    }

    /// Unit face normal, or the zero vector for a degenerate triangle.
    ///
    /// This is the value written into a facet record; STL readers treat a
    /// zero normal as "recompute from the vertices".
    #[inline]
    #[must_use]
    pub fn facet_normal(&self) -> Vector3<f64> {
        self.normal().unwrap_or_else(Vector3::zeros)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn collinear_points_have_zero_facet_normal() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
        );
        assert!(tri.normal().is_none());
        assert_eq!(tri.facet_normal(), Vector3::zeros());
    }

    #[test]
    fn ccw_triangle_faces_up() {
        let tri = Triangle::new(
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        );
        assert_relative_eq!(tri.facet_normal().z, 1.0);
        assert_relative_eq!(tri.normal_unnormalized().norm(), 4.0);
    }
}
