//! Axis-aligned bounding box.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box (AABB).
///
/// # Example
///
/// ```
/// use mesh_types::{Aabb, Point3};
///
/// let points = [Point3::new(0.0, 0.0, 0.0), Point3::new(3.0, 4.0, 5.0)];
/// let aabb = Aabb::from_points(points.iter());
///
/// assert_eq!(aabb.max.y, 4.0);
/// assert!(!aabb.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aabb {
    /// Minimum corner (smallest x, y, z values).
    pub min: Point3<f64>,
    /// Maximum corner (largest x, y, z values).
    pub max: Point3<f64>,
}

impl Aabb {
    /// Create a new AABB from two corners, ordering each axis.
    #[must_use]
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Create an empty (inverted) AABB, the identity for [`Aabb::expand_to_include`].
    #[must_use]
    #[allow(clippy::missing_const_for_fn)] // Point3::new is not const in nalgebra
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Create an AABB from an iterator of points.
    ///
    /// Returns an empty AABB if the iterator is empty.
    #[must_use]
    pub fn from_points<'a>(points: impl Iterator<Item = &'a Point3<f64>>) -> Self {
        let mut aabb = Self::empty();
        for point in points {
            aabb.expand_to_include(point);
        }
        aabb
    }

    /// Check if the AABB is empty (min > max on any axis).
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Grow the box so it contains `point`.
    pub fn expand_to_include(&mut self, point: &Point3<f64>) {
        self.min = self.min.inf(point);
        self.max = self.max.sup(point);
    }
}

impl Default for Aabb {
    fn default() -> Self {
        Self::empty()
    }
}
