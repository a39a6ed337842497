//! Vertex type carrying a scalar field sample.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A mesh vertex: a point in 3D space plus the scalar field value sampled there.
///
/// Vertices are immutable once created. Their identity is their index in the
/// owning mesh's vertex array, which is assigned monotonically at creation.
///
/// # Example
///
/// ```
/// use mesh_types::{Vertex, Point3};
///
/// let v1 = Vertex::new(Point3::new(1.0, 2.0, 3.0), 0.5);
/// let v2 = Vertex::from_coords(1.0, 2.0, 3.0, 0.5);
///
/// assert_eq!(v1, v2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vertex {
    /// 3D position.
    pub position: Point3<f64>,

    /// Scalar field value at this position.
    pub value: f64,
}

impl Vertex {
    /// Create a new vertex from a position and field value.
    #[inline]
    #[must_use]
    pub const fn new(position: Point3<f64>, value: f64) -> Self {
        Self { position, value }
    }

    /// Create a vertex from raw coordinates and a field value.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Vertex;
    ///
    /// let v = Vertex::from_coords(1.0, 2.0, 3.0, -1.0);
    /// assert_eq!(v.position.z, 3.0);
    /// assert_eq!(v.value, -1.0);
    /// ```
    #[inline]
    #[must_use]
    pub fn from_coords(x: f64, y: f64, z: f64, value: f64) -> Self {
        Self::new(Point3::new(x, y, z), value)
    }

    /// Linearly blend two vertices.
    ///
    /// The result is `t * self + (1 - t) * other` for both position and value.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::Vertex;
    ///
    /// let a = Vertex::from_coords(0.0, 0.0, 0.0, 0.0);
    /// let b = Vertex::from_coords(0.0, 0.0, 1.0, 2.0);
    /// let m = a.blend(&b, 0.25);
    /// assert!((m.position.z - 0.75).abs() < 1e-12);
    /// assert!((m.value - 1.5).abs() < 1e-12);
    /// ```
    #[inline]
    #[must_use]
    pub fn blend(&self, other: &Self, t: f64) -> Self {
        let position = Point3::from(self.position.coords * t + other.position.coords * (1.0 - t));
        Self {
            position,
            value: t.mul_add(self.value, (1.0 - t) * other.value),
        }
    }

    /// Check whether the position and value are all finite.
    #[inline]
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.coords.iter().all(|c| c.is_finite()) && self.value.is_finite()
    }
}
