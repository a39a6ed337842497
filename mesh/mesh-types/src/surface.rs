//! Triangle surface with per-face normals.

use nalgebra::{Point3, Vector3};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed triangle surface, e.g. an extracted isosurface skin.
///
/// `normals[i]` is the unit normal of `faces[i]`. Faces use
/// counter-clockwise winding around their normal.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TriangleSurface {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,

    /// Triangles as indices into `vertices`.
    pub faces: Vec<[u32; 3]>,

    /// One unit normal per face.
    pub normals: Vec<Vector3<f64>>,
}

impl TriangleSurface {
    /// Create a new empty surface.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            faces: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if the surface has no triangles.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Total area of all triangles.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.faces
            .iter()
            .filter_map(|f| {
                let a = self.vertices.get(f[0] as usize)?;
                let b = self.vertices.get(f[1] as usize)?;
                let c = self.vertices.get(f[2] as usize)?;
                Some(0.5 * (b - a).cross(&(c - a)).norm())
            })
            .sum()
    }
}

/// Unit normal of triangle `a b c` by the right-hand rule.
///
/// Returns `None` for a degenerate triangle.
#[must_use]
pub fn face_normal(a: &Point3<f64>, b: &Point3<f64>, c: &Point3<f64>) -> Option<Vector3<f64>> {
    let n = (b - a).cross(&(c - a));
    let len = n.norm();
    if len > 1e-300 { Some(n / len) } else { None }
}
