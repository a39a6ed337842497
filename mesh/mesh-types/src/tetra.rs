//! Edge and tetrahedron topology.

use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Local vertex slots of the six tetrahedron edges.
///
/// Edge `i` of a [`Tetrahedron`] connects slots `TET_EDGES[i][0]` and
/// `TET_EDGES[i][1]`. Edges `i` and `5 - i` are opposite (share no vertex).
pub const TET_EDGES: [[usize; 2]; 6] = [[0, 1], [0, 2], [0, 3], [1, 2], [1, 3], [2, 3]];

/// For each local edge, the local edge that shares no vertex with it.
pub const TET_OPPOSITE_EDGE: [usize; 6] = [5, 4, 3, 2, 1, 0];

/// An undirected edge between two vertices, stored in canonical order.
///
/// `Edge::new(a, b)` and `Edge::new(b, a)` compare equal and hash the same,
/// which makes an edge usable as a dictionary key regardless of which cell
/// it was reached from.
///
/// # Example
///
/// ```
/// use mesh_types::Edge;
///
/// assert_eq!(Edge::new(7, 2), Edge::new(2, 7));
/// assert_eq!(Edge::new(7, 2).v0, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    /// Smaller vertex index.
    pub v0: u32,
    /// Larger vertex index.
    pub v1: u32,
}

impl Edge {
    /// Create an edge, ordering the endpoints so `v0 <= v1`.
    #[inline]
    #[must_use]
    pub const fn new(a: u32, b: u32) -> Self {
        if a <= b {
            Self { v0: a, v1: b }
        } else {
            Self { v0: b, v1: a }
        }
    }

    /// Check if this edge contains the given vertex.
    #[inline]
    #[must_use]
    pub const fn contains(&self, v: u32) -> bool {
        self.v0 == v || self.v1 == v
    }

    /// Check whether both endpoints are the same vertex.
    #[inline]
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.v0 == self.v1
    }
}

/// A tetrahedron given by four vertex indices.
///
/// Slot order is significant: it fixes the cell's handedness, i.e. the sign
/// of its signed volume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Tetrahedron {
    /// Indices of the four vertices.
    pub vertices: [u32; 4],
}

impl Tetrahedron {
    /// Create a new tetrahedron.
    #[inline]
    #[must_use]
    pub const fn new(v0: u32, v1: u32, v2: u32, v3: u32) -> Self {
        Self {
            vertices: [v0, v1, v2, v3],
        }
    }

    /// Get the six edges, in [`TET_EDGES`] order.
    #[must_use]
    pub const fn edges(&self) -> [Edge; 6] {
        let v = &self.vertices;
        [
            Edge::new(v[0], v[1]),
            Edge::new(v[0], v[2]),
            Edge::new(v[0], v[3]),
            Edge::new(v[1], v[2]),
            Edge::new(v[1], v[3]),
            Edge::new(v[2], v[3]),
        ]
    }

    /// Get the four triangular faces, each wound outward for a positively
    /// oriented tetrahedron.
    #[must_use]
    pub const fn faces(&self) -> [[u32; 3]; 4] {
        let v = &self.vertices;
        [
            [v[0], v[2], v[1]],
            [v[0], v[1], v[3]],
            [v[0], v[3], v[2]],
            [v[1], v[2], v[3]],
        ]
    }

    /// Find the vertex shared by every edge in `edges`.
    ///
    /// Returns `None` if `edges` is empty, an edge isn't one of this
    /// tetrahedron's, or no single vertex is common to all of them.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{Edge, Tetrahedron};
    ///
    /// let tet = Tetrahedron::new(4, 5, 6, 7);
    /// let around_7 = [Edge::new(4, 7), Edge::new(5, 7), Edge::new(6, 7)];
    /// assert_eq!(tet.shared_vertex(&around_7), Some(7));
    /// assert_eq!(tet.shared_vertex(&[Edge::new(4, 5), Edge::new(6, 7)]), None);
    /// ```
    #[must_use]
    pub fn shared_vertex(&self, edges: &[Edge]) -> Option<u32> {
        let own = self.edges();
        if edges.is_empty() || !edges.iter().all(|e| own.contains(e)) {
            return None;
        }
        let mut common = self
            .vertices
            .into_iter()
            .filter(|&v| edges.iter().all(|e| e.contains(v)));
        let first = common.next()?;
        // Two common vertices means every edge is the same edge.
        if common.next().is_some() {
            return None;
        }
        Some(first)
    }

    /// Check whether any vertex index is repeated.
    #[must_use]
    pub const fn has_repeated_vertex(&self) -> bool {
        let v = &self.vertices;
        v[0] == v[1] || v[0] == v[2] || v[0] == v[3] || v[1] == v[2] || v[1] == v[3] || v[2] == v[3]
    }

    /// Resolve the four corner positions.
    ///
    /// Returns `None` if any index is out of bounds.
    #[must_use]
    pub fn corners(&self, positions: &[Point3<f64>]) -> Option<[Point3<f64>; 4]> {
        Some([
            *positions.get(self.vertices[0] as usize)?,
            *positions.get(self.vertices[1] as usize)?,
            *positions.get(self.vertices[2] as usize)?,
            *positions.get(self.vertices[3] as usize)?,
        ])
    }
}

impl From<[u32; 4]> for Tetrahedron {
    fn from(vertices: [u32; 4]) -> Self {
        Self { vertices }
    }
}

/// Signed volume of the tetrahedron `p0 p1 p2 p3`.
///
/// Positive when `p3` lies on the side of `(p0, p1, p2)` given by the
/// right-hand rule.
#[must_use]
pub fn signed_volume(p: &[Point3<f64>; 4]) -> f64 {
    let e1 = p[1] - p[0];
    let e2 = p[2] - p[0];
    let e3 = p[3] - p[0];
    e1.cross(&e2).dot(&e3) / 6.0
}
