//! Indexed tetrahedral mesh.

use crate::{Tetrahedron, TetMeshView, Vertex};
use nalgebra::Point3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An indexed tetrahedral mesh with one scalar value per vertex.
///
/// # Memory Layout
///
/// - `vertices`: `Vec<Vertex>` - Vertex positions and field values
/// - `tetrahedra`: `Vec<Tetrahedron>` - Cells as vertex indices
///
/// # Example
///
/// ```
/// use mesh_types::{TetMesh, Tetrahedron, Vertex, TetMeshView};
///
/// let mut mesh = TetMesh::new();
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0, 0.0));
/// mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 1.0, 1.0));
/// mesh.tetrahedra.push(Tetrahedron::new(0, 1, 2, 3));
///
/// assert_eq!(mesh.vertex_count(), 4);
/// assert_eq!(mesh.tet_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TetMesh {
    /// Vertex data.
    pub vertices: Vec<Vertex>,

    /// Cells as indices into the vertex array.
    pub tetrahedra: Vec<Tetrahedron>,
}

impl TetMesh {
    /// Create a new empty mesh.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tetrahedra: Vec::new(),
        }
    }

    /// Create a mesh with pre-allocated capacity.
    #[inline]
    #[must_use]
    pub fn with_capacity(vertex_count: usize, tet_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            tetrahedra: Vec::with_capacity(tet_count),
        }
    }

    /// Create a mesh from vertices and cells.
    #[inline]
    #[must_use]
    pub const fn from_parts(vertices: Vec<Vertex>, tetrahedra: Vec<Tetrahedron>) -> Self {
        Self {
            vertices,
            tetrahedra,
        }
    }

    /// Create a mesh from flat coordinate, value, and index arrays.
    ///
    /// # Arguments
    ///
    /// * `positions` - `[x0, y0, z0, x1, y1, z1, ...]`
    /// * `values` - One field value per vertex
    /// * `indices` - `[a0, b0, c0, d0, a1, ...]`, four per cell
    ///
    /// Returns `None` if the array lengths are inconsistent.
    ///
    /// # Example
    ///
    /// ```
    /// use mesh_types::{TetMesh, TetMeshView};
    ///
    /// let positions = [0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0];
    /// let values = [0.0, 0.0, 0.0, 2.0];
    /// let mesh = TetMesh::from_flat(&positions, &values, &[0, 1, 2, 3]).unwrap();
    /// assert_eq!(mesh.tet_count(), 1);
    ///
    /// assert!(TetMesh::from_flat(&positions, &values[..3], &[0, 1, 2, 3]).is_none());
    /// ```
    #[must_use]
    pub fn from_flat(positions: &[f64], values: &[f64], indices: &[u32]) -> Option<Self> {
        if positions.len() % 3 != 0 || indices.len() % 4 != 0 || positions.len() / 3 != values.len()
        {
            return None;
        }

        let vertices = positions
            .chunks_exact(3)
            .zip(values)
            .map(|(c, &value)| Vertex::from_coords(c[0], c[1], c[2], value))
            .collect();

        let tetrahedra = indices
            .chunks_exact(4)
            .map(|c| Tetrahedron::new(c[0], c[1], c[2], c[3]))
            .collect();

        Some(Self {
            vertices,
            tetrahedra,
        })
    }

    /// Flat coordinate array, three entries per vertex.
    #[must_use]
    pub fn flat_positions(&self) -> Vec<f64> {
        self.vertices
            .iter()
            .flat_map(|v| [v.position.x, v.position.y, v.position.z])
            .collect()
    }

    /// Flat field value array, one entry per vertex.
    #[must_use]
    pub fn flat_values(&self) -> Vec<f64> {
        self.vertices.iter().map(|v| v.value).collect()
    }

    /// Flat cell array, four indices per tetrahedron.
    #[must_use]
    pub fn flat_tetrahedra(&self) -> Vec<u32> {
        self.tetrahedra.iter().flat_map(|t| t.vertices).collect()
    }

    /// Collect all vertex positions.
    #[must_use]
    pub fn positions(&self) -> Vec<Point3<f64>> {
        self.vertices.iter().map(|v| v.position).collect()
    }

    /// Sum of unsigned cell volumes.
    #[must_use]
    pub fn total_volume(&self) -> f64 {
        let positions = self.positions();
        self.tetrahedra
            .iter()
            .filter_map(|t| t.corners(&positions))
            .map(|p| crate::signed_volume(&p).abs())
            .sum()
    }

    /// Check that every cell references existing, distinct vertices.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        let n = self.vertices.len();
        self.tetrahedra.iter().all(|t| {
            !t.has_repeated_vertex() && t.vertices.iter().all(|&v| (v as usize) < n)
        })
    }
}

impl TetMeshView for TetMesh {
    #[inline]
    fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    fn tet_count(&self) -> usize {
        self.tetrahedra.len()
    }

    #[inline]
    fn tet(&self, index: usize) -> Option<Tetrahedron> {
        self.tetrahedra.get(index).copied()
    }

    #[inline]
    fn position(&self, vertex: u32) -> Option<Point3<f64>> {
        self.vertices.get(vertex as usize).map(|v| v.position)
    }

    #[inline]
    fn value(&self, vertex: u32) -> Option<f64> {
        self.vertices.get(vertex as usize).map(|v| v.value)
    }
}
