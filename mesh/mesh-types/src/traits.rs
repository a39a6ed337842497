//! Read-only access to tetrahedral meshes.

use crate::Tetrahedron;
use nalgebra::Point3;

/// Trait for types that expose a tetrahedral mesh with a scalar field.
///
/// This is the minimal interface the retessellation pipeline consumes.
/// Storage and adjacency bookkeeping stay with the implementor.
///
/// Cells are addressed `0..tet_count()`. Consumers treat a `None` from
/// [`tet`](Self::tet) inside that range as a broken mesh, not a gap.
pub trait TetMeshView {
    /// Get the number of vertices.
    fn vertex_count(&self) -> usize;

    /// Get the number of tetrahedra.
    fn tet_count(&self) -> usize;

    /// Check if the mesh has no cells.
    fn is_empty(&self) -> bool {
        self.tet_count() == 0
    }

    /// Get a tetrahedron by index.
    ///
    /// Returns `None` if the index is out of bounds.
    fn tet(&self, index: usize) -> Option<Tetrahedron>;

    /// Get a vertex position.
    ///
    /// Returns `None` if the index is out of bounds.
    fn position(&self, vertex: u32) -> Option<Point3<f64>>;

    /// Get the scalar field value at a vertex.
    ///
    /// Returns `None` if the index is out of bounds.
    fn value(&self, vertex: u32) -> Option<f64>;
}
