//! Error types for retessellation operations.

use mesh_types::Edge;
use thiserror::Error;

/// Errors that can occur during retessellation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RetessError {
    /// Mesh has no tetrahedra.
    #[error("Mesh has no tetrahedra")]
    EmptyMesh,

    /// A tetrahedron's crossing pattern is not one of the supported cases.
    ///
    /// A piecewise-linear field crosses a tetrahedron on 0, 3 or 4 edges.
    /// Any other count (or 3/4 edges in the wrong arrangement) points at a
    /// non-linear field or a detector bug.
    #[error("Tetrahedron {tet} has {cut_edges} cut edges in an unsupported arrangement (expected 0, 3 or 4)")]
    ContractViolation {
        /// Index of the offending tetrahedron.
        tet: usize,
        /// Number of its edges carrying a crossing.
        cut_edges: usize,
    },

    /// Prism vertex ids are not pairwise distinct.
    #[error("Degenerate prism {ids:?}: vertex ids must be distinct")]
    DegeneratePrism {
        /// The prism's six vertex ids.
        ids: [u32; 6],
    },

    /// Hexahedron re-rooting offset is outside `0..=7`.
    #[error("Invalid hexahedron offset: {0} (must be in 0..=7)")]
    InvalidHexOffset(usize),

    /// Crossing parameter is outside the open interval `(0, 1)`.
    #[error("Invalid interpolation parameter {alpha} on edge ({}, {}) (must be in (0, 1))", .edge.v0, .edge.v1)]
    InvalidInterpolation {
        /// The crossed edge.
        edge: Edge,
        /// The rejected parameter.
        alpha: f64,
    },

    /// The same edge was recorded twice with different parameters.
    #[error("Conflicting crossings on edge ({}, {}): {first} vs {second}", .edge.v0, .edge.v1)]
    ConflictingCrossing {
        /// The crossed edge.
        edge: Edge,
        /// Parameter already recorded.
        first: f64,
        /// Parameter that was rejected.
        second: f64,
    },

    /// A crossing or tetrahedron references a vertex that doesn't exist.
    #[error("Vertex {vertex} out of range (mesh has {count} vertices)")]
    VertexOutOfRange {
        /// The referenced vertex.
        vertex: u32,
        /// Number of vertices in the mesh.
        count: usize,
    },

    /// The view reports a cell count but has no cell at `index`.
    #[error("Tetrahedron {index} missing (mesh reports {count} tetrahedra)")]
    MissingTetrahedron {
        /// Index inside `0..count` with no cell behind it.
        index: usize,
        /// Number of tetrahedra the mesh reports.
        count: usize,
    },

    /// Interpolating a crossing gave a non-finite position or value.
    #[error("Split vertex on edge ({}, {}) is not finite", .edge.v0, .edge.v1)]
    NonFiniteSplitVertex {
        /// The crossed edge.
        edge: Edge,
    },

    /// Output vertex count no longer fits in a `u32` index.
    #[error("Too many vertices for 32-bit indices: {0}")]
    IndexOverflow(usize),
}

/// Result type for retessellation operations.
pub type RetessResult<T> = std::result::Result<T, RetessError>;
