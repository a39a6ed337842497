//! Crossing-pattern classification of a single tetrahedron.

use mesh_types::{Edge, TET_OPPOSITE_EDGE, Tetrahedron};
use smallvec::SmallVec;

use crate::crossing::CrossingSet;
use crate::error::{RetessError, RetessResult};

/// How the isosurface passes through a tetrahedron.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutCase {
    /// No edge is crossed.
    NotCut,

    /// Three crossed edges meeting at `apex`: the isosurface cuts off a
    /// triangular tip.
    ApexCut {
        /// Vertex shared by the three crossed edges.
        apex: u32,
    },

    /// Four crossed edges: the isosurface is a quad separating the two
    /// uncut edges, which are opposite.
    BandCut {
        /// The two uncut, opposite edges.
        uncut: [Edge; 2],
    },
}

impl CutCase {
    /// Number of tetrahedra this case decomposes into.
    #[must_use]
    pub const fn output_count(&self) -> usize {
        match self {
            Self::NotCut => 1,
            Self::ApexCut { .. } => 4,
            Self::BandCut { .. } => 6,
        }
    }
}

/// Classify `tet` by which of its edges are crossed.
///
/// The result depends only on `tet` and `crossings`. `index` labels the
/// cell in the returned error.
///
/// # Errors
///
/// Returns [`RetessError::ContractViolation`] if the number of crossed edges
/// is not 0, 3 or 4, if three crossed edges don't share a vertex, or if the
/// two uncut edges of a four-edge pattern are adjacent.
pub fn classify_tet(
    index: usize,
    tet: &Tetrahedron,
    crossings: &CrossingSet,
) -> RetessResult<CutCase> {
    let edges = tet.edges();
    let (cut, uncut): (SmallVec<[usize; 6]>, SmallVec<[usize; 6]>) =
        (0..edges.len()).partition(|&i| crossings.contains(edges[i].v0, edges[i].v1));

    let violation = RetessError::ContractViolation {
        tet: index,
        cut_edges: cut.len(),
    };

    match cut.len() {
        0 => Ok(CutCase::NotCut),
        3 => {
            let cut_edges: SmallVec<[Edge; 3]> = cut.iter().map(|&i| edges[i]).collect();
            tet.shared_vertex(&cut_edges)
                .map(|apex| CutCase::ApexCut { apex })
                .ok_or(violation)
        }
        4 if TET_OPPOSITE_EDGE[uncut[0]] == uncut[1] => Ok(CutCase::BandCut {
            uncut: [edges[uncut[0]], edges[uncut[1]]],
        }),
        _ => Err(violation),
    }
}
