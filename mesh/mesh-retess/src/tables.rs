//! Canonical reference orderings for prisms and hexahedra.
//!
//! # Reference prism
//!
//! ```text
//!        5
//!       /|\
//!      3---4        top:    3 4 5
//!      | 2 |        bottom: 0 1 2
//!      |/ \|        vertex i+3 sits above vertex i
//!      0---1
//! ```
//!
//! # Reference hexahedron
//!
//! Bottom quad `0 1 2 3` (counter-clockwise seen from above), top quad
//! `4 5 6 7`, vertex `i + 4` above vertex `i`.
//!
//! # Rotation tables
//!
//! Row `k` of a rotation table re-roots the element at local vertex `k`:
//! rotated slot `j` takes the vertex from original slot `ROW[k][j]`, so
//! `ROW[k][0] == k`. Every row is a symmetry of the reference element (it
//! maps edges to edges), which is what keeps the rotated element's
//! combinatorial structure intact.

/// The nine edges of the reference prism.
pub const PRISM_EDGES: [[usize; 2]; 9] = [
    [0, 1],
    [1, 2],
    [2, 0],
    [3, 4],
    [4, 5],
    [5, 3],
    [0, 3],
    [1, 4],
    [2, 5],
];

/// Re-rooting permutations of the reference prism, one per start vertex.
pub const PRISM_ROTATIONS: [[usize; 6]; 6] = [
    [0, 1, 2, 3, 4, 5],
    [1, 2, 0, 4, 5, 3],
    [2, 0, 1, 5, 3, 4],
    [3, 5, 4, 0, 2, 1],
    [4, 3, 5, 1, 0, 2],
    [5, 4, 3, 2, 1, 0],
];

/// The twelve edges of the reference hexahedron.
pub const HEX_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Re-rooting permutations of the reference hexahedron, one per start vertex.
///
/// Each row is a proper rotation of the cube, so handedness is preserved.
pub const HEX_ROTATIONS: [[usize; 8]; 8] = [
    [0, 1, 2, 3, 4, 5, 6, 7],
    [1, 0, 4, 5, 2, 3, 7, 6],
    [2, 1, 5, 6, 3, 0, 4, 7],
    [3, 0, 1, 2, 7, 4, 5, 6],
    [4, 0, 3, 7, 5, 1, 2, 6],
    [5, 1, 0, 4, 6, 2, 3, 7],
    [6, 2, 1, 5, 7, 3, 0, 4],
    [7, 3, 2, 6, 4, 0, 1, 5],
];

/// Rotations of the reference hexahedron about its `0`–`6` diagonal.
///
/// They fix slot 0 and cycle its neighbors: twist `t` moves the vertex in
/// slot `[1, 3, 4][t]` into slot 1.
pub const HEX_TWISTS: [[usize; 8]; 3] = [
    [0, 1, 2, 3, 4, 5, 6, 7],
    [0, 3, 7, 4, 1, 2, 6, 5],
    [0, 4, 5, 1, 3, 7, 6, 2],
];

/// Apply a re-rooting permutation to a list of ids.
#[inline]
pub(crate) fn permute<const N: usize>(ids: &[u32; N], row: &[usize; N]) -> [u32; N] {
    std::array::from_fn(|j| ids[row[j]])
}
