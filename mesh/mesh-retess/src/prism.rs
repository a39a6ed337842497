//! Canonical prism subdivision into three tetrahedra.
//!
//! Every quadrilateral face of the prism is split along the diagonal through
//! its smallest vertex id. That choice depends only on the four ids of the
//! face, never on the prism's local vertex order, so two cells that build
//! prisms sharing a quad always triangulate it identically.

use crate::error::{RetessError, RetessResult};
use crate::hex::min_slot;
use crate::tables::{PRISM_ROTATIONS, permute};

/// Split a triangular prism into three tetrahedra.
///
/// `ids` follows the reference order: bottom triangle `0 1 2`, top triangle
/// `3 4 5`, with `ids[i + 3]` joined to `ids[i]` by a lateral edge.
///
/// The handedness of the emitted tetrahedra follows the handedness of the
/// input prism; callers that need a specific sign run the orientation fixer
/// over the batch.
///
/// # Errors
///
/// Returns [`RetessError::DegeneratePrism`] if the ids are not pairwise
/// distinct.
///
/// # Example
///
/// ```
/// use mesh_retess::split_prism;
///
/// let tets = split_prism(&[0, 1, 2, 3, 4, 5])?;
/// assert_eq!(tets, [[0, 1, 2, 5], [0, 1, 5, 4], [0, 4, 5, 3]]);
/// # Ok::<(), mesh_retess::RetessError>(())
/// ```
pub fn split_prism(ids: &[u32; 6]) -> RetessResult<[[u32; 4]; 3]> {
    if has_repeated_id(ids) {
        return Err(RetessError::DegeneratePrism { ids: *ids });
    }

    let r = permute(ids, &PRISM_ROTATIONS[min_slot(ids)]);

    // r[0] is the global minimum, so both quads touching it are split through
    // r[0]. Only the quad r1 r2 r5 r4 needs a decision.
    let tets = if r[1].min(r[5]) < r[2].min(r[4]) {
        [
            [r[0], r[1], r[2], r[5]],
            [r[0], r[1], r[5], r[4]],
            [r[0], r[4], r[5], r[3]],
        ]
    } else {
        [
            [r[0], r[1], r[2], r[4]],
            [r[0], r[4], r[2], r[5]],
            [r[0], r[4], r[5], r[3]],
        ]
    };
    Ok(tets)
}

/// Diagonal used to split a quadrilateral face.
///
/// `quad` lists the face's vertices in cyclic order. The diagonal runs from
/// the smallest id to the vertex opposite it and is returned smallest first.
///
/// # Example
///
/// ```
/// use mesh_retess::quad_diagonal;
///
/// assert_eq!(quad_diagonal(&[9, 4, 7, 6]), (4, 6));
/// // Same face, different starting vertex and direction.
/// assert_eq!(quad_diagonal(&[7, 4, 9, 6]), (4, 6));
/// ```
#[must_use]
pub fn quad_diagonal(quad: &[u32; 4]) -> (u32, u32) {
    let slot = min_slot(quad);
    (quad[slot], quad[(slot + 2) % 4])
}

fn has_repeated_id(ids: &[u32; 6]) -> bool {
    ids.iter()
        .enumerate()
        .any(|(i, a)| ids[i + 1..].contains(a))
}
