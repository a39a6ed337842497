//! Canonical hexahedron re-rooting.

use crate::error::{RetessError, RetessResult};
use crate::tables::{HEX_ROTATIONS, HEX_TWISTS, permute};

/// Relabel a hexahedron so the vertex at `offset` becomes slot 0.
///
/// The relabeling is a rotation of the reference hexahedron, so faces stay
/// faces and the cell keeps its handedness. No geometry is involved.
///
/// # Errors
///
/// Returns [`RetessError::InvalidHexOffset`] if `offset > 7`.
///
/// # Example
///
/// ```
/// use mesh_retess::reroot_hex;
///
/// let hex = [10, 11, 12, 13, 14, 15, 16, 17];
/// let rotated = reroot_hex(&hex, 6)?;
/// assert_eq!(rotated[0], 16);
/// assert_eq!(rotated, [16, 12, 11, 15, 17, 13, 10, 14]);
/// # Ok::<(), mesh_retess::RetessError>(())
/// ```
pub fn reroot_hex(ids: &[u32; 8], offset: usize) -> RetessResult<[u32; 8]> {
    let row = HEX_ROTATIONS
        .get(offset)
        .ok_or(RetessError::InvalidHexOffset(offset))?;
    Ok(permute(ids, row))
}

/// Relabel a hexahedron into its canonical form.
///
/// The smallest id goes to slot 0 and the smallest of its three neighbors
/// to slot 1. Exactly one rotation does that, so two cells holding the same
/// hexahedron under different (rotated) local orderings end up with the
/// same labeling.
///
/// # Example
///
/// ```
/// use mesh_retess::{reroot_hex, reroot_hex_at_min};
///
/// let hex = [7, 3, 9, 1, 8, 4, 6, 5];
/// assert_eq!(reroot_hex_at_min(&hex), [1, 5, 8, 7, 9, 6, 4, 3]);
/// assert_eq!(reroot_hex_at_min(&reroot_hex(&hex, 6)?), [1, 5, 8, 7, 9, 6, 4, 3]);
/// # Ok::<(), mesh_retess::RetessError>(())
/// ```
#[must_use]
pub fn reroot_hex_at_min(ids: &[u32; 8]) -> [u32; 8] {
    let rooted = permute(ids, &HEX_ROTATIONS[min_slot(ids)]);
    let twist = min_slot(&[rooted[1], rooted[3], rooted[4]]);
    permute(&rooted, &HEX_TWISTS[twist])
}

/// Slot holding the smallest id.
pub(crate) fn min_slot(ids: &[u32]) -> usize {
    ids.iter()
        .enumerate()
        .min_by_key(|&(_, id)| *id)
        .map_or(0, |(slot, _)| slot)
}
