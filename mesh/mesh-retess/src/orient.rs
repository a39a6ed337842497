//! Tetrahedron quality and orientation repair.

use mesh_types::signed_volume;
use nalgebra::Point3;

/// Orientation of a tetrahedron, read off the sign of its quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Handedness {
    /// Non-negative scaled Jacobian (right-handed slot order).
    Positive,
    /// Negative scaled Jacobian (inverted slot order).
    Negative,
}

impl Handedness {
    /// Classify a quality value. Only strictly negative values count as
    /// inverted.
    #[inline]
    #[must_use]
    pub fn of(quality: f64) -> Self {
        if quality < 0.0 {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Handedness of the tetrahedron with the given corners.
    #[must_use]
    pub fn of_corners(corners: &[Point3<f64>; 4]) -> Self {
        Self::of(scaled_jacobian(corners))
    }

    /// Check whether `quality` has the opposite sign.
    ///
    /// Zero quality agrees with both handednesses.
    #[inline]
    #[must_use]
    pub fn disagrees_with(self, quality: f64) -> bool {
        match self {
            Self::Positive => quality < 0.0,
            Self::Negative => quality > 0.0,
        }
    }
}

/// Scaled Jacobian of a tetrahedron.
///
/// Six times the signed volume, scaled by `√2` and divided by the largest
/// product of the three edge lengths meeting at a corner. The result lies in
/// `[-1, 1]`, is `1` for a right-handed regular tetrahedron, and has the sign
/// of the signed volume. Degenerate input yields `0`.
///
/// # Example
///
/// ```
/// use mesh_retess::scaled_jacobian;
/// use mesh_types::Point3;
///
/// let regular = [
///     Point3::new(1.0, 1.0, 1.0),
///     Point3::new(1.0, -1.0, -1.0),
///     Point3::new(-1.0, 1.0, -1.0),
///     Point3::new(-1.0, -1.0, 1.0),
/// ];
/// assert!((scaled_jacobian(&regular).abs() - 1.0).abs() < 1e-12);
/// ```
#[must_use]
pub fn scaled_jacobian(p: &[Point3<f64>; 4]) -> f64 {
    let det = 6.0 * signed_volume(p);

    let l01 = (p[1] - p[0]).norm();
    let l02 = (p[2] - p[0]).norm();
    let l03 = (p[3] - p[0]).norm();
    let l12 = (p[2] - p[1]).norm();
    let l13 = (p[3] - p[1]).norm();
    let l23 = (p[3] - p[2]).norm();

    let lambda = (l01 * l02 * l03)
        .max(l01 * l12 * l13)
        .max(l02 * l12 * l23)
        .max(l03 * l13 * l23);

    if lambda <= f64::MIN_POSITIVE {
        return 0.0;
    }
    det * std::f64::consts::SQRT_2 / lambda
}

/// Make every tetrahedron in `batch` match the parent's handedness.
///
/// A tetrahedron whose scaled Jacobian has the opposite sign gets slots 2
/// and 3 swapped. The swap keeps the same four points and reverses the
/// signed volume. Returns how many tetrahedra were repaired.
///
/// `positions` must cover every id in the batch; callers index it with ids
/// they created themselves.
///
/// # Example
///
/// ```
/// use mesh_retess::{Handedness, fix_orientation};
/// use mesh_types::Point3;
///
/// let positions = [
///     Point3::new(0.0, 0.0, 0.0),
///     Point3::new(1.0, 0.0, 0.0),
///     Point3::new(0.0, 1.0, 0.0),
///     Point3::new(0.0, 0.0, 1.0),
/// ];
/// let mut batch = [[0, 2, 1, 3]];
/// assert_eq!(fix_orientation(Handedness::Positive, &mut batch, &positions), 1);
/// assert_eq!(batch, [[0, 2, 3, 1]]);
/// ```
pub fn fix_orientation(
    parent: Handedness,
    batch: &mut [[u32; 4]],
    positions: &[Point3<f64>],
) -> usize {
    let mut repaired = 0;
    for tet in batch.iter_mut() {
        let corners = tet.map(|v| positions[v as usize]);
        if parent.disagrees_with(scaled_jacobian(&corners)) {
            tet.swap(2, 3);
            repaired += 1;
        }
    }
    repaired
}
