//! Edge crossing detection for a piecewise-linear field.

use mesh_retess::{CrossingSet, RetessError};
use mesh_types::TetMeshView;
use tracing::{debug, info};

use crate::error::{DetectError, DetectResult};
use crate::params::DetectParams;

/// Largest `f64` strictly below one.
const ALPHA_MAX: f64 = 1.0 - f64::EPSILON / 2.0;

/// Find every mesh edge the isosurface `f = iso_value` crosses.
///
/// An edge is crossed when its endpoint values lie strictly on opposite
/// sides of the iso value. The crossing parameter weights the lower-id
/// endpoint, so `alpha * f(lo) + (1 - alpha) * f(hi) == iso_value` up to
/// rounding.
///
/// Vertices sitting exactly on the iso value produce no crossing on their
/// edges. Cells touching such vertices can end up with 1 or 2 crossed
/// edges, which the retessellator reports as a contract violation.
///
/// # Errors
///
/// Returns an error if:
/// - The iso value is not finite
/// - The mesh has no cell at some index below its reported cell count
/// - A cell references a vertex that doesn't exist
/// - An edge's parameter can't be recorded (non-finite vertex values)
///
/// # Examples
///
/// ```
/// use mesh_marching_tets::{DetectParams, detect_crossings};
/// use mesh_types::{TetMesh, Tetrahedron, Vertex};
///
/// let mesh = TetMesh::from_parts(
///     vec![
///         Vertex::from_coords(0.0, 0.0, 0.0, 0.0),
///         Vertex::from_coords(1.0, 0.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 1.0, 0.0, 0.0),
///         Vertex::from_coords(0.0, 0.0, 1.0, 2.0),
///     ],
///     vec![Tetrahedron::new(0, 1, 2, 3)],
/// );
///
/// let crossings = detect_crossings(&mesh, &DetectParams::new(1.0))?;
/// assert_eq!(crossings.len(), 3);
/// assert_eq!(crossings.get(0, 3), Some(0.5));
/// # Ok::<(), mesh_marching_tets::DetectError>(())
/// ```
pub fn detect_crossings<M: TetMeshView + ?Sized>(
    mesh: &M,
    params: &DetectParams,
) -> DetectResult<CrossingSet> {
    let iso = params.iso_value;
    if !iso.is_finite() {
        return Err(DetectError::NonFiniteIsoValue(iso));
    }

    info!(
        tets = mesh.tet_count(),
        iso_value = iso,
        "Detecting isosurface crossings"
    );

    let mut crossings = CrossingSet::new();
    let mut visited = 0usize;

    let count = mesh.tet_count();
    for index in 0..count {
        let tet = mesh
            .tet(index)
            .ok_or(RetessError::MissingTetrahedron { index, count })?;
        for edge in tet.edges() {
            visited += 1;
            if crossings.contains(edge.v0, edge.v1) {
                continue;
            }
            let f_lo = value_of(mesh, edge.v0)?;
            let f_hi = value_of(mesh, edge.v1)?;

            if let Some(alpha) = crossing_parameter(f_lo, f_hi, iso) {
                crossings.insert(edge.v0, edge.v1, alpha)?;
            }
        }
    }

    debug!(edges_visited = visited, "Edge scan complete");
    info!(crossings = crossings.len(), "Crossing detection complete");

    Ok(crossings)
}

/// Interpolation parameter of `iso` on an edge with endpoint values
/// `f_lo` (lower id) and `f_hi`, if the edge straddles it.
///
/// The result is clamped into the open interval `(0, 1)`. When `iso` lies
/// within rounding of an endpoint value the clamped parameter still places
/// the split vertex on that endpoint, and the retessellator reports the
/// resulting zero-volume cells in `RetessOutput::degenerate_tets`.
///
/// # Example
///
/// ```
/// use mesh_marching_tets::crossing_parameter;
///
/// assert_eq!(crossing_parameter(0.0, 2.0, 0.5), Some(0.75));
/// assert_eq!(crossing_parameter(0.0, 2.0, 2.0), None);
/// assert_eq!(crossing_parameter(1.0, 1.0, 1.0), None);
/// ```
#[must_use]
pub fn crossing_parameter(f_lo: f64, f_hi: f64, iso: f64) -> Option<f64> {
    let straddles = (f_lo < iso && f_hi > iso) || (f_lo > iso && f_hi < iso);
    if !straddles {
        return None;
    }
    let alpha = (iso - f_hi) / (f_lo - f_hi);
    // Rounding can land on an endpoint when iso is within an ulp of a value.
    Some(alpha.clamp(f64::MIN_POSITIVE, ALPHA_MAX))
}

fn value_of<M: TetMeshView + ?Sized>(mesh: &M, vertex: u32) -> DetectResult<f64> {
    mesh.value(vertex).ok_or_else(|| {
        DetectError::Crossing(RetessError::VertexOutOfRange {
            vertex,
            count: mesh.vertex_count(),
        })
    })
}
