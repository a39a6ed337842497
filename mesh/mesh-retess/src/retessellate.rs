//! Conforming retessellation of a tetrahedral mesh along an isosurface.

// Vertex counts are checked against u32 before any cast
#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashSet;
use mesh_types::{Edge, TetMesh, TetMeshView, Tetrahedron, Vertex};
use nalgebra::Point3;
use rayon::prelude::*;
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::classify::{CutCase, classify_tet};
use crate::crossing::{CrossingSet, SplitVertices};
use crate::error::{RetessError, RetessResult};
use crate::orient::{Handedness, fix_orientation, scaled_jacobian};
use crate::params::{RetessParams, ViolationPolicy};
use crate::prism::split_prism;
use crate::result::RetessOutput;

/// Retessellate a mesh so the isosurface is made of cell faces.
///
/// Every crossed edge gets one new vertex (shared by all cells around the
/// edge), then each cell is decomposed on its own:
///
/// - no crossed edge: the cell is copied
/// - three crossed edges around one vertex: a tip tetrahedron plus a prism,
///   split into 3, for 4 cells
/// - four crossed edges: two prisms on either side of the iso quad, for 6
///   cells
///
/// Prism splits are canonical in vertex ids, so neighbouring cells agree on
/// every shared face. Every new cell gets the handedness of its parent.
///
/// A crossing parameter within rounding of 0 or 1 puts the split vertex on
/// top of an endpoint, and some new cells then have zero volume. They are
/// kept so the output stays conforming, counted in
/// [`RetessOutput::degenerate_tets`] and reported with `warn!`.
///
/// # Errors
///
/// Returns an error if:
/// - The mesh has no tetrahedra
/// - The mesh has no cell at some index below its reported cell count
/// - A cell or crossing references a vertex outside the mesh
/// - A split vertex would have a non-finite position or value
/// - A cell has an unsupported crossing pattern and the policy is
///   [`ViolationPolicy::Fail`]
/// - The output would need more than `u32::MAX` vertices
///
/// # Examples
///
/// ```
/// use mesh_retess::{CrossingSet, RetessParams, retessellate};
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
/// // The level set f = 1 cuts the three edges around vertex 3 halfway.
/// let mut crossings = CrossingSet::new();
/// crossings.insert(0, 3, 0.5)?;
/// crossings.insert(1, 3, 0.5)?;
/// crossings.insert(2, 3, 0.5)?;
///
/// let result = retessellate(&mesh, &crossings, 1.0, &RetessParams::default())?;
/// assert_eq!(result.final_tets, 4);
/// assert_eq!(result.mesh.vertices.len(), 7);
/// assert_eq!(result.iso_faces.len(), 1);
/// # Ok::<(), mesh_retess::RetessError>(())
/// ```
pub fn retessellate<M: TetMeshView + ?Sized>(
    mesh: &M,
    crossings: &CrossingSet,
    iso_value: f64,
    params: &RetessParams,
) -> RetessResult<RetessOutput> {
    if mesh.is_empty() {
        return Err(RetessError::EmptyMesh);
    }
    let tets = collect_tets(mesh)?;

    let original_vertices = mesh.vertex_count();
    if u32::try_from(original_vertices).is_err() {
        return Err(RetessError::IndexOverflow(original_vertices));
    }

    info!(
        tets = tets.len(),
        vertices = original_vertices,
        crossings = crossings.len(),
        iso_value,
        "Starting isosurface retessellation"
    );

    let mut vertices = collect_vertices(mesh, original_vertices)?;

    // Phase 1: every split vertex exists before any cell looks one up.
    let (split, created) = SplitVertices::materialize(&vertices, crossings, iso_value)?;
    vertices.extend(created);
    let positions: Vec<Point3<f64>> = vertices.iter().map(|v| v.position).collect();

    // Phase 2: independent per-cell decomposition.
    let ctx = CellContext {
        crossings,
        split: &split,
        vertices: &vertices,
        positions: &positions,
        original_vertices,
        policy: params.violation_policy,
    };

    let parallel = params.use_parallel(tets.len());
    debug!(cells = tets.len(), parallel, "Decomposing cells");

    let cells: Vec<CellOutput> = if parallel {
        tets.par_iter()
            .enumerate()
            .map(|(index, tet)| ctx.decompose(index, tet))
            .collect::<RetessResult<_>>()?
    } else {
        tets.iter()
            .enumerate()
            .map(|(index, tet)| ctx.decompose(index, tet))
            .collect::<RetessResult<_>>()?
    };

    let output = assemble(vertices, cells, tets.len(), split.len());

    if output.degenerate_tets > 0 {
        warn!(
            degenerate = output.degenerate_tets,
            "Split vertices on top of endpoints left zero-volume cells"
        );
    }

    let unused = unused_split_vertices(&output.mesh, original_vertices);
    if unused > 0 {
        warn!(
            unused,
            "Crossings on edges that no tetrahedron uses; their split vertices are isolated"
        );
    }

    info!(
        final_tets = output.final_tets,
        split_vertices = output.split_vertex_count,
        apex_cut = output.apex_cut,
        band_cut = output.band_cut,
        kept_violations = output.kept_violations.len(),
        "Retessellation complete"
    );

    Ok(output)
}

/// How a single cell was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellKind {
    Cut(CutCase),
    Kept,
}

/// Self-contained decomposition of one input cell.
#[derive(Debug)]
struct CellOutput {
    kind: CellKind,
    tets: SmallVec<[[u32; 4]; 6]>,
    iso_faces: SmallVec<[[u32; 3]; 2]>,
    degenerate: usize,
}

impl CellOutput {
    fn copy(kind: CellKind, tet: &Tetrahedron) -> Self {
        let mut tets = SmallVec::new();
        tets.push(tet.vertices);
        Self {
            kind,
            tets,
            iso_faces: SmallVec::new(),
            degenerate: 0,
        }
    }
}

/// Read-only state shared by all cell decompositions.
struct CellContext<'a> {
    crossings: &'a CrossingSet,
    split: &'a SplitVertices,
    vertices: &'a [Vertex],
    positions: &'a [Point3<f64>],
    original_vertices: usize,
    policy: ViolationPolicy,
}

impl CellContext<'_> {
    fn decompose(&self, index: usize, tet: &Tetrahedron) -> RetessResult<CellOutput> {
        if let Some(&vertex) = tet
            .vertices
            .iter()
            .find(|&&v| v as usize >= self.original_vertices)
        {
            return Err(RetessError::VertexOutOfRange {
                vertex,
                count: self.original_vertices,
            });
        }

        let case = match classify_tet(index, tet, self.crossings) {
            Ok(case) => case,
            Err(RetessError::ContractViolation { tet: _, cut_edges })
                if self.policy == ViolationPolicy::KeepOriginal =>
            {
                warn!(
                    tet = index,
                    cut_edges, "Keeping cell with unsupported crossing pattern"
                );
                return Ok(CellOutput::copy(CellKind::Kept, tet));
            }
            Err(e) => return Err(e),
        };

        let mut out = match case {
            CutCase::NotCut => return Ok(CellOutput::copy(CellKind::Cut(case), tet)),
            CutCase::ApexCut { apex } => self.split_apex(index, tet, apex)?,
            CutCase::BandCut { uncut } => self.split_band(index, uncut)?,
        };

        let corners = tet.vertices.map(|v| self.positions[v as usize]);
        let parent = Handedness::of_corners(&corners);
        fix_orientation(parent, &mut out.tets, self.positions);
        out.degenerate = out
            .tets
            .iter()
            .map(|t| scaled_jacobian(&t.map(|v| self.positions[v as usize])))
            .filter(|q| q.abs() < f64::MIN_POSITIVE)
            .count();

        for face in &mut out.iso_faces {
            self.orient_toward_field(face, tet);
        }
        Ok(out)
    }

    /// Tip `[apex, s_b, s_c, s_d]` plus prism `[b, c, d, s_b, s_c, s_d]`.
    fn split_apex(&self, index: usize, tet: &Tetrahedron, apex: u32) -> RetessResult<CellOutput> {
        let mut base = [0u32; 3];
        let mut tip = [0u32; 3];
        for (slot, &v) in tet.vertices.iter().filter(|&&v| v != apex).enumerate() {
            base[slot] = v;
            tip[slot] = self.split_id(index, 3, apex, v)?;
        }

        let mut tets = SmallVec::new();
        tets.push([apex, tip[0], tip[1], tip[2]]);
        tets.extend(split_prism(&[base[0], base[1], base[2], tip[0], tip[1], tip[2]])?);

        let mut iso_faces = SmallVec::new();
        iso_faces.push(tip);

        Ok(CellOutput {
            kind: CellKind::Cut(CutCase::ApexCut { apex }),
            tets,
            iso_faces,
            degenerate: 0,
        })
    }

    /// With uncut edges `{a, b}` and `{c, d}`: prisms
    /// `[a, s_ac, s_ad, b, s_bc, s_bd]` and `[c, s_ca, s_cb, d, s_da, s_db]`.
    fn split_band(&self, index: usize, uncut: [Edge; 2]) -> RetessResult<CellOutput> {
        let (a, b) = (uncut[0].v0, uncut[0].v1);
        let (c, d) = (uncut[1].v0, uncut[1].v1);

        let s_ac = self.split_id(index, 4, a, c)?;
        let s_ad = self.split_id(index, 4, a, d)?;
        let s_bc = self.split_id(index, 4, b, c)?;
        let s_bd = self.split_id(index, 4, b, d)?;

        let mut tets = SmallVec::new();
        tets.extend(split_prism(&[a, s_ac, s_ad, b, s_bc, s_bd])?);
        tets.extend(split_prism(&[c, s_ac, s_bc, d, s_ad, s_bd])?);

        // Iso quad in cyclic order, split on the diagonal the prisms use.
        let quad = [s_ac, s_bc, s_bd, s_ad];
        let k = quad
            .iter()
            .enumerate()
            .min_by_key(|&(_, v)| v)
            .map_or(0, |(slot, _)| slot);
        let q = |i: usize| quad[(k + i) % 4];

        let mut iso_faces = SmallVec::new();
        iso_faces.push([q(0), q(1), q(2)]);
        iso_faces.push([q(0), q(2), q(3)]);

        Ok(CellOutput {
            kind: CellKind::Cut(CutCase::BandCut { uncut }),
            tets,
            iso_faces,
            degenerate: 0,
        })
    }

    fn split_id(&self, index: usize, cut_edges: usize, a: u32, b: u32) -> RetessResult<u32> {
        self.split
            .get(a, b)
            .ok_or(RetessError::ContractViolation {
                tet: index,
                cut_edges,
            })
    }

    /// Wind `face` so its normal points at the cell's highest-valued vertex.
    fn orient_toward_field(&self, face: &mut [u32; 3], tet: &Tetrahedron) {
        let Some(high) = tet
            .vertices
            .iter()
            .max_by(|&&u, &&v| {
                self.vertices[u as usize]
                    .value
                    .total_cmp(&self.vertices[v as usize].value)
            })
            .map(|&v| self.positions[v as usize])
        else {
            return;
        };

        let [p0, p1, p2] = face.map(|v| self.positions[v as usize]);
        let normal = (p1 - p0).cross(&(p2 - p0));
        if normal.dot(&(high - p0)) < 0.0 {
            face.swap(1, 2);
        }
    }
}

fn collect_tets<M: TetMeshView + ?Sized>(mesh: &M) -> RetessResult<Vec<Tetrahedron>> {
    let count = mesh.tet_count();
    (0..count)
        .map(|index| {
            mesh.tet(index)
                .ok_or(RetessError::MissingTetrahedron { index, count })
        })
        .collect()
}

fn collect_vertices<M: TetMeshView + ?Sized>(mesh: &M, count: usize) -> RetessResult<Vec<Vertex>> {
    (0..count as u32)
        .map(|id| {
            mesh.position(id)
                .zip(mesh.value(id))
                .map(|(position, value)| Vertex::new(position, value))
                .ok_or(RetessError::VertexOutOfRange { vertex: id, count })
        })
        .collect()
}

fn assemble(
    vertices: Vec<Vertex>,
    cells: Vec<CellOutput>,
    original_tets: usize,
    split_vertex_count: usize,
) -> RetessOutput {
    let capacity: usize = cells.iter().map(|c| c.tets.len()).sum();
    let mut mesh = TetMesh::from_parts(vertices, Vec::with_capacity(capacity));
    let mut parents = Vec::with_capacity(capacity);
    let mut iso_faces = Vec::new();
    let mut kept_violations = Vec::new();
    let (mut not_cut, mut apex_cut, mut band_cut) = (0, 0, 0);
    let mut degenerate_tets = 0;

    for (index, cell) in cells.into_iter().enumerate() {
        match cell.kind {
            CellKind::Cut(CutCase::NotCut) => not_cut += 1,
            CellKind::Cut(CutCase::ApexCut { .. }) => apex_cut += 1,
            CellKind::Cut(CutCase::BandCut { .. }) => band_cut += 1,
            CellKind::Kept => kept_violations.push(index),
        }
        degenerate_tets += cell.degenerate;
        parents.extend(std::iter::repeat_n(index, cell.tets.len()));
        mesh.tetrahedra
            .extend(cell.tets.into_iter().map(Tetrahedron::from));
        iso_faces.extend(cell.iso_faces);
    }

    RetessOutput {
        final_tets: mesh.tetrahedra.len(),
        mesh,
        parents,
        iso_faces,
        original_tets,
        split_vertex_count,
        not_cut,
        apex_cut,
        band_cut,
        degenerate_tets,
        kept_violations,
    }
}

fn unused_split_vertices(mesh: &TetMesh, original_vertices: usize) -> usize {
    let used: HashSet<u32> = mesh
        .tetrahedra
        .iter()
        .flat_map(|t| t.vertices)
        .filter(|&v| v as usize >= original_vertices)
        .collect();
    mesh.vertices.len() - original_vertices - used.len()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use mesh_types::signed_volume;

    fn apex_mesh() -> TetMesh {
        TetMesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 1.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 0.0, 1.0, 2.0),
            ],
            vec![Tetrahedron::new(0, 1, 2, 3)],
        )
    }

    fn apex_crossings() -> CrossingSet {
        let mut crossings = CrossingSet::new();
        for v in 0..3 {
            crossings.insert(v, 3, 0.5).unwrap();
        }
        crossings
    }

    fn band_mesh() -> TetMesh {
        TetMesh::from_parts(
            vec![
                Vertex::from_coords(0.0, 0.0, 0.0, 0.0),
                Vertex::from_coords(1.0, 0.0, 0.0, 0.0),
                Vertex::from_coords(0.0, 1.0, 0.0, 2.0),
                Vertex::from_coords(0.0, 0.0, 1.0, 2.0),
            ],
            vec![Tetrahedron::new(0, 1, 2, 3)],
        )
    }

    fn band_crossings() -> CrossingSet {
        let mut crossings = CrossingSet::new();
        for (a, b) in [(0, 2), (0, 3), (1, 2), (1, 3)] {
            crossings.insert(a, b, 0.5).unwrap();
        }
        crossings
    }

    fn signed_volumes(mesh: &TetMesh) -> Vec<f64> {
        let positions = mesh.positions();
        mesh.tetrahedra
            .iter()
            .map(|t| signed_volume(&t.corners(&positions).unwrap()))
            .collect()
    }

    #[test]
    fn test_empty_mesh() {
        let result = retessellate(
            &TetMesh::new(),
            &CrossingSet::new(),
            0.0,
            &RetessParams::default(),
        );
        assert_eq!(result.unwrap_err(), RetessError::EmptyMesh);
    }

    #[test]
    fn test_apex_cut_cell() {
        let result = retessellate(
            &apex_mesh(),
            &apex_crossings(),
            1.0,
            &RetessParams::serial(),
        )
        .unwrap();

        assert_eq!(result.final_tets, 4);
        assert_eq!(result.apex_cut, 1);
        assert_eq!(result.parents, vec![0; 4]);
        // Tip first, with slots 2 and 3 swapped to match the parent.
        assert_eq!(result.mesh.tetrahedra[0].vertices, [3, 4, 6, 5]);
        assert!((result.mesh.total_volume() - 1.0 / 6.0).abs() < 1e-12);
        assert!(signed_volumes(&result.mesh).iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_band_cut_cell() {
        let result = retessellate(
            &band_mesh(),
            &band_crossings(),
            1.0,
            &RetessParams::serial(),
        )
        .unwrap();

        assert_eq!(result.final_tets, 6);
        assert_eq!(result.band_cut, 1);
        assert_eq!(result.split_vertex_count, 4);
        assert_eq!(result.iso_faces.len(), 2);
        assert!((result.mesh.total_volume() - 1.0 / 6.0).abs() < 1e-12);
        assert!(signed_volumes(&result.mesh).iter().all(|&v| v > 0.0));
    }

    #[test]
    fn test_band_iso_faces_use_min_diagonal() {
        let result = retessellate(
            &band_mesh(),
            &band_crossings(),
            1.0,
            &RetessParams::serial(),
        )
        .unwrap();

        // Split ids: {0,2} → 4, {0,3} → 5, {1,2} → 6, {1,3} → 7.
        let edges: Vec<Edge> = result
            .mesh
            .tetrahedra
            .iter()
            .flat_map(Tetrahedron::edges)
            .collect();
        assert!(edges.contains(&Edge::new(4, 7)));
        assert!(!edges.contains(&Edge::new(5, 6)));
        for face in &result.iso_faces {
            assert!(face.contains(&4) && face.contains(&7));
        }
    }

    #[test]
    fn test_iso_faces_point_up_field() {
        for (mesh, crossings) in [
            (apex_mesh(), apex_crossings()),
            (band_mesh(), band_crossings()),
        ] {
            let result = retessellate(&mesh, &crossings, 1.0, &RetessParams::serial()).unwrap();
            let surface = result.isosurface();
            // Field increases along (0, 1, 1) in the band mesh and along z in
            // the apex mesh; both have a positive z component.
            assert!(surface.normals.iter().all(|n| n.z > 0.0));
        }
    }

    #[test]
    fn test_inverted_parent_keeps_handedness() {
        let mut mesh = apex_mesh();
        mesh.tetrahedra[0] = Tetrahedron::new(0, 2, 1, 3);

        let result = retessellate(&mesh, &apex_crossings(), 1.0, &RetessParams::serial()).unwrap();
        assert!(signed_volumes(&result.mesh).iter().all(|&v| v < 0.0));
    }

    #[test]
    fn test_vertex_out_of_range() {
        let mut mesh = apex_mesh();
        mesh.tetrahedra.push(Tetrahedron::new(0, 1, 2, 9));
        let result = retessellate(&mesh, &CrossingSet::new(), 1.0, &RetessParams::serial());
        assert_eq!(
            result.unwrap_err(),
            RetessError::VertexOutOfRange {
                vertex: 9,
                count: 4
            }
        );
    }

    #[test]
    fn test_keep_original_policy() {
        let mut crossings = CrossingSet::new();
        crossings.insert(0, 3, 0.5).unwrap();
        crossings.insert(1, 3, 0.5).unwrap();

        let params = RetessParams::serial().with_violation_policy(ViolationPolicy::KeepOriginal);
        let result = retessellate(&apex_mesh(), &crossings, 1.0, &params).unwrap();

        assert_eq!(result.kept_violations, vec![0]);
        assert_eq!(result.final_tets, 1);
        assert_eq!(result.mesh.tetrahedra[0], Tetrahedron::new(0, 1, 2, 3));
        assert_eq!(result.split_vertex_count, 2);
        assert!(!result.is_conforming());
    }

    /// View with a reported cell count larger than its storage.
    struct PartialView {
        mesh: TetMesh,
        reported: usize,
    }

    impl TetMeshView for PartialView {
        fn vertex_count(&self) -> usize {
            self.mesh.vertex_count()
        }

        fn tet_count(&self) -> usize {
            self.reported
        }

        fn tet(&self, index: usize) -> Option<Tetrahedron> {
            self.mesh.tet(index)
        }

        fn position(&self, vertex: u32) -> Option<Point3<f64>> {
            self.mesh.position(vertex)
        }

        fn value(&self, vertex: u32) -> Option<f64> {
            self.mesh.value(vertex)
        }
    }

    #[test]
    fn test_missing_cell_is_an_error() {
        let view = PartialView {
            mesh: apex_mesh(),
            reported: 2,
        };
        let result = retessellate(&view, &apex_crossings(), 1.0, &RetessParams::serial());
        assert_eq!(
            result.unwrap_err(),
            RetessError::MissingTetrahedron { index: 1, count: 2 }
        );
    }

    #[test]
    fn test_collapsed_split_vertices_are_counted() {
        // Split vertices within rounding of the apex.
        let mut crossings = CrossingSet::new();
        for v in 0..3 {
            crossings.insert(v, 3, f64::MIN_POSITIVE).unwrap();
        }

        let result = retessellate(&apex_mesh(), &crossings, 1.0, &RetessParams::serial()).unwrap();
        assert_eq!(result.final_tets, 4);
        assert!(result.degenerate_tets >= 1);
        assert!((result.mesh.total_volume() - 1.0 / 6.0).abs() < 1e-12);

        let clean = retessellate(&apex_mesh(), &apex_crossings(), 1.0, &RetessParams::serial()).unwrap();
        assert_eq!(clean.degenerate_tets, 0);
    }

    #[test]
    fn test_unused_split_vertices_counted() {
        let mut mesh = apex_mesh();
        mesh.vertices.push(Vertex::from_coords(5.0, 5.0, 5.0, 3.0));
        let mut crossings = apex_crossings();
        crossings.insert(3, 4, 0.5).unwrap();

        let result = retessellate(&mesh, &crossings, 1.0, &RetessParams::serial()).unwrap();
        assert_eq!(result.split_vertex_count, 4);
        assert_eq!(unused_split_vertices(&result.mesh, 5), 1);
    }
}
