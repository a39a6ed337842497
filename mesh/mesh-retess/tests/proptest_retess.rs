//! Property-based tests for retessellation.
//!
//! Run with: cargo test -p mesh-retess -- proptest

#![allow(
    missing_docs,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::float_cmp,
    clippy::cast_possible_truncation
)]

use mesh_marching_tets::{DetectParams, detect_crossings};
use mesh_retess::{
    Handedness, RetessParams, fix_orientation, retessellate, scaled_jacobian, split_prism,
};
use mesh_types::{Edge, Point3, TetMesh, Tetrahedron, Vertex, signed_volume};
use proptest::prelude::*;

// =============================================================================
// Strategies
// =============================================================================

fn arb_point() -> impl Strategy<Value = Point3<f64>> {
    prop::array::uniform3(-10.0..10.0f64).prop_map(|[x, y, z]| Point3::new(x, y, z))
}

/// Four points spanning a tetrahedron of reasonable quality, either handedness.
fn arb_corners() -> impl Strategy<Value = [Point3<f64>; 4]> {
    prop::array::uniform4(arb_point())
        .prop_filter("near-degenerate tetrahedron", |p| scaled_jacobian(p).abs() > 0.05)
}

/// A field value clearly away from the iso value 0.
fn arb_value() -> impl Strategy<Value = f64> {
    (any::<bool>(), 0.5..2.0f64).prop_map(|(neg, v)| if neg { -v } else { v })
}

fn arb_cell() -> impl Strategy<Value = TetMesh> {
    (arb_corners(), prop::array::uniform4(arb_value())).prop_map(|(corners, values)| {
        TetMesh::from_parts(
            corners
                .iter()
                .zip(values)
                .map(|(&p, f)| Vertex::new(p, f))
                .collect(),
            vec![Tetrahedron::new(0, 1, 2, 3)],
        )
    })
}

/// Two cells glued along face 0-1-2, apexes on opposite sides.
fn arb_cell_pair() -> impl Strategy<Value = TetMesh> {
    (arb_corners(), 0.2..3.0f64, prop::array::uniform5(arb_value())).prop_map(
        |(c, depth, values)| {
            let normal = (c[1] - c[0]).cross(&(c[2] - c[0]));
            let side = normal.dot(&(c[3] - c[0])).signum();
            let centroid = Point3::from((c[0].coords + c[1].coords + c[2].coords) / 3.0);
            let opposite = centroid - normal.normalize() * side * depth;

            let points = [c[0], c[1], c[2], c[3], opposite];
            TetMesh::from_parts(
                points
                    .iter()
                    .zip(values)
                    .map(|(&p, f)| Vertex::new(p, f))
                    .collect(),
                vec![Tetrahedron::new(0, 1, 2, 3), Tetrahedron::new(0, 1, 2, 4)],
            )
        },
    )
}

fn retess(mesh: &TetMesh) -> mesh_retess::RetessOutput {
    let crossings = detect_crossings(mesh, &DetectParams::new(0.0)).unwrap();
    retessellate(mesh, &crossings, 0.0, &RetessParams::serial()).unwrap()
}

// =============================================================================
// Property Tests: Single Cell
// =============================================================================

proptest! {
    /// A linear field cuts a tetrahedron on 0, 3 or 4 edges; every case is
    /// supported.
    #[test]
    fn linear_field_never_violates(mesh in arb_cell()) {
        let crossings = detect_crossings(&mesh, &DetectParams::new(0.0)).unwrap();
        prop_assert!(retessellate(&mesh, &crossings, 0.0, &RetessParams::serial()).is_ok());
    }

    /// Volume is conserved.
    #[test]
    fn volume_is_conserved(mesh in arb_cell()) {
        let original = mesh.total_volume();
        let result = retess(&mesh);
        let diff = (result.mesh.total_volume() - original).abs();
        prop_assert!(diff <= 1e-9 * original.max(1.0), "volume drift {}", diff);
    }

    /// Swapping slots 2 and 3 is always enough to match the parent.
    #[test]
    fn orientation_repair_suffices(mesh in arb_cell()) {
        let parent = Handedness::of_corners(&mesh.tetrahedra[0].corners(&mesh.positions()).unwrap());
        let result = retess(&mesh);
        let positions = result.mesh.positions();

        for tet in &result.mesh.tetrahedra {
            let q = scaled_jacobian(&tet.corners(&positions).unwrap());
            prop_assert!(q != 0.0);
            prop_assert_eq!(Handedness::of(q), parent);
        }
    }

    /// Cell count matches the cut case.
    #[test]
    fn cell_count_matches_case(mesh in arb_cell()) {
        let result = retess(&mesh);
        let expected = result.not_cut + 4 * result.apex_cut + 6 * result.band_cut;
        prop_assert_eq!(result.final_tets, expected);
        prop_assert_eq!(result.iso_faces.len(), result.apex_cut + 2 * result.band_cut);
    }

    /// Every split vertex lands where the linear field equals the iso value.
    #[test]
    fn split_vertices_lie_on_iso(mesh in arb_cell()) {
        let result = retess(&mesh);
        let p = mesh.positions();
        let f: Vec<f64> = mesh.vertices.iter().map(|v| v.value).collect();

        // Barycentric interpolation of the field at each new vertex.
        let total = signed_volume(&[p[0], p[1], p[2], p[3]]);
        for v in &result.mesh.vertices[4..] {
            let x = v.position;
            let weights = [
                signed_volume(&[x, p[1], p[2], p[3]]),
                signed_volume(&[p[0], x, p[2], p[3]]),
                signed_volume(&[p[0], p[1], x, p[3]]),
                signed_volume(&[p[0], p[1], p[2], x]),
            ];
            let value: f64 = weights.iter().zip(&f).map(|(w, fi)| w / total * fi).sum();
            prop_assert!(value.abs() < 1e-9, "field {} at split vertex", value);
        }
    }
}

// =============================================================================
// Property Tests: Conformity
// =============================================================================

proptest! {
    /// Two cells sharing a face triangulate it identically.
    #[test]
    fn shared_face_is_conforming(mesh in arb_cell_pair()) {
        let result = retess(&mesh);

        let mut counts = hashbrown::HashMap::new();
        for tet in &result.mesh.tetrahedra {
            for mut face in tet.faces() {
                face.sort_unstable();
                *counts.entry(face).or_insert(0usize) += 1;
            }
        }

        // Sub-faces of the shared face 0-1-2 are the faces made only of its
        // corners and the split vertices on its edges. Split ids follow
        // sorted edge order.
        let crossings = detect_crossings(&mesh, &DetectParams::new(0.0)).unwrap();
        let sorted = crossings.sorted();
        let on_shared: Vec<u32> = [0u32, 1, 2]
            .into_iter()
            .chain(
                [(0, 1), (0, 2), (1, 2)]
                    .into_iter()
                    .filter_map(|(a, b)| {
                        sorted
                            .iter()
                            .position(|&(e, _)| e == Edge::new(a, b))
                            .map(|rank| (mesh.vertices.len() + rank) as u32)
                    }),
            )
            .collect();

        let mut shared_area = 0.0;
        let positions = result.mesh.positions();
        for (face, &count) in &counts {
            if face.iter().all(|v| on_shared.contains(v)) {
                prop_assert_eq!(count, 2, "sub-face {:?} seen from one side only", face);
                let [a, b, c] = face.map(|v| positions[v as usize]);
                shared_area += 0.5 * (b - a).cross(&(c - a)).norm();
            } else {
                prop_assert!(count <= 2, "face {:?} used {} times", face, count);
            }
        }

        let p = mesh.positions();
        let face_area = 0.5 * (p[1] - p[0]).cross(&(p[2] - p[0])).norm();
        prop_assert!((shared_area - face_area).abs() <= 1e-9 * face_area.max(1.0));
    }

    /// The splitter plus the fixer produce one handedness for any labeling.
    #[test]
    fn prism_split_orientation(ids in Just(vec![0u32, 1, 2, 3, 4, 5]).prop_shuffle(), height in 0.1..5.0f64) {
        let reference = [
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, height),
            Point3::new(1.0, 0.0, height),
            Point3::new(0.0, 1.0, height),
        ];
        let mut positions = [Point3::origin(); 6];
        for (slot, &id) in ids.iter().enumerate() {
            positions[id as usize] = reference[slot];
        }

        let prism: [u32; 6] = ids.as_slice().try_into().unwrap();
        let mut tets = split_prism(&prism).unwrap();
        fix_orientation(Handedness::Positive, &mut tets, &positions);

        let mut total = 0.0;
        for tet in &tets {
            let v = signed_volume(&tet.map(|i| positions[i as usize]));
            prop_assert!(v > 0.0);
            total += v;
        }
        prop_assert!((total - 0.5 * height).abs() < 1e-12);
    }
}
