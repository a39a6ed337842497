//! Result types for retessellation.

// Cell counts don't overflow in practice
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]

use hashbrown::HashMap;
use mesh_types::{TetMesh, TriangleSurface, face_normal};

/// Result of retessellating a mesh along an isosurface.
#[derive(Debug, Clone)]
pub struct RetessOutput {
    /// The conforming mesh: original vertices, then split vertices, then the
    /// new cells in original cell order.
    pub mesh: TetMesh,

    /// Index of the original cell each output cell came from.
    pub parents: Vec<usize>,

    /// The isosurface as triangles over `mesh` vertex ids, each wound so its
    /// normal points toward increasing field value.
    pub iso_faces: Vec<[u32; 3]>,

    /// Number of cells in the input mesh.
    pub original_tets: usize,

    /// Number of cells in the output mesh.
    pub final_tets: usize,

    /// Number of vertices created on crossed edges.
    pub split_vertex_count: usize,

    /// Cells with no crossed edge.
    pub not_cut: usize,

    /// Cells cut on the three edges around one vertex.
    pub apex_cut: usize,

    /// Cells cut on four edges.
    pub band_cut: usize,

    /// New cells with zero volume, left by split vertices that rounding
    /// placed on an endpoint.
    pub degenerate_tets: usize,

    /// Cells copied unchanged despite an unsupported crossing pattern.
    ///
    /// Only populated under [`ViolationPolicy::KeepOriginal`](crate::ViolationPolicy::KeepOriginal).
    pub kept_violations: Vec<usize>,
}

impl RetessOutput {
    /// Get the cell multiplication factor.
    #[must_use]
    pub fn tet_ratio(&self) -> f64 {
        if self.original_tets == 0 {
            1.0
        } else {
            self.final_tets as f64 / self.original_tets as f64
        }
    }

    /// Check if any cell was split.
    #[must_use]
    pub const fn was_cut(&self) -> bool {
        self.apex_cut + self.band_cut > 0
    }

    /// Check if every cell was handled by a supported case.
    #[must_use]
    pub fn is_conforming(&self) -> bool {
        self.kept_violations.is_empty()
    }

    /// Extract the isosurface as a standalone triangle surface.
    ///
    /// Only vertices referenced by a face are kept, renumbered in order of
    /// first use. Degenerate faces (zero area) are dropped.
    #[must_use]
    pub fn isosurface(&self) -> TriangleSurface {
        let mut surface = TriangleSurface::new();
        let mut remap: HashMap<u32, u32> = HashMap::new();

        for face in &self.iso_faces {
            let Some(corners) = face
                .iter()
                .map(|&v| self.mesh.vertices.get(v as usize).map(|vx| vx.position))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            let Some(normal) = face_normal(&corners[0], &corners[1], &corners[2]) else {
                continue;
            };

            let local = face.map(|v| {
                *remap.entry(v).or_insert_with(|| {
                    surface.vertices.push(self.mesh.vertices[v as usize].position);
                    (surface.vertices.len() - 1) as u32
                })
            });
            surface.faces.push(local);
            surface.normals.push(normal);
        }

        surface
    }
}

impl std::fmt::Display for RetessOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Retessellation: {} → {} tets ({:.1}x), {} split vertices, cut {} apex / {} band, {} uncut",
            self.original_tets,
            self.final_tets,
            self.tet_ratio(),
            self.split_vertex_count,
            self.apex_cut,
            self.band_cut,
            self.not_cut
        )?;
        if self.degenerate_tets > 0 {
            write!(f, ", {} degenerate", self.degenerate_tets)?;
        }
        if !self.kept_violations.is_empty() {
            write!(f, ", {} kept violations", self.kept_violations.len())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use mesh_types::{Tetrahedron, Vector3, Vertex};

    fn output() -> RetessOutput {
        RetessOutput {
            mesh: TetMesh::from_parts(
                vec![
                    Vertex::from_coords(0.0, 0.0, 0.0, 0.0),
                    Vertex::from_coords(1.0, 0.0, 0.0, 0.0),
                    Vertex::from_coords(0.0, 1.0, 0.0, 0.0),
                    Vertex::from_coords(0.0, 0.0, 1.0, 2.0),
                    Vertex::from_coords(0.0, 0.0, 0.5, 1.0),
                    Vertex::from_coords(0.5, 0.0, 0.5, 1.0),
                    Vertex::from_coords(0.0, 0.5, 0.5, 1.0),
                ],
                vec![Tetrahedron::new(3, 4, 5, 6)],
            ),
            parents: vec![0],
            iso_faces: vec![[4, 5, 6]],
            original_tets: 1,
            final_tets: 4,
            split_vertex_count: 3,
            not_cut: 0,
            apex_cut: 1,
            band_cut: 0,
            degenerate_tets: 0,
            kept_violations: Vec::new(),
        }
    }

    #[test]
    fn test_tet_ratio() {
        let result = output();
        assert!((result.tet_ratio() - 4.0).abs() < 0.001);
        assert!(result.was_cut());
        assert!(result.is_conforming());
    }

    #[test]
    fn test_display() {
        let mut result = output();
        let display = format!("{result}");
        assert!(display.contains("1 → 4 tets"));
        assert!(display.contains("4.0x"));
        assert!(display.contains("3 split vertices"));
        assert!(!display.contains("violations"));
        assert!(!display.contains("degenerate"));

        result.degenerate_tets = 2;
        assert!(format!("{result}").contains("2 degenerate"));

        result.kept_violations.push(7);
        assert!(format!("{result}").contains("1 kept violations"));
    }

    #[test]
    fn test_isosurface_compacts_vertices() {
        let surface = output().isosurface();
        assert_eq!(surface.vertices.len(), 3);
        assert_eq!(surface.faces, vec![[0, 1, 2]]);
        assert!((surface.normals[0] - Vector3::z()).norm() < 1e-12);
        assert!((surface.area() - 0.125).abs() < 1e-12);
    }

    #[test]
    fn test_isosurface_drops_degenerate_faces() {
        let mut result = output();
        result.iso_faces.push([4, 4, 5]);
        result.iso_faces.push([4, 5, 99]);
        let surface = result.isosurface();
        assert_eq!(surface.face_count(), 1);
        assert_eq!(surface.vertices.len(), 3);
    }
}
