//! Core tetrahedral mesh types for CortenForge.
//!
//! This crate provides the foundational types for volume-mesh processing:
//!
//! - [`Vertex`] - A point in 3D space with a scalar field sample
//! - [`Edge`] - An undirected, canonically ordered vertex pair
//! - [`Tetrahedron`] - Four vertex indices in a fixed slot order
//! - [`TetMesh`] - An indexed tetrahedral mesh
//! - [`TriangleSurface`] - An indexed triangle skin with face normals
//! - [`TetMeshView`] - Read-only access used by mesh algorithms
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Other game engines
//!
//! # Vertex Identity
//!
//! A vertex is identified by its index in [`TetMesh::vertices`]. Indices are
//! assigned monotonically as vertices are pushed, so they form a stable total
//! order that algorithms may use for deterministic tie-breaking.
//!
//! # Example
//!
//! ```
//! use mesh_types::{TetMesh, Tetrahedron, Vertex, TetMeshView};
//!
//! let mut mesh = TetMesh::new();
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(1.0, 0.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 1.0, 0.0, 0.0));
//! mesh.vertices.push(Vertex::from_coords(0.0, 0.0, 1.0, 2.0));
//! mesh.tetrahedra.push(Tetrahedron::new(0, 1, 2, 3));
//!
//! assert_eq!(mesh.tet_count(), 1);
//! assert!((mesh.total_volume() - 1.0 / 6.0).abs() < 1e-12);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod mesh;
mod surface;
mod tetra;
mod traits;
mod vertex;

pub use mesh::TetMesh;
pub use surface::{TriangleSurface, face_normal};
pub use tetra::{Edge, TET_EDGES, TET_OPPOSITE_EDGE, Tetrahedron, signed_volume};
pub use traits::TetMeshView;
pub use vertex::Vertex;

// Re-export nalgebra types for convenience
pub use nalgebra::{Point3, Vector3};
