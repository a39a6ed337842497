//! Conforming tetrahedral retessellation along an isosurface.
//!
//! Given a tetrahedral mesh and the set of edges an isosurface crosses, this
//! crate inserts one vertex per crossed edge and re-tessellates every cut
//! cell so the isosurface becomes a union of cell faces:
//!
//! - **Apex cut** (3 crossed edges around one vertex): a tip tetrahedron
//!   plus a prism, 4 cells
//! - **Band cut** (4 crossed edges): two prisms on either side of the iso
//!   quad, 6 cells
//!
//! The output is conforming: two cells sharing a face triangulate it the
//! same way, because every prism split depends only on global vertex ids.
//! New cells keep their parent's orientation.
//!
//! The building blocks are exported on their own:
//!
//! - [`split_prism`] - Canonical 3-tetrahedron prism split
//! - [`reroot_hex`] / [`reroot_hex_at_min`] - Handedness-preserving hex relabeling
//! - [`scaled_jacobian`] / [`fix_orientation`] - Quality sign and orientation repair
//! - [`CrossingSet`] / [`SplitVertices`] - Crossing records and split-vertex ids
//!
//! Where the isosurface lies is not decided here. Crossings come from the
//! caller, e.g. the `mesh-marching-tets` crate.
//!
//! # Layer 0 Crate
//!
//! This is a Layer 0 crate with **zero Bevy dependencies**. It can be used in:
//! - CLI tools
//! - Web applications (WASM)
//! - Servers
//! - Other game engines
//!
//! # Example
//!
//! ```
//! use mesh_retess::{CrossingSet, RetessParams, retessellate};
//! use mesh_types::{TetMesh, Tetrahedron, Vertex};
//!
//! // Field 0 on the bottom edge, 2 on the top edge.
//! let mesh = TetMesh::from_parts(
//!     vec![
//!         Vertex::from_coords(0.0, 0.0, 0.0, 0.0),
//!         Vertex::from_coords(1.0, 0.0, 0.0, 0.0),
//!         Vertex::from_coords(0.0, 1.0, 0.0, 2.0),
//!         Vertex::from_coords(0.0, 0.0, 1.0, 2.0),
//!     ],
//!     vec![Tetrahedron::new(0, 1, 2, 3)],
//! );
//!
//! let mut crossings = CrossingSet::new();
//! for (a, b) in [(0, 2), (0, 3), (1, 2), (1, 3)] {
//!     crossings.insert(a, b, 0.5)?;
//! }
//!
//! let result = retessellate(&mesh, &crossings, 1.0, &RetessParams::default())?;
//! assert_eq!(result.band_cut, 1);
//! assert_eq!(result.final_tets, 6);
//! assert_eq!(result.isosurface().face_count(), 2);
//! # Ok::<(), mesh_retess::RetessError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod classify;
mod crossing;
mod error;
mod hex;
mod orient;
mod params;
mod prism;
mod result;
mod retessellate;
mod tables;

pub use classify::{CutCase, classify_tet};
pub use crossing::{CrossingSet, SplitVertices};
pub use error::{RetessError, RetessResult};
pub use hex::{reroot_hex, reroot_hex_at_min};
pub use orient::{Handedness, fix_orientation, scaled_jacobian};
pub use params::{RetessParams, ViolationPolicy};
pub use prism::{quad_diagonal, split_prism};
pub use result::RetessOutput;
pub use retessellate::retessellate;
pub use tables::{HEX_EDGES, HEX_ROTATIONS, HEX_TWISTS, PRISM_EDGES, PRISM_ROTATIONS};
