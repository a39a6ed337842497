//! Iso-value crossing detection on tetrahedral meshes.
//!
//! Treats the per-vertex values of a [`TetMesh`](mesh_types::TetMesh) as a
//! piecewise-linear field and finds the edges its level set crosses, in the
//! [`CrossingSet`](mesh_retess::CrossingSet) form the retessellator
//! consumes.
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
//! use mesh_marching_tets::{DetectParams, detect_crossings};
//! use mesh_retess::{RetessParams, retessellate};
//! use mesh_types::{TetMesh, Tetrahedron, Vertex};
//!
//! let mesh = TetMesh::from_parts(
//!     vec![
//!         Vertex::from_coords(0.0, 0.0, 0.0, 0.0),
//!         Vertex::from_coords(1.0, 0.0, 0.0, 0.0),
//!         Vertex::from_coords(0.0, 1.0, 0.0, 0.0),
//!         Vertex::from_coords(0.0, 0.0, 1.0, 2.0),
//!     ],
//!     vec![Tetrahedron::new(0, 1, 2, 3)],
//! );
//!
//! let params = DetectParams::new(1.0);
//! let crossings = detect_crossings(&mesh, &params)?;
//! let result = retessellate(&mesh, &crossings, params.iso_value, &RetessParams::default())?;
//!
//! assert_eq!(result.apex_cut, 1);
//! assert_eq!(result.final_tets, 4);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

mod detect;
mod error;
mod params;

pub use detect::{crossing_parameter, detect_crossings};
pub use error::{DetectError, DetectResult};
pub use params::DetectParams;
