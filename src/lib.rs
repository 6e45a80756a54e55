#![cfg_attr(docsrs, feature(doc_cfg))]
//! # periodic-mesh
//!
//! Uniform periodic one-dimensional meshes for sampling a wrap-around domain
//! `[0, L)` (typically a reciprocal-space interval of length `2π`), plus
//! patches exposing ordered subsets of a mesh with fast reverse lookup.
//!
//! ## Features
//! - [`PeriodicMesh`](mesh::PeriodicMesh): nearest-point location with
//!   interpolation weight, periodic shifts, and mean-value quadrature
//! - [`MeshPatch`](mesh::MeshPatch): borrowed subset view with value → local
//!   index lookup
//! - [`Grid`](grid::Grid): the shared point-container interface
//! - Precision-controlled text I/O of single points via [`NumIo`](io::NumIo)
//!
//! ## Errors
//! Locating a point ([`PeriodicMesh::find`](mesh::PeriodicMesh::find)) never
//! errors; it returns a [`CellLocation`](mesh::CellLocation) whose `found`
//! flag must be checked. Resolving a point to an index returns
//! [`MeshError`](mesh_error::MeshError).
//!
//! ## Cargo features
//! - `rayon`: parallel quadrature (`PeriodicMesh::par_integrate`)
//! - `check-invariants` / `strict-invariants`: validate mesh invariants after
//!   construction in release builds (always on with debug assertions)
//!
//! ## Usage
//! ```rust
//! use periodic_mesh::prelude::*;
//!
//! let mesh = PeriodicMesh::new(4);
//! let loc = mesh.find(std::f64::consts::FRAC_PI_2);
//! assert!(loc.found);
//! assert_eq!(loc.index, 1);
//!
//! let patch = MeshPatch::new(&mesh, &[3, 1]).unwrap();
//! assert_eq!(patch.get_index(mesh.point(1).unwrap()).unwrap(), 1);
//! ```

pub mod debug_invariants;
pub mod grid;
pub mod io;
pub mod mesh;
pub mod mesh_error;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::grid::{Grid, MeshPoint, Tolerance};
    pub use crate::io::NumIo;
    pub use crate::mesh::{CellLocation, MeshPatch, PeriodicMesh};
    pub use crate::mesh_error::MeshError;
}
