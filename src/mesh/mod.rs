//! Periodic meshes and patches over them.

pub mod patch;
pub mod periodic;

pub use patch::MeshPatch;
pub use periodic::{CellLocation, PeriodicMesh};
