//! MeshError: Unified error type for periodic-mesh public APIs
//!
//! Point location on a [`PeriodicMesh`](crate::mesh::PeriodicMesh) reports
//! failures through a status flag instead (see
//! [`CellLocation`](crate::mesh::CellLocation)); everything that resolves a
//! point to an index, or builds a mesh or patch, returns this error.

use thiserror::Error;

/// Unified error type for periodic-mesh operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshError {
    /// A point could not be resolved to an index of the mesh or patch.
    #[error("wrong index: no point with value {value} in this mesh")]
    WrongIndex { value: f64 },
    /// A real value is not one of the parent grid points.
    #[error("point {value} is not a grid point (nearest grid point is {nearest})")]
    PointNotFound { value: f64, nearest: f64 },
    /// An index is past the end of the mesh.
    #[error("index {index} out of range for mesh of {len} points")]
    IndexOutOfRange { index: usize, len: usize },
    /// The same parent point was selected twice for one patch.
    #[error("parent point {parent_index} selected twice (local indices {first} and {second})")]
    DuplicatePatchPoint {
        parent_index: usize,
        first: usize,
        second: usize,
    },
    /// A value container is shorter than the mesh indexing it.
    #[error("container of length {len} cannot be indexed at {index}")]
    ContainerTooShort { index: usize, len: usize },
    /// An operation that averages over points was called on an empty mesh.
    #[error("operation requires a non-empty mesh")]
    EmptyMesh,
    /// The period must be finite and strictly positive.
    #[error("invalid domain length {0}: must be finite and > 0")]
    InvalidDomainLength(f64),
    /// Textual input could not be read as a real number.
    #[error("cannot parse `{0}` as a mesh point")]
    Parse(String),
    /// A structural invariant does not hold.
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
