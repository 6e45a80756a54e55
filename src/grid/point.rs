//! `MeshPoint`: a grid coordinate tagged with the index that produced it
//!
//! Every point handed out by a [`Grid`](crate::grid::Grid) remembers its
//! position in that grid, so it can be used directly to index per-point data.
//! The index is only meaningful for the grid that created the point: a
//! point taken from a parent mesh and passed to a patch is resolved by value,
//! not by index.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A real coordinate together with its originating index.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeshPoint {
    /// Coordinate in `[0, L)`.
    pub value: f64,
    /// Position of the point in the grid that produced it.
    pub index: usize,
}

impl MeshPoint {
    /// Creates a point from a value and its index.
    #[inline]
    pub const fn new(value: f64, index: usize) -> Self {
        Self { value, index }
    }
}

/// Points compare by coordinate; the index only breaks ties.
impl PartialOrd for MeshPoint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.value.partial_cmp(&other.value)? {
            Ordering::Equal => Some(self.index.cmp(&other.index)),
            ord => Some(ord),
        }
    }
}

impl From<MeshPoint> for f64 {
    #[inline]
    fn from(p: MeshPoint) -> f64 {
        p.value
    }
}

/// Prints only the coordinate.
impl fmt::Display for MeshPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}
