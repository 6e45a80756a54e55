#![allow(dead_code)]
use periodic_mesh::mesh::PeriodicMesh;
use std::ops::{Add, Div};

pub const TOL: f64 = 1e-12;

pub fn mesh(n: usize, len: f64) -> PeriodicMesh {
    PeriodicMesh::try_new(n, len).expect("valid domain length")
}

/// Assert two reals agree to `TOL`.
pub fn assert_close(got: f64, want: f64) {
    assert!(
        (got - want).abs() <= TOL * want.abs().max(1.0),
        "got={got} want={want}"
    );
}

/// Two-component quantity for checking vector-valued quadrature.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pair(pub f64, pub f64);

impl Add for Pair {
    type Output = Pair;
    fn add(self, rhs: Pair) -> Pair {
        Pair(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl Div<f64> for Pair {
    type Output = Pair;
    fn div(self, rhs: f64) -> Pair {
        Pair(self.0 / rhs, self.1 / rhs)
    }
}
