//! Uniform periodic mesh on `[0, L)`.
//!
//! A [`PeriodicMesh`] samples a period of length `L` (default `2π`) at `N`
//! equally spaced points `L/N * i`. The right edge is identified with the left
//! one, so `L` itself is never a grid point and location near `L` wraps to
//! index `0`.
//!
//! Point location ([`PeriodicMesh::find`]) never fails loudly: an input outside
//! the domain is logged and reported through [`CellLocation::found`]. Index
//! resolution ([`PeriodicMesh::evaluate_at`]) returns a [`MeshError`] instead.

use crate::debug_invariants::DebugInvariants;
use crate::grid::{Grid, MeshPoint, Tolerance, lookup};
use crate::mesh_error::MeshError;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::ops::{Add, Div, Mul};

/// Rounding slack, in ulps of the grid index, below which a weight is zero.
const WEIGHT_SNAP_ULPS: f64 = 8.0;

/// Result of locating a real value on a [`PeriodicMesh`].
///
/// `index` and `weight` are only meaningful when `found` is `true`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellLocation {
    /// Whether the value lies inside `[0, L)`.
    pub found: bool,
    /// Nearest grid index, wrapped into `0..N`.
    pub index: usize,
    /// Signed offset from the grid point at `index`, in units of the spacing.
    pub weight: f64,
}

impl CellLocation {
    #[inline]
    fn hit(index: usize, weight: f64) -> Self {
        Self {
            found: true,
            index,
            weight,
        }
    }

    #[inline]
    fn miss(index: usize) -> Self {
        Self {
            found: false,
            index,
            weight: 0.0,
        }
    }
}

/// Serialized form: the progression is rebuilt on load.
#[derive(Serialize, Deserialize)]
struct MeshShape {
    point_count: usize,
    domain_length: f64,
}

/// `N` uniformly spaced points on the period `[0, L)`.
///
/// # Invariants
///
/// - `points.len() == point_count`.
/// - `points[i] == domain_length / point_count * i`; in particular
///   `points[0] == 0`, the sequence is strictly increasing and
///   `points[N-1] < domain_length`.
///
/// Fields are private; the only way to change a mesh is to replace it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "MeshShape", try_from = "MeshShape")]
pub struct PeriodicMesh {
    domain_length: f64,
    point_count: usize,
    points: Vec<f64>,
}

impl Default for PeriodicMesh {
    /// The empty mesh over `[0, 2π)`.
    fn default() -> Self {
        Self {
            domain_length: TAU,
            point_count: 0,
            points: Vec::new(),
        }
    }
}

impl From<PeriodicMesh> for MeshShape {
    fn from(mesh: PeriodicMesh) -> Self {
        Self {
            point_count: mesh.point_count,
            domain_length: mesh.domain_length,
        }
    }
}

impl TryFrom<MeshShape> for PeriodicMesh {
    type Error = MeshError;

    fn try_from(shape: MeshShape) -> Result<Self, Self::Error> {
        PeriodicMesh::try_new(shape.point_count, shape.domain_length)
    }
}

impl PeriodicMesh {
    /// `n_points` points on `[0, 2π)`.
    pub fn new(n_points: usize) -> Self {
        Self::build(n_points, TAU)
    }

    /// `n_points` points on `[0, domain_length)`.
    ///
    /// # Errors
    /// `InvalidDomainLength` unless `domain_length` is finite and positive and
    /// the spacing `domain_length / n_points` is representable, i.e. does not
    /// underflow to zero or push the last point onto `domain_length`.
    ///
    /// # Example
    /// ```rust
    /// # fn try_main() -> Result<(), periodic_mesh::mesh_error::MeshError> {
    /// use periodic_mesh::grid::Grid;
    /// use periodic_mesh::mesh::PeriodicMesh;
    /// let mesh = PeriodicMesh::try_new(4, 2.0)?;
    /// assert_eq!(mesh.points(), &[0.0, 0.5, 1.0, 1.5]);
    /// # Ok(())
    /// # }
    /// # try_main().unwrap();
    /// ```
    pub fn try_new(n_points: usize, domain_length: f64) -> Result<Self, MeshError> {
        if !(domain_length.is_finite() && domain_length > 0.0) {
            return Err(MeshError::InvalidDomainLength(domain_length));
        }
        if n_points > 0 {
            // Products `step * i` of a positive step are strictly increasing
            // for any allocatable `n_points`, so checking the ends suffices.
            let step = domain_length / n_points as f64;
            if step == 0.0 || step * (n_points - 1) as f64 >= domain_length {
                return Err(MeshError::InvalidDomainLength(domain_length));
            }
        }
        Ok(Self::build(n_points, domain_length))
    }

    fn build(n_points: usize, domain_length: f64) -> Self {
        let step = domain_length / n_points as f64;
        let points = (0..n_points).map(|i| step * i as f64).collect();
        let mesh = Self {
            domain_length,
            point_count: n_points,
            points,
        };
        log::debug!("periodic mesh: {n_points} points on [0, {domain_length})");
        crate::debug_invariants!(mesh.validate_invariants(), "PeriodicMesh::build");
        mesh
    }

    /// The period `L`.
    #[inline]
    pub fn domain_length(&self) -> f64 {
        self.domain_length
    }

    /// Number of grid points `N`.
    #[inline]
    pub fn point_count(&self) -> usize {
        self.point_count
    }

    /// Distance `L/N` between neighbouring points (infinite for `N = 0`).
    #[inline]
    pub fn spacing(&self) -> f64 {
        self.domain_length / self.point_count as f64
    }

    /// Locate the grid point nearest to `x`.
    ///
    /// `n = round(x / L * N)` with ties rounded away from zero, and
    /// `weight = x / L * N - n`, so `weight` lies in `[-0.5, 0.5]`. The weight
    /// is taken before wrapping: a value just below `L` maps to index `0`
    /// with a small negative weight.
    ///
    /// A weight within a few ulps of `n` is rounding noise from the division
    /// and is reported as exactly `0.0`, so every grid point locates itself
    /// with a zero weight.
    ///
    /// Values outside `[0, L)` (and NaN) are logged and reported as
    /// `found == false` with index `0` (below the domain) or `N` (above it).
    /// This method never panics.
    pub fn find(&self, x: f64) -> CellLocation {
        let n_points = self.point_count;
        if n_points == 0 {
            log::error!("cannot locate {x} on an empty mesh");
            return CellLocation::miss(0);
        }
        if x.is_nan() || x < 0.0 {
            log::error!("mesh point is out of bounds, {x} < 0");
            return CellLocation::miss(0);
        }
        if x >= self.domain_length {
            log::error!(
                "mesh point is out of bounds, {x} >= {}",
                self.domain_length
            );
            return CellLocation::miss(n_points);
        }

        let scaled = x / self.domain_length * n_points as f64;
        let nearest = scaled.round();
        let mut weight = scaled - nearest;
        if weight.abs() <= WEIGHT_SNAP_ULPS * f64::EPSILON * nearest.max(1.0) {
            weight = 0.0;
        }
        let n = nearest as i64;
        let upper = n_points as i64;
        if n < 0 {
            log::error!("mesh point is out of bounds, {x} < 0");
            return CellLocation::miss(0);
        }
        if n > upper {
            log::error!(
                "mesh point is out of bounds, {x} > {}",
                self.domain_length
            );
            return CellLocation::miss(n_points);
        }
        let index = if n == upper { 0 } else { n as usize };
        CellLocation::hit(index, weight)
    }

    /// `x + delta` wrapped into `[0, L)`.
    ///
    /// `delta` may be negative or span several periods but must be finite;
    /// `x` is expected in `[0, L)`. Both are checked in debug builds. A
    /// non-finite `delta` in release builds yields `0.0`.
    pub fn shift(&self, x: f64, delta: f64) -> f64 {
        let len = self.domain_length;
        debug_assert!(
            (0.0..len).contains(&x),
            "shift origin {x} outside [0, {len})"
        );
        debug_assert!(delta.is_finite(), "shift by non-finite {delta}");
        let mut out = x + delta;
        if (0.0..len).contains(&out) {
            return out;
        }
        out -= (out / len).floor() * len;
        // `floor` can leave `out == len` (or a tiny negative) after rounding.
        if !(0.0..len).contains(&out) {
            out = 0.0;
        }
        out
    }

    /// Mean of `f` over all grid points, `(1/N) Σ f(points[i])`.
    ///
    /// For an `L`-periodic integrand this is the trapezoidal approximation of
    /// `(1/L) ∫₀ᴸ f(x) dx`. `T` may be any quantity closed under addition and
    /// division by a real, e.g. a vector or matrix type.
    ///
    /// # Errors
    /// `EmptyMesh` when `N = 0`.
    pub fn integrate<F, T>(&self, mut f: F) -> Result<T, MeshError>
    where
        F: FnMut(f64) -> T,
        T: Add<Output = T> + Div<f64, Output = T>,
    {
        let mut it = self.points.iter().copied();
        let first = it.next().ok_or(MeshError::EmptyMesh)?;
        let init = f(first);
        let sum = it.fold(init, |acc, x| acc + f(x));
        Ok(sum / self.point_count as f64)
    }

    /// Parallel [`integrate`](Self::integrate).
    ///
    /// The summation order depends on rayon's splitting, so the result can
    /// differ from the sequential one in the last bits.
    #[cfg(feature = "rayon")]
    pub fn par_integrate<F, T>(&self, f: F) -> Result<T, MeshError>
    where
        F: Fn(f64) -> T + Sync + Send,
        T: Add<Output = T> + Div<f64, Output = T> + Send,
    {
        use rayon::prelude::*;
        let sum = self
            .points
            .par_iter()
            .map(|&x| f(x))
            .reduce_with(|a, b| a + b)
            .ok_or(MeshError::EmptyMesh)?;
        Ok(sum / self.point_count as f64)
    }

    /// `container[i]` for the grid point `i` nearest to `x`.
    ///
    /// # Errors
    /// `WrongIndex` if `x` cannot be located, `ContainerTooShort` if the
    /// container has no entry for the located point.
    pub fn evaluate_at<'c, T>(&self, container: &'c [T], x: f64) -> Result<&'c T, MeshError> {
        let loc = self.find(x);
        if !loc.found {
            return Err(MeshError::WrongIndex { value: x });
        }
        lookup(container, loc.index)
    }

    /// Linear interpolation of per-point data at `x`.
    ///
    /// Blends the nearest grid point with its periodic neighbour on the side
    /// of `x`, using `|weight|` as the neighbour's share.
    pub fn interpolate<T>(&self, container: &[T], x: f64) -> Result<T, MeshError>
    where
        T: Clone + Add<Output = T> + Mul<f64, Output = T>,
    {
        let loc = self.find(x);
        if !loc.found {
            return Err(MeshError::WrongIndex { value: x });
        }
        let n = self.point_count;
        let neighbour = if loc.weight >= 0.0 {
            (loc.index + 1) % n
        } else {
            (loc.index + n - 1) % n
        };
        let share = loc.weight.abs();
        let here = lookup(container, loc.index)?.clone();
        let there = lookup(container, neighbour)?.clone();
        Ok(here * (1.0 - share) + there * share)
    }
}

impl Grid for PeriodicMesh {
    #[inline]
    fn points(&self) -> &[f64] {
        &self.points
    }

    /// O(1) lookup on the uniform progression.
    ///
    /// This is the nearest stored point, not a periodic search: values near
    /// `L` resolve to `N-1`, never to `0`. Ties round away from zero.
    fn find_nearest(&self, x: f64) -> Option<MeshPoint> {
        if self.point_count == 0 || x.is_nan() {
            return None;
        }
        let raw = (x / self.spacing()).round();
        let i = raw.clamp(0.0, (self.point_count - 1) as f64) as usize;
        Some(MeshPoint::new(self.points[i], i))
    }
}

impl DebugInvariants for PeriodicMesh {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "PeriodicMesh");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        if self.points.len() != self.point_count {
            return Err(MeshError::InvariantViolation(format!(
                "{} points stored, {} expected",
                self.points.len(),
                self.point_count
            )));
        }
        let tol = Tolerance::default();
        let step = self.spacing();
        for (i, &p) in self.points.iter().enumerate() {
            if !tol.approx_eq(p, step * i as f64) {
                return Err(MeshError::InvariantViolation(format!(
                    "point {i} is {p}, expected {}",
                    step * i as f64
                )));
            }
        }
        if self.points.windows(2).any(|w| w[0] >= w[1]) {
            return Err(MeshError::InvariantViolation(
                "points are not strictly increasing".into(),
            ));
        }
        if let Some(&last) = self.points.last() {
            if last >= self.domain_length {
                return Err(MeshError::InvariantViolation(format!(
                    "last point {last} not below domain length {}",
                    self.domain_length
                )));
            }
        }
        Ok(())
    }
}
