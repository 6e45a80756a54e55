//! Patches: ordered subsets of a parent mesh with reverse lookup.
//!
//! A [`MeshPatch`] borrows its parent [`PeriodicMesh`], copies the values of
//! the selected parent points in caller order, and maps each value back to
//! its local position.
//!
//! # Lookup keys
//!
//! Values are keyed by their position on the *parent* grid,
//! `round(x / spacing)`. Every patch value is a parent grid value, so keys are
//! exactly the parent indices and two patch points can never share one. A
//! successful key lookup is confirmed by comparing the stored value against
//! the query within the patch [`Tolerance`], so a value that merely rounds to
//! a selected index is still rejected.

use crate::debug_invariants::DebugInvariants;
use crate::grid::{Grid, MeshPoint, Tolerance, lookup};
use crate::mesh::periodic::PeriodicMesh;
use crate::mesh_error::MeshError;
use std::collections::BTreeMap;

/// An ordered subset of a [`PeriodicMesh`] with its own local indexing.
///
/// The borrow on `parent` keeps the parent alive and unmodified for as long
/// as the patch exists.
#[derive(Clone, Debug)]
pub struct MeshPatch<'a> {
    parent: &'a PeriodicMesh,
    points: Vec<f64>,
    parent_indices: Vec<usize>,
    reverse_map: BTreeMap<i64, usize>,
    tolerance: Tolerance,
}

impl<'a> MeshPatch<'a> {
    /// Patch over `parent[indices[0]], parent[indices[1]], ...` in that order.
    ///
    /// # Errors
    /// - `IndexOutOfRange` if an index is not a valid parent index.
    /// - `DuplicatePatchPoint` if a parent index is selected twice.
    pub fn new(parent: &'a PeriodicMesh, indices: &[usize]) -> Result<Self, MeshError> {
        let parent_points = parent.points();
        let mut points = Vec::with_capacity(indices.len());
        for &i in indices {
            let value = parent_points
                .get(i)
                .copied()
                .ok_or(MeshError::IndexOutOfRange {
                    index: i,
                    len: parent_points.len(),
                })?;
            points.push(value);
        }
        let patch = Self::assemble(parent, points, indices.to_vec())?;
        log::debug!(
            "mesh patch: {} of {} parent points",
            patch.subset_size(),
            parent.point_count()
        );
        Ok(patch)
    }

    /// Patch covering every parent point in parent order.
    pub fn identity(parent: &'a PeriodicMesh) -> Self {
        let mut reverse_map = BTreeMap::new();
        for i in 0..parent.point_count() {
            reverse_map.insert(i as i64, i);
        }
        let patch = Self {
            parent,
            points: parent.points().to_vec(),
            parent_indices: (0..parent.point_count()).collect(),
            reverse_map,
            tolerance: Tolerance::default(),
        };
        crate::debug_invariants!(patch.validate_invariants(), "MeshPatch::identity");
        patch
    }

    fn assemble(
        parent: &'a PeriodicMesh,
        points: Vec<f64>,
        parent_indices: Vec<usize>,
    ) -> Result<Self, MeshError> {
        let mut patch = Self {
            parent,
            points,
            parent_indices,
            reverse_map: BTreeMap::new(),
            tolerance: Tolerance::default(),
        };
        for local in 0..patch.points.len() {
            let key = patch.key(patch.points[local]);
            if let Some(first) = patch.reverse_map.insert(key, local) {
                return Err(MeshError::DuplicatePatchPoint {
                    parent_index: patch.parent_indices[local],
                    first,
                    second: local,
                });
            }
        }
        crate::debug_invariants!(patch.validate_invariants(), "MeshPatch::assemble");
        Ok(patch)
    }

    /// Replace the tolerance used to confirm lookups.
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[inline]
    fn key(&self, x: f64) -> i64 {
        (x / self.parent.spacing()).round() as i64
    }

    /// The mesh this patch was taken from.
    #[inline]
    pub fn parent(&self) -> &'a PeriodicMesh {
        self.parent
    }

    /// Number of selected points.
    #[inline]
    pub fn subset_size(&self) -> usize {
        self.points.len()
    }

    /// Parent index of every local point.
    #[inline]
    pub fn parent_indices(&self) -> &[usize] {
        &self.parent_indices
    }

    /// Tolerance used to confirm value lookups.
    #[inline]
    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Local index of the patch point with the value of `point`.
    ///
    /// Accepts a [`MeshPoint`] from any grid (only its value is used) or a
    /// plain `f64`.
    ///
    /// # Errors
    /// `WrongIndex` if no patch point has that value.
    pub fn get_index(&self, point: impl Into<f64>) -> Result<usize, MeshError> {
        let value = point.into();
        self.reverse_map
            .get(&self.key(value))
            .copied()
            .filter(|&local| self.tolerance.approx_eq(self.points[local], value))
            .ok_or(MeshError::WrongIndex { value })
    }

    /// Whether some patch point has the value of `point`.
    #[inline]
    pub fn contains(&self, point: impl Into<f64>) -> bool {
        self.get_index(point).is_ok()
    }

    /// Evaluate parent-indexed data at the parent grid point equal to `x`.
    ///
    /// `container` is indexed in the *parent's* index space. `x` must be a
    /// parent grid value (within tolerance); it need not belong to the patch.
    ///
    /// # Errors
    /// `PointNotFound` if `x` is not a parent grid value, `ContainerTooShort`
    /// if `container` has no entry for it.
    pub fn evaluate_value<'c, T>(&self, container: &'c [T], x: f64) -> Result<&'c T, MeshError> {
        let nearest = self
            .parent
            .find_nearest(x)
            .ok_or(MeshError::WrongIndex { value: x })?;
        if !self.tolerance.approx_eq(nearest.value, x) {
            log::warn!("can't evaluate {x}: nearest parent point is {}", nearest.value);
            return Err(MeshError::PointNotFound {
                value: x,
                nearest: nearest.value,
            });
        }
        self.parent.evaluate(container, nearest)
    }
}

impl Grid for MeshPatch<'_> {
    #[inline]
    fn points(&self) -> &[f64] {
        &self.points
    }

    /// Evaluate patch-indexed data at `point`, resolved by value through
    /// [`MeshPatch::get_index`].
    fn evaluate<'c, T>(&self, container: &'c [T], point: MeshPoint) -> Result<&'c T, MeshError> {
        let local = self.get_index(point)?;
        lookup(container, local)
    }
}

impl DebugInvariants for MeshPatch<'_> {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "MeshPatch");
    }

    fn validate_invariants(&self) -> Result<(), MeshError> {
        if self.points.len() != self.parent_indices.len() {
            return Err(MeshError::InvariantViolation(format!(
                "{} points but {} parent indices",
                self.points.len(),
                self.parent_indices.len()
            )));
        }
        if self.reverse_map.len() != self.points.len() {
            return Err(MeshError::InvariantViolation(format!(
                "reverse map has {} entries for {} points",
                self.reverse_map.len(),
                self.points.len()
            )));
        }
        let parent_points = self.parent.points();
        for (local, (&value, &pi)) in self.points.iter().zip(&self.parent_indices).enumerate() {
            if parent_points.get(pi) != Some(&value) {
                return Err(MeshError::InvariantViolation(format!(
                    "local point {local} ({value}) does not match parent point {pi}"
                )));
            }
            if self.reverse_map.get(&self.key(value)) != Some(&local) {
                return Err(MeshError::InvariantViolation(format!(
                    "reverse map does not resolve local point {local}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn identity_matches_parent() {
        let mesh = PeriodicMesh::new(8);
        let patch = MeshPatch::identity(&mesh);
        assert_eq!(patch.points(), mesh.points());
        assert_eq!(patch.subset_size(), 8);
        for p in mesh.iter() {
            assert_eq!(patch.get_index(p).unwrap(), p.index);
        }
    }

    #[test]
    fn subset_keeps_caller_order() {
        let mesh = PeriodicMesh::new(4);
        let patch = MeshPatch::new(&mesh, &[2, 0, 3]).unwrap();
        assert_eq!(patch.points(), &[mesh.points()[2], 0.0, mesh.points()[3]]);
        assert_eq!(patch.parent_indices(), &[2, 0, 3]);
        assert_eq!(patch.get_index(PI).unwrap(), 0);
        assert_eq!(patch.get_index(0.0).unwrap(), 1);
        assert_eq!(
            patch.get_index(FRAC_PI_2),
            Err(MeshError::WrongIndex { value: FRAC_PI_2 })
        );
    }

    #[test]
    fn closely_spaced_values_do_not_collide() {
        // 0.0, 0.1, 0.2, ... all truncate to 0
        let mesh = PeriodicMesh::try_new(10, 1.0).unwrap();
        let patch = MeshPatch::identity(&mesh);
        for i in 0..10 {
            assert_eq!(patch.get_index(mesh.points()[i]).unwrap(), i);
        }
    }

    #[test]
    fn near_miss_value_is_rejected() {
        let mesh = PeriodicMesh::try_new(10, 1.0).unwrap();
        let patch = MeshPatch::identity(&mesh);
        assert!(patch.get_index(0.31).is_err());
        let loose = patch.clone().with_tolerance(Tolerance {
            relative: 0.0,
            absolute: 0.02,
        });
        assert_eq!(loose.get_index(0.31).unwrap(), 3);
    }

    #[test]
    fn construction_errors() {
        let mesh = PeriodicMesh::new(4);
        assert_eq!(
            MeshPatch::new(&mesh, &[1, 4]).unwrap_err(),
            MeshError::IndexOutOfRange { index: 4, len: 4 }
        );
        assert_eq!(
            MeshPatch::new(&mesh, &[1, 3, 1]).unwrap_err(),
            MeshError::DuplicatePatchPoint {
                parent_index: 1,
                first: 0,
                second: 2
            }
        );
    }

    #[test]
    fn evaluate_by_point_uses_local_index() {
        let mesh = PeriodicMesh::new(4);
        let patch = MeshPatch::new(&mesh, &[3, 1]).unwrap();
        let local = ["three", "one"];
        let p = mesh.point(1).unwrap();
        assert_eq!(*patch.evaluate(&local, p).unwrap(), "one");
        let missing = mesh.point(2).unwrap();
        assert!(matches!(
            patch.evaluate(&local, missing),
            Err(MeshError::WrongIndex { .. })
        ));
    }

    #[test]
    fn evaluate_by_value_uses_parent_index() {
        let mesh = PeriodicMesh::new(4);
        let patch = MeshPatch::new(&mesh, &[3]).unwrap();
        let parent_data = [10, 11, 12, 13];
        assert_eq!(*patch.evaluate_value(&parent_data, PI).unwrap(), 12);
        assert!(matches!(
            patch.evaluate_value(&parent_data, 1.0),
            Err(MeshError::PointNotFound { value, .. }) if value == 1.0
        ));
    }

    #[test]
    fn empty_parent() {
        let mesh = PeriodicMesh::default();
        let patch = MeshPatch::identity(&mesh);
        assert_eq!(patch.subset_size(), 0);
        assert!(!patch.contains(0.0));
        patch.validate_invariants().unwrap();
    }
}
