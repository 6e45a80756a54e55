//! Grid abstraction shared by meshes and patches.
//!
//! A [`Grid`] is an ordered sequence of real points with index access,
//! nearest-point search, and an `evaluate` dispatcher that reads per-point
//! data out of a caller-owned container.

pub mod point;
pub mod tolerance;

pub use point::MeshPoint;
pub use tolerance::Tolerance;

use crate::mesh_error::MeshError;

/// Ordered storage of real grid points.
pub trait Grid {
    /// All point values in grid order.
    fn points(&self) -> &[f64];

    /// Number of points.
    #[inline]
    fn len(&self) -> usize {
        self.points().len()
    }

    /// Whether the grid has no points.
    #[inline]
    fn is_empty(&self) -> bool {
        self.points().is_empty()
    }

    /// The point at index `i`.
    fn point(&self, i: usize) -> Result<MeshPoint, MeshError> {
        self.points()
            .get(i)
            .map(|&v| MeshPoint::new(v, i))
            .ok_or(MeshError::IndexOutOfRange {
                index: i,
                len: self.len(),
            })
    }

    /// Iterator over the points in grid order.
    fn iter<'a>(&'a self) -> impl Iterator<Item = MeshPoint> + 'a {
        self.points()
            .iter()
            .enumerate()
            .map(|(i, &v)| MeshPoint::new(v, i))
    }

    /// The stored point closest to `x`, or `None` for an empty grid.
    ///
    /// Distances are plain `|p - x|`; the default is a linear scan and makes
    /// no assumption about ordering. Ties go to the lower index.
    fn find_nearest(&self, x: f64) -> Option<MeshPoint> {
        let mut best: Option<(MeshPoint, f64)> = None;
        for p in self.iter() {
            let d = (p.value - x).abs();
            match best {
                Some((_, bd)) if bd <= d => {}
                _ => best = Some((p, d)),
            }
        }
        best.map(|(p, _)| p)
    }

    /// Read the entry of `container` belonging to `point`.
    ///
    /// The default indexes by `point.index`.
    ///
    /// # Errors
    /// `ContainerTooShort` if `container` has no entry at that index.
    fn evaluate<'c, T>(&self, container: &'c [T], point: MeshPoint) -> Result<&'c T, MeshError> {
        lookup(container, point.index)
    }
}

/// `container[index]` as a `Result`.
#[inline]
pub(crate) fn lookup<T>(container: &[T], index: usize) -> Result<&T, MeshError> {
    container.get(index).ok_or(MeshError::ContainerTooShort {
        index,
        len: container.len(),
    })
}
