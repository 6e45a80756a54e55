//! Structural self-checks for meshes and patches.
//!
//! Constructors run [`DebugInvariants::validate_invariants`] through the
//! [`debug_invariants!`](crate::debug_invariants) macro, which panics on
//! failure in debug builds and when the `check-invariants` or
//! `strict-invariants` feature is enabled. Release builds skip the check.

use crate::mesh_error::MeshError;

/// Validation of a value's structural invariants.
pub trait DebugInvariants {
    /// Panic if the invariants do not hold (when invariant checking is on).
    fn debug_assert_invariants(&self);

    /// The first violated invariant, if any.
    fn validate_invariants(&self) -> Result<(), MeshError>;

    /// Whether every invariant holds, regardless of build settings.
    #[inline]
    fn invariants_hold(&self) -> bool {
        self.validate_invariants().is_ok()
    }
}

/// Run a fallible invariant check and panic with context on error when
/// invariant checking is enabled; expands to nothing otherwise.
#[macro_export]
macro_rules! debug_invariants {
    ($expr:expr, $($ctx:tt)*) => {
        #[cfg(any(debug_assertions, feature = "strict-invariants", feature = "check-invariants"))]
        if let Err(e) = $expr {
            panic!(concat!("[mesh invariants] ", $($ctx)*, ": {}"), e);
        }
    };
}
