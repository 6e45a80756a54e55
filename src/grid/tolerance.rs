//! Floating-point comparison settings.

use serde::{Deserialize, Serialize};

/// Relative/absolute tolerance used when two grid values must be "the same".
///
/// Two values `a`, `b` compare equal when
/// `|a - b| <= absolute + relative * max(|a|, |b|)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    #[serde(default = "default_relative")]
    pub relative: f64,
    #[serde(default = "default_absolute")]
    pub absolute: f64,
}

fn default_relative() -> f64 {
    1e-12
}

fn default_absolute() -> f64 {
    1e-14
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            relative: default_relative(),
            absolute: default_absolute(),
        }
    }
}

impl Tolerance {
    /// Exact comparison.
    pub const EXACT: Tolerance = Tolerance {
        relative: 0.0,
        absolute: 0.0,
    };

    /// Whether `a` and `b` are equal within this tolerance. NaN is never equal.
    #[inline]
    pub fn approx_eq(&self, a: f64, b: f64) -> bool {
        (a - b).abs() <= self.absolute + self.relative * a.abs().max(b.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_accepts_rounding_noise() {
        let tol = Tolerance::default();
        let a = std::f64::consts::PI;
        assert!(tol.approx_eq(a, a + 4.0 * f64::EPSILON));
        assert!(!tol.approx_eq(a, a + 1e-6));
    }

    #[test]
    fn absolute_term_covers_zero() {
        let tol = Tolerance::default();
        assert!(tol.approx_eq(0.0, 1e-15));
        assert!(!tol.approx_eq(0.0, 1e-10));
    }

    #[test]
    fn exact_and_nan() {
        assert!(Tolerance::EXACT.approx_eq(1.0, 1.0));
        assert!(!Tolerance::EXACT.approx_eq(1.0, 1.0 + f64::EPSILON));
        assert!(!Tolerance::default().approx_eq(f64::NAN, f64::NAN));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let tol: Tolerance = serde_json::from_str(r#"{"relative":1e-6}"#).unwrap();
        assert_eq!(tol.relative, 1e-6);
        assert_eq!(tol.absolute, 1e-14);
    }
}
