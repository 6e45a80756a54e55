//! Precision-carrying formatter/parser for real-valued points.

use crate::grid::MeshPoint;
use crate::mesh_error::MeshError;
use std::fmt;

/// Types that carry a single real coordinate.
pub trait RealValue: Copy {
    /// The real coordinate.
    fn real(&self) -> f64;
    /// Overwrite the real coordinate.
    fn set_real(&mut self, value: f64);
}

impl RealValue for f64 {
    #[inline]
    fn real(&self) -> f64 {
        *self
    }
    #[inline]
    fn set_real(&mut self, value: f64) {
        *self = value;
    }
}

/// Only the coordinate is read or written; the index is left alone.
impl RealValue for MeshPoint {
    #[inline]
    fn real(&self) -> f64 {
        self.value
    }
    #[inline]
    fn set_real(&mut self, value: f64) {
        self.value = value;
    }
}

/// A value paired with the number of significant digits to print.
///
/// Output follows the default stream notation of C/C++ (`%g`): with
/// `P = max(precision, 1)` significant digits and decimal exponent `X` of the
/// rounded value, fixed notation is used when `-4 <= X < P` and scientific
/// notation (`1.23e+03`, at least two exponent digits) otherwise. Trailing
/// zeros and a trailing decimal point are dropped.
///
/// # Example
/// ```rust
/// use periodic_mesh::grid::MeshPoint;
/// use periodic_mesh::io::NumIo;
/// let mut io = NumIo::new(MeshPoint::new(std::f64::consts::PI, 2), 4);
/// assert_eq!(io.to_string(), "3.142");
/// io.read(" 0.5 ").unwrap();
/// assert_eq!(io.value, MeshPoint::new(0.5, 2));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NumIo<T> {
    pub value: T,
    pub precision: usize,
}

impl<T: RealValue> NumIo<T> {
    /// Pair `value` with an output precision in significant digits.
    pub fn new(value: T, precision: usize) -> Self {
        Self { value, precision }
    }

    /// Parse one real number (surrounding whitespace allowed) into the value.
    ///
    /// # Errors
    /// `Parse` if `input` is not a real number; the value is unchanged then.
    pub fn read(&mut self, input: &str) -> Result<(), MeshError> {
        let parsed = input
            .trim()
            .parse::<f64>()
            .map_err(|_| MeshError::Parse(input.to_string()))?;
        self.value.set_real(parsed);
        Ok(())
    }

    /// The wrapped value.
    #[inline]
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: RealValue> fmt::Display for NumIo<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_significant(self.value.real(), self.precision))
    }
}

/// `x` with `precision` significant digits in `%g` notation.
fn format_significant(x: f64, precision: usize) -> String {
    if x.is_nan() {
        return "nan".into();
    }
    if x.is_infinite() {
        return if x > 0.0 { "inf".into() } else { "-inf".into() };
    }
    let digits = precision.max(1);
    // Rounding to `digits` first fixes the exponent, e.g. 9.99 at 2 digits is 1.0e1.
    let sci = format!("{:.*e}", digits - 1, x);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };
    if exp < -4 || exp >= digits as i32 {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{sign}{:02}", trim_fraction(mantissa), exp.abs())
    } else {
        let decimals = (digits as i32 - 1 - exp) as usize;
        trim_fraction(&format!("{x:.decimals$}")).to_string()
    }
}

/// Drop trailing zeros after the decimal point, and the point itself.
fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
