//! Textual input/output of single mesh points.
//!
//! The only text format is a single real number per point, written with a
//! caller-chosen precision. See [`NumIo`].

pub mod num_io;

pub use num_io::{NumIo, RealValue};
