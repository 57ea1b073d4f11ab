//! Small ndarray-like types used throughout the crate.
//!
//! Provides `Array2` (row-major 2D) and `Array1` (1D) containers with the
//! handful of methods the perceptron needs. Rows of an `Array2` always share
//! one column count, so a feature matrix can never be ragged once built.
pub mod matrix;
pub mod vector;

pub use matrix::{Array2, ShapeError};
pub use vector::{dot, Array1};
