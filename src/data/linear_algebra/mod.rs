//! # Linear algebra primitives
//!
//! The sparse constraint matrix. Vectors are plain `Vec`s, dense or as `(index, value)` pairs.
pub mod matrix;
