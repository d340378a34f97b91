//! # Representing linear programs
//!
//! Bounds, bound directions and basis statuses of the variables of a linear program.
pub mod elements;
