//! # An exact dual simplex solver
//!
//! Linear programs with two-sided constraints and variable bounds are solved with the revised dual
//! simplex method over rational numbers. The basis matrix is kept as an LU factorization with
//! Forrest-Tomlin updates, pricing uses dual steepest edge and the ratio test flips boxed
//! variables to their other bound where possible.
//!
//! The solver is meant to be used incrementally: bounds, sides and costs can be changed between
//! solves and the next solve starts from the last basis. When a problem is infeasible, a Farkas
//! certificate proving it can be retrieved.
#![warn(missing_docs)]

pub mod algorithm;
pub mod config;
pub mod data;
pub mod error;

pub use algorithm::dual_simplex::Solver;
pub use algorithm::OptimizationResult;
pub use config::SolverConfig;
pub use error::SolverError;
