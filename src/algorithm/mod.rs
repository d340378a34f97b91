//! # Algorithms
//!
//! The dual simplex method and the machinery it depends on: a factorization of the basis matrix
//! that can be updated, and helper threads for the work that can be overlapped.
use std::fmt;

pub mod dual_simplex;
pub mod lower_upper;
pub(crate) mod parallel;

/// A linear program is either infeasible, unbounded or has a finite optimum.
///
/// This is determined as the result of an algorithm. A run can also be stopped early when the
/// objective value reaches a bound set by the caller.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum OptimizationResult {
    /// The current basis is primal and dual feasible.
    Optimal,
    /// No dual feasible basis exists, the problem is unbounded or infeasible.
    Unbounded,
    /// The dual is unbounded, a Farkas certificate of primal infeasibility is available.
    Infeasible,
    /// The objective value reached the infeasibility bound before optimality was proven.
    CutOff,
}

impl OptimizationResult {
    /// Integer encoding of the result: 0 optimal, 1 unbounded, 2 infeasible, 3 cut off.
    pub fn code(self) -> i32 {
        match self {
            OptimizationResult::Optimal => 0,
            OptimizationResult::Unbounded => 1,
            OptimizationResult::Infeasible => 2,
            OptimizationResult::CutOff => 3,
        }
    }
}

impl fmt::Display for OptimizationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            OptimizationResult::Optimal => "optimal",
            OptimizationResult::Unbounded => "unbounded",
            OptimizationResult::Infeasible => "infeasible",
            OptimizationResult::CutOff => "cut off",
        })
    }
}
