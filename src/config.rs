//! # Solver parameters
//!
//! The values are empirical. They are collected here, rather than spread over the algorithms as
//! literals, so that they can be tuned per solver instance.

/// Parameters of a solver instance.
///
/// Set once at construction and read by the factorization, pricing and certificate code.
#[derive(Clone, Debug, PartialEq)]
pub struct SolverConfig {
    /// Number of basis changes after which the factorization is rebuilt from scratch instead of
    /// being updated.
    pub refactor_interval: usize,
    /// Number of candidates the Markowitz pivot search considers before settling for the best one
    /// found.
    pub markowitz_search_limit: usize,
    /// Number of iterations with an unchanged objective value before Bland's rule is engaged, and
    /// of iterations with a changing value before it is released again.
    pub cycle_threshold: usize,
    /// Number of iterations with an unchanged objective value before the costs are perturbed.
    pub perturbation_threshold: usize,
    /// Entries of a transformed ray guess closer than this to an integer are rounded to it.
    pub farkas_rounding_tolerance: f64,
    /// Ray guesses with an entry larger than this in absolute value are rejected.
    pub farkas_guess_magnitude_limit: f64,
    /// Steepest edge weights are recomputed when missing and `factor * iterations` exceeds the
    /// number of rows.
    pub steepest_edge_recompute_factor: usize,
    /// Number of threads used to recompute steepest edge weights.
    pub steepest_edge_threads: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            refactor_interval: 20,
            markowitz_search_limit: 25,
            cycle_threshold: 5,
            perturbation_threshold: 25,
            farkas_rounding_tolerance: 1e-3,
            farkas_guess_magnitude_limit: 1e30,
            steepest_edge_recompute_factor: 4,
            steepest_edge_threads: 4,
        }
    }
}
