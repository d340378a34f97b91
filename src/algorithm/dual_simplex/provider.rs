//! # Initial basis providers
//!
//! Another solver, typically an inexact one, can often tell quickly which basis is optimal or
//! which ray proves infeasibility. Such a suggestion only saves work: the solver verifies it
//! exactly and falls back to the slack basis when it is not usable.
use crate::algorithm::dual_simplex::Solver;
use crate::data::linear_algebra::matrix::ConstraintMatrix;
use crate::data::linear_program::elements::{BoundDirection, BoundValue, Bounds, VariableStatus};
use crate::data::number_types::traits::Field;

/// A suggestion for the starting point of a solve.
#[derive(Clone, Debug, PartialEq)]
pub struct InitialBasis {
    /// Status of each structural variable.
    pub var_stati: Vec<VariableStatus>,
    /// Status of each slack variable, see `Solver::base`.
    pub con_stati: Vec<VariableStatus>,
    /// If the problem is thought to be infeasible, a ray proving it.
    pub farkas_ray: Option<Vec<f64>>,
}

/// Computes a starting basis for a problem.
pub trait InitialBasisProvider<F> {
    /// Suggest a basis, or `None` to let the solver start from the slack basis.
    fn initial_basis(&mut self, problem: &ProblemView<'_, F>) -> Option<InitialBasis>;
}

/// Read-only access to the problem being solved.
pub struct ProblemView<'a, F> {
    matrix: &'a ConstraintMatrix<F>,
    objective: &'a [F],
    bounds: &'a [Bounds<F>],
}

impl<'a, F: Field> ProblemView<'a, F> {
    /// Coefficients of the constraints.
    pub fn matrix(&self) -> &'a ConstraintMatrix<F> {
        self.matrix
    }

    /// Cost of each structural variable.
    pub fn objective(&self) -> &'a [F] {
        self.objective
    }

    /// Bounds `(lower, upper)` of a structural variable.
    pub fn variable_bounds(&self, column: usize) -> (&'a BoundValue<F>, &'a BoundValue<F>) {
        let bounds = &self.bounds[column];
        (&bounds[BoundDirection::Lower], &bounds[BoundDirection::Upper])
    }

    /// Sides `(lower, upper)` of a constraint.
    pub fn constraint_bounds(&self, row: usize) -> (BoundValue<F>, BoundValue<F>) {
        let slack = &self.bounds[self.matrix.nr_columns() + row];
        (slack[BoundDirection::Upper].negated(), slack[BoundDirection::Lower].negated())
    }
}

impl<F: Field> Solver<F> {
    /// Register a provider that is consulted when `opt` is called without a basis.
    pub fn set_initial_basis_provider(&mut self, provider: Box<dyn InitialBasisProvider<F>>) {
        self.provider = Some(provider);
    }

    /// Import the basis suggested by the provider, if there is one.
    pub(super) fn seed_from_provider(&mut self) {
        let Some(mut provider) = self.provider.take() else {
            return;
        };
        let suggestion = provider.initial_basis(&ProblemView {
            matrix: &self.matrix,
            objective: &self.objective,
            bounds: &self.bounds,
        });
        self.provider = Some(provider);

        let Some(InitialBasis { var_stati, con_stati, farkas_ray }) = suggestion else {
            return;
        };
        match self.set_base(&var_stati, &con_stati) {
            Ok(()) => log::debug!("imported basis from the initial basis provider"),
            Err(error) => log::info!("ignoring basis from the initial basis provider: {}", error),
        }
        if let Some(ray) = farkas_ray {
            if let Err(error) = self.set_inexact_farkas_infeasibility_guess(ray) {
                log::info!("ignoring ray from the initial basis provider: {}", error);
            }
        }
    }
}
