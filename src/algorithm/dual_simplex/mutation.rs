//! # Modifying the problem
//!
//! Bound and objective changes keep the basis, so that the next solve is warm started. Adding or
//! removing constraints changes the dimensions of the basis, which is then discarded.
//!
//! All changes invalidate the infeasibility proof of the last solve.
use std::sync::Arc;

use crate::algorithm::dual_simplex::Solver;
use crate::data::linear_program::elements::{
    BoundDirection, BoundValue, resting_value, slack_bounds, VariableStatus,
};
use crate::data::number_types::traits::Field;
use crate::error::{expect_index, expect_len, SolverError};

impl<F: Field> Solver<F> {
    /// Append a constraint `lower <= a^T x <= upper`.
    ///
    /// # Arguments
    ///
    /// * `coefficients`: Dense row `a`, with a value for every variable.
    pub fn add_constraint(
        &mut self,
        coefficients: &[F],
        lower: BoundValue<F>,
        upper: BoundValue<F>,
    ) -> Result<(), SolverError> {
        expect_len(coefficients, self.num_cols(), "constraint")?;

        Arc::make_mut(&mut self.matrix).push_row(coefficients)?;
        self.bounds.push(slack_bounds(&lower, &upper));
        self.farkas_guess = None;
        self.invalidate_proof();
        self.clear_basis();

        Ok(())
    }

    /// Remove a constraint, the constraints after it move up by one.
    pub fn remove_constraint(&mut self, row: usize) -> Result<(), SolverError> {
        expect_index(row, self.num_rows(), "constraint")?;

        let n = self.num_cols();
        Arc::make_mut(&mut self.matrix).remove_row(row)?;
        self.bounds.remove(n + row);
        self.farkas_guess = None;
        self.invalidate_proof();
        self.clear_basis();

        Ok(())
    }

    /// Set one side of a constraint.
    pub fn set_bound(
        &mut self,
        row: usize,
        direction: BoundDirection,
        value: BoundValue<F>,
    ) -> Result<(), SolverError> {
        expect_index(row, self.num_rows(), "constraint")?;

        let n = self.num_cols();
        self.bounds[n + row][!direction] = value.negated();
        self.invalidate_proof();

        Ok(())
    }

    /// Set the right hand side of a constraint that has a single side, or two equal sides.
    ///
    /// # Errors
    ///
    /// If the constraint has two different finite sides, it is not clear which one to replace.
    pub fn set_rhs(&mut self, row: usize, value: F) -> Result<(), SolverError> {
        expect_index(row, self.num_rows(), "constraint")?;

        let slack = &mut self.bounds[self.matrix.nr_columns() + row];
        let value = BoundValue::Finite(-value);
        let lower = slack[BoundDirection::Lower].finite().cloned();
        let upper = slack[BoundDirection::Upper].finite().cloned();
        match (lower, upper) {
            (None, _) => slack[BoundDirection::Upper] = value,
            (_, None) => slack[BoundDirection::Lower] = value,
            (Some(lower), Some(upper)) if lower == upper => {
                slack[BoundDirection::Lower] = value.clone();
                slack[BoundDirection::Upper] = value;
            },
            _ => return Err(SolverError::AmbiguousBound { row }),
        }
        self.invalidate_proof();

        Ok(())
    }

    /// Set both sides of a constraint.
    pub fn set_constraint_both_hand_sides(
        &mut self,
        row: usize,
        lower: BoundValue<F>,
        upper: BoundValue<F>,
    ) -> Result<(), SolverError> {
        expect_index(row, self.num_rows(), "constraint")?;

        let n = self.num_cols();
        self.bounds[n + row] = slack_bounds(&lower, &upper);
        self.invalidate_proof();

        Ok(())
    }

    /// Set the lower bound of a variable.
    pub fn set_var_lb(&mut self, column: usize, value: BoundValue<F>) -> Result<(), SolverError> {
        self.set_variable_bound(column, BoundDirection::Lower, value)
    }

    /// Set the upper bound of a variable.
    pub fn set_var_ub(&mut self, column: usize, value: BoundValue<F>) -> Result<(), SolverError> {
        self.set_variable_bound(column, BoundDirection::Upper, value)
    }

    /// Set both bounds of a variable.
    pub fn set_var_bounds(
        &mut self,
        column: usize,
        lower: BoundValue<F>,
        upper: BoundValue<F>,
    ) -> Result<(), SolverError> {
        expect_index(column, self.num_cols(), "variable")?;

        self.bounds[column][BoundDirection::Lower] = lower;
        self.bounds[column][BoundDirection::Upper] = upper;
        self.invalidate_proof();

        Ok(())
    }

    fn set_variable_bound(
        &mut self,
        column: usize,
        direction: BoundDirection,
        value: BoundValue<F>,
    ) -> Result<(), SolverError> {
        expect_index(column, self.num_cols(), "variable")?;

        self.bounds[column][direction] = value;
        self.invalidate_proof();

        Ok(())
    }

    /// Replace the cost vector.
    pub fn set_objective(&mut self, objective: Vec<F>) -> Result<(), SolverError> {
        expect_len(&objective, self.num_cols(), "objective")?;

        self.objective = objective;
        self.invalidate_proof();

        Ok(())
    }

    /// Stop solving once the objective value reaches this bound.
    ///
    /// The objective value only increases while the dual simplex method runs, so once it reaches
    /// the bound the optimum can't be below it.
    pub fn set_infeasibility_bound(&mut self, bound: BoundValue<F>) {
        self.infeasibility_bound = bound;
    }

    /// Import a basis.
    ///
    /// Nonbasic variables are placed at the requested bound, or at the other bound if that one is
    /// infinite. Free nonbasic variables start at zero. The steepest edge weights are recomputed
    /// once the solver has done a few iterations.
    ///
    /// # Errors
    ///
    /// If the vectors have the wrong size, or if the number of basic variables isn't equal to the
    /// number of constraints. The solver is not modified in that case.
    pub fn set_base(
        &mut self,
        var_stati: &[VariableStatus],
        con_stati: &[VariableStatus],
    ) -> Result<(), SolverError> {
        let (m, n) = (self.num_rows(), self.num_cols());
        expect_len(var_stati, n, "variable status vector")?;
        expect_len(con_stati, m, "constraint status vector")?;
        let nr_basic = var_stati.iter().chain(con_stati)
            .filter(|&&status| status == VariableStatus::Basic)
            .count();
        if nr_basic != m {
            return Err(SolverError::InvalidBasis { basic: nr_basic, nonbasic: n + m - nr_basic });
        }

        self.clear_basis();
        let mut basic = Vec::with_capacity(m);
        let mut nonbasic = Vec::with_capacity(n);
        for (j, &status) in var_stati.iter().chain(con_stati).enumerate() {
            let bounds = &self.bounds[j];
            match status {
                VariableStatus::Basic => basic.push(j),
                VariableStatus::AtLower => {
                    self.x[j] = resting_value(bounds, BoundDirection::Lower);
                    nonbasic.push(j);
                },
                VariableStatus::AtUpper => {
                    self.x[j] = resting_value(bounds, BoundDirection::Upper);
                    nonbasic.push(j);
                },
                VariableStatus::Free => {
                    self.x[j] = F::zero();
                    nonbasic.push(j);
                },
            }
        }

        let nonbasic_position = Arc::make_mut(&mut self.nonbasic_position);
        nonbasic_position.iter_mut().for_each(|position| *position = None);
        self.basic_position.iter_mut().for_each(|position| *position = None);
        for (i, &j) in basic.iter().enumerate() {
            self.basic_position[j] = Some(i);
        }
        for (k, &j) in nonbasic.iter().enumerate() {
            nonbasic_position[j] = Some(k);
        }
        self.basic = basic;
        self.nonbasic = nonbasic;
        self.has_basis = true;
        self.invalidate_proof();

        Ok(())
    }

    /// Provide a ray that is thought to prove infeasibility, computed in floating point.
    ///
    /// It is checked exactly at the start of the next solve.
    pub fn set_inexact_farkas_infeasibility_guess(&mut self, ray: Vec<f64>) -> Result<(), SolverError> {
        expect_len(&ray, self.num_rows(), "infeasibility ray")?;

        self.farkas_guess = Some(ray);

        Ok(())
    }

    fn invalidate_proof(&mut self) {
        self.farkas_proof = None;
        self.last_leaving = None;
    }
}
