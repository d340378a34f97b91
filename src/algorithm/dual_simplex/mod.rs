//! # Revised dual simplex
//!
//! Solves linear programs
//!
//! ```text
//! min c^T x
//! s.t. lower <= A x <= upper
//!      l <= x <= u
//! ```
//!
//! over an exact field. Every constraint gets a slack variable `s = -A x`, so that the system
//! becomes `A x + s = 0` and all bounds are bounds on variables. Variables `0..n` are structural,
//! variables `n..n + m` are the slacks of the rows.
//!
//! The solver keeps its basis between calls to `opt`, so after changing bounds or the objective
//! the next solve starts from the previous optimum.
use std::sync::Arc;

use itertools::repeat_n;

use crate::algorithm::lower_upper::LUDecomposition;
use crate::algorithm::parallel::multiply::ParallelMultiply;
use crate::algorithm::parallel::steepest_edge::SteepestEdgeHelper;
use crate::config::SolverConfig;
use crate::data::linear_algebra::matrix::ConstraintMatrix;
use crate::data::linear_program::elements::{
    BoundDirection, BoundValue, Bounds, bounds, slack_bounds, VariableStatus,
};
use crate::data::number_types::traits::Field;
use crate::error::{expect_index, expect_len, SolverError};

pub use provider::{InitialBasis, InitialBasisProvider, ProblemView};

mod driver;
mod farkas;
mod mutation;
mod pricing;
mod provider;

/// Revised dual simplex solver with a persistent basis.
///
/// Owns the problem data, the basis with its factorization, the primal and dual iterates and the
/// helper threads. The problem can be modified between solves.
pub struct Solver<F: Field> {
    config: SolverConfig,

    /// Structural coefficients of the constraints, shared read-only with the multiply helper.
    matrix: Arc<ConstraintMatrix<F>>,
    /// Cost of each structural variable.
    objective: Vec<F>,
    /// Bounds of the structural variables followed by the bounds of the slacks.
    bounds: Vec<Bounds<F>>,
    /// Stop once the objective value reaches this value.
    infeasibility_bound: BoundValue<F>,

    /// Whether the index vectors below describe a basis.
    has_basis: bool,
    /// Variable at every basis position, length `m`.
    basic: Vec<usize>,
    /// Basis position of every variable, if basic.
    basic_position: Vec<Option<usize>>,
    /// Variable at every nonbasic position, length `n`.
    nonbasic: Vec<usize>,
    /// Nonbasic position of every variable, if nonbasic.
    nonbasic_position: Arc<Vec<Option<usize>>>,

    /// Value of every variable.
    x: Vec<F>,
    /// Reduced cost of every nonbasic variable, by nonbasic position.
    d: Vec<F>,

    factorization: Option<Arc<LUDecomposition<F>>>,
    updates_since_refactor: usize,
    /// Dual steepest edge reference weight of every basis position.
    steepest_edge_weights: Option<Vec<F>>,

    farkas_proof: Option<Vec<F>>,
    farkas_guess: Option<Vec<f64>>,
    /// Basic variable that couldn't leave in the last run, the source of the Farkas proof.
    last_leaving: Option<usize>,
    /// Whether the costs were perturbed during the current call to `opt`.
    perturbed: bool,

    multiply: ParallelMultiply<F>,
    steepest_edge: Option<SteepestEdgeHelper<F>>,
    provider: Option<Box<dyn InitialBasisProvider<F>>>,
}

impl<F: Field> Solver<F> {
    /// Create a solver with the default parameters.
    ///
    /// # Arguments
    ///
    /// * `matrix`: Coefficients of the `m` constraints over `n` variables.
    /// * `objective`: Cost of each variable, length `n`.
    /// * `row_lower` and `row_upper`: Sides of the constraints, length `m`.
    /// * `variable_lower` and `variable_upper`: Bounds of the variables, length `n`.
    pub fn new(
        matrix: ConstraintMatrix<F>,
        objective: Vec<F>,
        row_lower: Vec<BoundValue<F>>,
        row_upper: Vec<BoundValue<F>>,
        variable_lower: Vec<BoundValue<F>>,
        variable_upper: Vec<BoundValue<F>>,
    ) -> Result<Self, SolverError> {
        Self::with_config(
            SolverConfig::default(),
            matrix,
            objective,
            row_lower, row_upper,
            variable_lower, variable_upper,
        )
    }

    /// Create a solver with custom parameters.
    ///
    /// See `new` for the other arguments.
    pub fn with_config(
        config: SolverConfig,
        matrix: ConstraintMatrix<F>,
        objective: Vec<F>,
        row_lower: Vec<BoundValue<F>>,
        row_upper: Vec<BoundValue<F>>,
        variable_lower: Vec<BoundValue<F>>,
        variable_upper: Vec<BoundValue<F>>,
    ) -> Result<Self, SolverError> {
        if config.refactor_interval == 0 {
            return Err(SolverError::MalformedInput("refactor interval must be positive".to_string()));
        }
        let (m, n) = (matrix.nr_rows(), matrix.nr_columns());
        expect_len(&objective, n, "objective")?;
        expect_len(&row_lower, m, "row lower bound vector")?;
        expect_len(&row_upper, m, "row upper bound vector")?;
        expect_len(&variable_lower, n, "variable lower bound vector")?;
        expect_len(&variable_upper, n, "variable upper bound vector")?;

        let bounds = variable_lower.into_iter().zip(variable_upper)
            .map(|(lower, upper)| bounds(lower, upper))
            .chain(row_lower.iter().zip(&row_upper).map(|(lower, upper)| slack_bounds(lower, upper)))
            .collect();

        let mut solver = Self {
            config,

            matrix: Arc::new(matrix),
            objective,
            bounds,
            infeasibility_bound: BoundValue::Infinite,

            has_basis: false,
            basic: Vec::new(),
            basic_position: Vec::new(),
            nonbasic: Vec::new(),
            nonbasic_position: Arc::new(Vec::new()),

            x: Vec::new(),
            d: Vec::new(),

            factorization: None,
            updates_since_refactor: 0,
            steepest_edge_weights: None,

            farkas_proof: None,
            farkas_guess: None,
            last_leaving: None,
            perturbed: false,

            multiply: ParallelMultiply::new(),
            steepest_edge: None,
            provider: None,
        };
        solver.clear_basis();
        log::debug!("created solver with {} rows and {} columns", m, n);

        Ok(solver)
    }

    /// Forget the basis, its factorization, the iterates and the steepest edge weights.
    ///
    /// The next call to `opt` starts from a provided or the slack basis.
    pub fn clear_basis(&mut self) {
        let (m, n) = (self.num_rows(), self.num_cols());

        self.has_basis = false;
        self.factorization = None;
        self.updates_since_refactor = 0;
        self.steepest_edge_weights = None;
        self.last_leaving = None;

        self.basic = (n..(n + m)).collect();
        self.nonbasic = (0..n).collect();
        self.basic_position = vec![None; n + m];
        let mut nonbasic_position = vec![None; n + m];
        for (i, &j) in self.basic.iter().enumerate() {
            self.basic_position[j] = Some(i);
        }
        for (k, &j) in self.nonbasic.iter().enumerate() {
            nonbasic_position[j] = Some(k);
        }
        self.nonbasic_position = Arc::new(nonbasic_position);

        self.x = repeat_n(F::zero(), n + m).collect();
        self.d = repeat_n(F::zero(), n).collect();
    }

    /// Number of constraints.
    pub fn num_rows(&self) -> usize {
        self.matrix.nr_rows()
    }

    /// Number of structural variables.
    pub fn num_cols(&self) -> usize {
        self.matrix.nr_columns()
    }

    /// Parameters of this instance.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Values of the structural variables.
    pub fn x(&self) -> &[F] {
        &self.x[..self.num_cols()]
    }

    /// Dual values of the constraints, `y = B^-T c_B`.
    ///
    /// `None` if there is no factorized basis, which is the case before the first solve.
    pub fn y(&self) -> Option<Vec<F>> {
        let factorization = self.factorization.as_ref()?;
        let n = self.num_cols();

        let mut y = self.basic.iter()
            .map(|&j| if j < n { self.objective[j].clone() } else { F::zero() })
            .collect::<Vec<_>>();
        factorization.btran(&mut y);

        Some(y)
    }

    /// Reduced costs of the structural variables, zero for the basic ones.
    pub fn d(&self) -> Vec<F> {
        (0..self.num_cols())
            .map(|j| match self.nonbasic_position[j] {
                Some(k) => self.d[k].clone(),
                None => F::zero(),
            })
            .collect()
    }

    /// Objective value `c^T x` of the current iterate.
    pub fn objective_value(&self) -> F {
        self.objective.iter().zip(&self.x)
            .filter(|(_, x)| !x.is_zero())
            .map(|(c, x)| c.clone() * x)
            .sum()
    }

    /// Position of every variable relative to the basis.
    ///
    /// # Return value
    ///
    /// The statuses of the structural variables and of the slack variables. A slack is at its lower
    /// bound when the constraint is at its upper side, as `s = -a^T x`.
    pub fn base(&self) -> (Vec<VariableStatus>, Vec<VariableStatus>) {
        let n = self.num_cols();
        let mut statuses = (0..self.bounds.len()).map(|j| self.status(j)).collect::<Vec<_>>();
        let constraints = statuses.split_off(n);

        (statuses, constraints)
    }

    fn status(&self, j: usize) -> VariableStatus {
        if self.has_basis && self.basic_position[j].is_some() {
            VariableStatus::Basic
        } else if self.bounds[j][BoundDirection::Lower].is_at(&self.x[j]) {
            VariableStatus::AtLower
        } else if self.bounds[j][BoundDirection::Upper].is_at(&self.x[j]) {
            VariableStatus::AtUpper
        } else {
            VariableStatus::Free
        }
    }

    /// Sides of a constraint, `(lower, upper)`.
    pub fn constraint_bounds(&self, row: usize) -> Result<(BoundValue<F>, BoundValue<F>), SolverError> {
        expect_index(row, self.num_rows(), "constraint")?;
        let slack = &self.bounds[self.num_cols() + row];

        Ok((slack[BoundDirection::Upper].negated(), slack[BoundDirection::Lower].negated()))
    }

    /// Bounds of a structural variable, `(lower, upper)`.
    pub fn variable_bounds(&self, column: usize) -> Result<(BoundValue<F>, BoundValue<F>), SolverError> {
        expect_index(column, self.num_cols(), "variable")?;
        let bounds = &self.bounds[column];

        Ok((bounds[BoundDirection::Lower].clone(), bounds[BoundDirection::Upper].clone()))
    }

    /// Sparse column of a structural or slack variable.
    fn column(&self, j: usize) -> Vec<(usize, F)> {
        let n = self.num_cols();
        if j < n {
            self.matrix.column(j).map(|(i, value)| (i, value.clone())).collect()
        } else {
            vec![(j - n, F::one())]
        }
    }

    /// Add `factor` times the column of a variable to a dense vector.
    fn add_column(&self, j: usize, factor: &F, target: &mut [F]) {
        let n = self.num_cols();
        if j < n {
            for (i, value) in self.matrix.column(j) {
                target[i] += &(value.clone() * factor);
            }
        } else {
            target[j - n] += factor;
        }
    }
}
