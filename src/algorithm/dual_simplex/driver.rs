//! # Iteration driver
//!
//! Bootstrapping a dual feasible basis, the main loop and the fallbacks for stalling.
use std::mem;
use std::sync::Arc;

use itertools::repeat_n;

use crate::algorithm::dual_simplex::Solver;
use crate::algorithm::lower_upper::LUDecomposition;
use crate::algorithm::OptimizationResult;
use crate::algorithm::parallel::steepest_edge::{recompute_weights, SteepestEdgeHelper};
use crate::data::linear_program::elements::{
    BoundDirection, BoundValue, Bounds, bounds, is_contradictory, is_fixed,
};
use crate::data::number_types::traits::Field;
use crate::error::SolverError;

/// Outcome of a single run of the dual simplex method.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Run {
    Done(OptimizationResult),
    /// The objective value stalled, the costs should be perturbed.
    Perturb,
}

/// Outcome of the search for a dual feasible basis.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum PhaseOne {
    Feasible,
    Infeasible,
    Perturb,
}

impl<F: Field> Solver<F> {
    /// Solve the linear program.
    ///
    /// Starts from the current basis if there is one. Otherwise, the initial basis provider is
    /// consulted, and if it has no suggestion the slack basis is used.
    ///
    /// # Return value
    ///
    /// Whether an optimum was found, or the problem is unbounded or infeasible. With a finite
    /// infeasibility bound, the solve can also be cut off.
    ///
    /// # Errors
    ///
    /// Only if the basis matrix can't be factorized, which indicates a bug.
    pub fn opt(&mut self) -> Result<OptimizationResult, SolverError> {
        self.last_leaving = None;
        self.farkas_proof = None;
        self.perturbed = false;

        if !self.has_basis {
            self.seed_from_provider();
        }
        if self.has_basis && self.factorization.is_none() {
            if let Err(error) = self.refactor() {
                log::info!("can't factorize the imported basis, using the slack basis: {}", error);
                self.has_basis = false;
            }
        }
        if !self.has_basis {
            self.logical_basis()?;
        }

        if self.farkas_guess.is_some() && self.check_farkas_guess()? {
            self.compute_primal()?;
            self.compute_dual()?;
            log::info!("infeasibility ray guess verified, problem is infeasible");
            return Ok(OptimizationResult::Infeasible);
        }

        let result = loop {
            match self.run(false)? {
                Run::Done(result) => break result,
                Run::Perturb => self.solve_perturbed()?,
            }
        };

        if result == OptimizationResult::Optimal {
            self.farkas_guess = None;
            self.farkas_proof = None;
        }
        log::info!("solve finished: {}", result);

        Ok(result)
    }

    /// Solve the problem with slightly changed costs.
    ///
    /// The result is discarded; the basis it ends in is the starting point for the solve with the
    /// original costs.
    fn solve_perturbed(&mut self) -> Result<(), SolverError> {
        let n = self.num_cols();
        let original = self.objective.clone();

        let smallest = original.iter()
            .filter(|cost| !cost.is_zero())
            .map(|cost| cost.abs())
            .min()
            .unwrap_or_else(F::one);
        let smallest = smallest.min(F::one());
        for (i, cost) in self.objective.iter_mut().enumerate() {
            if let Some(denominator) = F::from_usize(10_000 + n + i) {
                *cost += &(smallest.clone() / &denominator);
            }
        }
        log::info!("objective value stalled, solving with perturbed costs");

        self.perturbed = true;
        let infeasibility_bound = mem::replace(&mut self.infeasibility_bound, BoundValue::Infinite);
        let result = self.run(false);
        self.objective = original;
        self.infeasibility_bound = infeasibility_bound;

        result.map(|_| ())
    }

    /// Seed the slack basis, with all structural variables nonbasic.
    pub(super) fn logical_basis(&mut self) -> Result<(), SolverError> {
        let m = self.num_rows();

        self.clear_basis();
        self.has_basis = true;
        self.steepest_edge_weights = Some(repeat_n(F::one(), m).collect());

        self.refactor()
    }

    /// One run of the dual simplex method, starting from the current basis.
    ///
    /// # Arguments
    ///
    /// * `phase_one`: Whether the current bounds are surrogate bounds, for which every basis is dual
    /// feasible after flipping.
    fn run(&mut self, phase_one: bool) -> Result<Run, SolverError> {
        if let Some(j) = self.bounds.iter().position(is_contradictory) {
            log::info!("variable {} has a lower bound above its upper bound", j);
            self.farkas_proof = Some(repeat_n(F::zero(), self.num_rows()).collect());
            return Ok(Run::Done(OptimizationResult::Infeasible));
        }
        self.last_leaving = None;

        loop {
            self.move_to_bounds();
            self.flip_to_dual_feasibility()?;
            if phase_one || self.is_dual_feasible() {
                break;
            }

            match self.phase_one()? {
                PhaseOne::Feasible => {},
                PhaseOne::Infeasible => return Ok(Run::Done(OptimizationResult::Unbounded)),
                PhaseOne::Perturb => return Ok(Run::Perturb),
            }
        }

        self.iterate(phase_one)
    }

    /// Find a dual feasible basis by solving the problem with bounds that make every basis dual
    /// feasible after flipping.
    ///
    /// The optimal objective value of that problem is the total dual infeasibility of the
    /// original problem, which is zero exactly when a dual feasible basis exists.
    fn phase_one(&mut self) -> Result<PhaseOne, SolverError> {
        log::info!("basis is not dual feasible, starting phase one");

        let surrogate = self.bounds.iter().map(surrogate_bounds).collect::<Vec<_>>();
        let original = mem::replace(&mut self.bounds, surrogate);
        let result = self.run(true);
        let objective = self.objective_value();
        self.bounds = original;

        Ok(match result? {
            Run::Perturb => PhaseOne::Perturb,
            Run::Done(OptimizationResult::Optimal) if objective.is_zero() => {
                log::info!("phase one found a dual feasible basis");
                PhaseOne::Feasible
            },
            Run::Done(result) => {
                log::info!("phase one ended {} with objective value {}, no dual feasible basis", result, objective);
                PhaseOne::Infeasible
            },
        })
    }

    /// Place every nonbasic variable at one of its bounds, or at zero if it has none.
    fn move_to_bounds(&mut self) {
        for &j in &self.nonbasic {
            let bounds = &self.bounds[j];
            let x = &mut self.x[j];
            match (bounds[BoundDirection::Lower].finite(), bounds[BoundDirection::Upper].finite()) {
                (Some(lower), Some(upper)) => if x != lower && x != upper {
                    *x = lower.clone();
                },
                (Some(lower), None) => *x = lower.clone(),
                (None, Some(upper)) => *x = upper.clone(),
                (None, None) => *x = F::zero(),
            }
        }
    }

    /// Move boxed variables to the bound at which their reduced cost has the right sign.
    ///
    /// Recomputes the iterates until no more variables are moved.
    fn flip_to_dual_feasibility(&mut self) -> Result<(), SolverError> {
        loop {
            self.compute_primal()?;
            self.compute_dual()?;

            let mut nr_flipped = 0;
            for (k, &j) in self.nonbasic.iter().enumerate() {
                let bounds = &self.bounds[j];
                if is_fixed(bounds) {
                    continue;
                }
                if let (Some(lower), Some(upper)) = (
                    bounds[BoundDirection::Lower].finite(),
                    bounds[BoundDirection::Upper].finite(),
                ) {
                    if &self.x[j] == lower && self.d[k] < F::zero() {
                        self.x[j] = upper.clone();
                        nr_flipped += 1;
                    } else if &self.x[j] == upper && self.d[k] > F::zero() {
                        self.x[j] = lower.clone();
                        nr_flipped += 1;
                    }
                }
            }

            if nr_flipped == 0 {
                break Ok(());
            }
            log::debug!("flipped {} boxed variables to a dual feasible bound", nr_flipped);
        }
    }

    /// Whether every nonbasic variable sits at a bound that agrees with the sign of its reduced
    /// cost.
    fn is_dual_feasible(&self) -> bool {
        self.nonbasic.iter().zip(&self.d).all(|(&j, d)| {
            let bounds = &self.bounds[j];
            if is_fixed(bounds) {
                return true;
            }

            let lower = &bounds[BoundDirection::Lower];
            let upper = &bounds[BoundDirection::Upper];
            if lower.is_at(&self.x[j]) && d < &F::zero() {
                false
            } else if upper.is_at(&self.x[j]) && d > &F::zero() {
                false
            } else {
                !(lower.is_infinite() && upper.is_infinite() && !d.is_zero())
            }
        })
    }

    /// The main loop of the dual simplex method.
    fn iterate(&mut self, phase_one: bool) -> Result<Run, SolverError> {
        let m = self.num_rows();
        let mut previous_objective = None;
        let mut nr_repeated = 0;
        let mut nr_changed = 0;
        let mut anti_cycling = false;
        let mut nr_iterations = 0;

        loop {
            let objective = self.objective_value();
            if !phase_one {
                if let BoundValue::Finite(bound) = &self.infeasibility_bound {
                    if &objective >= bound {
                        log::info!("objective value {} reached the infeasibility bound {}", objective, bound);
                        return Ok(Run::Done(OptimizationResult::CutOff));
                    }
                }
            }

            if previous_objective.as_ref() == Some(&objective) {
                nr_repeated += 1;
                if nr_repeated > self.config.cycle_threshold && !anti_cycling {
                    log::debug!("objective value repeated {} times, switching to Bland's rule", nr_repeated);
                    anti_cycling = true;
                }
            } else {
                nr_repeated = 0;
                if anti_cycling {
                    nr_changed += 1;
                    if nr_changed > self.config.cycle_threshold {
                        log::debug!("objective value changing again, switching to steepest edge");
                        anti_cycling = false;
                        nr_changed = 0;
                    }
                }
            }
            if !self.perturbed && nr_repeated > self.config.perturbation_threshold {
                return Ok(Run::Perturb);
            }
            previous_objective = Some(objective);

            let use_steepest_edge = self.steepest_edge_weights.is_some() && !anti_cycling;
            let leaving = match self.select_leaving(use_steepest_edge) {
                Some(leaving) => leaving,
                None => return Ok(Run::Done(OptimizationResult::Optimal)),
            };
            log::trace!(
                "iteration {}: variable {} leaves from row {}", nr_iterations, leaving.variable, leaving.row,
            );

            let factorization = self.factorization()?;
            let mut rho = vec![F::zero(); m];
            rho[leaving.row] = F::one();
            factorization.btran(&mut rho);

            let computing_tau = self.steepest_edge_weights.is_some();
            if computing_tau {
                self.steepest_edge.get_or_insert_with(SteepestEdgeHelper::new)
                    .submit(&factorization, rho.clone());
            }
            let alpha_r = self.multiply.multiply(&self.matrix, &self.nonbasic_position, rho);

            let entering = match self.select_entering(&leaving, &alpha_r, anti_cycling) {
                Some(entering) => entering,
                None => {
                    if computing_tau {
                        self.wait_for_tau();
                    }
                    log::info!("no variable can enter for leaving variable {}, dual is unbounded", leaving.variable);
                    self.last_leaving = Some(leaving.variable);
                    return Ok(Run::Done(OptimizationResult::Infeasible));
                }
            };
            let s = entering.position;
            let q = self.nonbasic[s];
            log::trace!("variable {} enters after {} bound flips", q, entering.flips.len());

            let mut alpha_q = vec![F::zero(); m];
            self.add_column(q, &F::one(), &mut alpha_q);
            let spike = factorization.ftran_with_spike(&mut alpha_q);

            // Dual update
            let theta_dual = self.d[s].clone() / &alpha_r[s];
            for (d, alpha) in self.d.iter_mut().zip(&alpha_r) {
                if !alpha.is_zero() {
                    *d -= &(theta_dual.clone() * alpha);
                }
            }
            self.d[s] = -theta_dual;

            // Bound flips
            if !entering.flips.is_empty() {
                let mut correction = vec![F::zero(); m];
                for (j, difference) in &entering.flips {
                    self.x[*j] += difference;
                    self.add_column(*j, difference, &mut correction);
                }
                factorization.ftran(&mut correction);
                for (i, value) in correction.into_iter().enumerate() {
                    if !value.is_zero() {
                        self.x[self.basic[i]] -= &value;
                    }
                }
            }

            // Primal update
            let r = leaving.row;
            let p = leaving.variable;
            let theta_primal = (self.x[p].clone() - &self.leaving_target(&leaving)) / &alpha_q[r];
            for (i, alpha) in alpha_q.iter().enumerate() {
                if !alpha.is_zero() {
                    self.x[self.basic[i]] -= &(theta_primal.clone() * alpha);
                }
            }
            self.x[q] += &theta_primal;

            if computing_tau {
                let tau = self.wait_for_tau();
                self.update_weights(r, &alpha_q, &tau);
            }
            drop(factorization);

            // Basis change
            self.basic[r] = q;
            self.basic_position[q] = Some(r);
            self.basic_position[p] = None;
            self.nonbasic[s] = p;
            let nonbasic_position = Arc::make_mut(&mut self.nonbasic_position);
            nonbasic_position[p] = Some(s);
            nonbasic_position[q] = None;

            self.updates_since_refactor += 1;
            if self.updates_since_refactor % self.config.refactor_interval == 0 {
                self.refactor()?;
            } else {
                let updated = match self.factorization.as_mut() {
                    Some(factorization) => Arc::make_mut(factorization).change_basis(r, spike),
                    None => Err(SolverError::SingularBasis { remaining: m }),
                };
                if let Err(error) = updated {
                    log::debug!("updating the factorization failed, refactorizing: {}", error);
                    self.refactor()?;
                }
            }

            nr_iterations += 1;
            if self.steepest_edge_weights.is_none()
                && self.config.steepest_edge_recompute_factor * nr_iterations > m {
                log::debug!("computing steepest edge weights after {} iterations", nr_iterations);
                let factorization = self.factorization()?;
                self.steepest_edge_weights = Some(
                    recompute_weights(&factorization, self.config.steepest_edge_threads),
                );
            }
        }
    }

    /// Receive `tau = B^-1 rho_r` from the helper thread.
    fn wait_for_tau(&mut self) -> Vec<F> {
        match self.steepest_edge.as_mut() {
            Some(helper) => helper.wait(),
            None => Vec::new(),
        }
    }

    /// Compute the values of the basic variables from those of the nonbasic variables.
    pub(super) fn compute_primal(&mut self) -> Result<(), SolverError> {
        let factorization = self.factorization()?;

        let mut rhs = vec![F::zero(); self.num_rows()];
        for &j in &self.nonbasic {
            if !self.x[j].is_zero() {
                let factor = -self.x[j].clone();
                self.add_column(j, &factor, &mut rhs);
            }
        }
        factorization.ftran(&mut rhs);
        for (i, value) in rhs.into_iter().enumerate() {
            self.x[self.basic[i]] = value;
        }

        Ok(())
    }

    /// Compute the reduced costs `d_N = c_N - N^T B^-T c_B`.
    pub(super) fn compute_dual(&mut self) -> Result<(), SolverError> {
        let factorization = self.factorization()?;
        let n = self.num_cols();

        let mut y = self.basic.iter()
            .map(|&j| if j < n { self.objective[j].clone() } else { F::zero() })
            .collect::<Vec<_>>();
        factorization.btran(&mut y);
        let product = self.multiply.multiply(&self.matrix, &self.nonbasic_position, y);

        self.d = self.nonbasic.iter().zip(product)
            .map(|(&j, value)| if j < n { self.objective[j].clone() - &value } else { -value })
            .collect();

        Ok(())
    }

    /// The factorization of the current basis, computing it if necessary.
    pub(super) fn factorization(&mut self) -> Result<Arc<LUDecomposition<F>>, SolverError> {
        if self.factorization.is_none() {
            self.refactor()?;
        }

        self.factorization.clone().ok_or(SolverError::SingularBasis { remaining: self.num_rows() })
    }

    /// Factorize the basis matrix from scratch.
    ///
    /// The basis positions are reordered to match the factorization, the steepest edge weights
    /// move along with their variables.
    pub(super) fn refactor(&mut self) -> Result<(), SolverError> {
        let columns = self.basic.iter().map(|&j| self.column(j)).collect();
        let (factorization, order) = LUDecomposition::decompose(
            columns,
            self.config.markowitz_search_limit,
        )?;

        self.basic = order.iter().map(|&k| self.basic[k]).collect();
        for (i, &j) in self.basic.iter().enumerate() {
            self.basic_position[j] = Some(i);
        }
        if let Some(weights) = self.steepest_edge_weights.as_mut() {
            *weights = order.iter().map(|&k| weights[k].clone()).collect();
        }
        log::debug!(
            "factorized basis after {} updates, {} values in U",
            self.updates_since_refactor, factorization.upper_nnz(),
        );
        self.factorization = Some(Arc::new(factorization));
        self.updates_since_refactor = 0;

        Ok(())
    }
}

/// Bounds under which every basis is dual feasible after moving boxed variables.
///
/// Finite sides are replaced by zero, infinite sides by one in the same direction.
fn surrogate_bounds<F: Field>(original: &Bounds<F>) -> Bounds<F> {
    let surrogate = |direction: BoundDirection, unit: F| match original[direction] {
        BoundValue::Finite(_) => BoundValue::Finite(F::zero()),
        BoundValue::Infinite => BoundValue::Finite(unit),
    };

    bounds(
        surrogate(BoundDirection::Lower, -F::one()),
        surrogate(BoundDirection::Upper, F::one()),
    )
}
