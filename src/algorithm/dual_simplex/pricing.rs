//! # Pricing
//!
//! Choosing the basic variable that leaves the basis. With dual steepest edge pricing, the
//! infeasibility of each basic variable is weighed against the norm of its row of the basis
//! inverse. Bland's rule takes the violating variable with the lowest index, which guarantees
//! termination on degenerate problems.

use crate::algorithm::dual_simplex::Solver;
use crate::data::linear_program::elements::BoundDirection;
use crate::data::number_types::traits::Field;

/// A basic variable that violates one of its bounds.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Leaving {
    /// Basis position.
    pub row: usize,
    pub variable: usize,
    /// Whether the value is below the lower bound, rather than above the upper bound.
    pub below_lower: bool,
}

impl<F: Field> Solver<F> {
    /// Choose the leaving variable.
    ///
    /// # Return value
    ///
    /// `None` if all basic variables are within their bounds, meaning that the basis is optimal.
    pub(super) fn select_leaving(&self, steepest_edge: bool) -> Option<Leaving> {
        let mut best: Option<(F, Leaving)> = None;

        for (i, &j) in self.basic.iter().enumerate() {
            let bounds = &self.bounds[j];
            let x = &self.x[j];
            let (infeasibility, below_lower) = match (
                bounds[BoundDirection::Lower].finite(),
                bounds[BoundDirection::Upper].finite(),
            ) {
                (Some(lower), _) if x < lower => (lower.clone() - x, true),
                (_, Some(upper)) if x > upper => (x.clone() - upper, false),
                _ => continue,
            };
            let candidate = Leaving { row: i, variable: j, below_lower };

            match (steepest_edge, &self.steepest_edge_weights) {
                (true, Some(weights)) => {
                    let score = infeasibility.clone() * &infeasibility / &weights[i];
                    if best.as_ref().is_none_or(|(best_score, _)| &score > best_score) {
                        best = Some((score, candidate));
                    }
                },
                _ => {
                    if best.as_ref().is_none_or(|(_, leaving)| j < leaving.variable) {
                        best = Some((infeasibility, candidate));
                    }
                },
            }
        }

        best.map(|(_, leaving)| leaving)
    }

    /// The bound that the leaving variable will attain.
    pub(super) fn leaving_target(&self, leaving: &Leaving) -> F {
        let direction = if leaving.below_lower { BoundDirection::Lower } else { BoundDirection::Upper };
        match self.bounds[leaving.variable][direction].finite() {
            Some(bound) => bound.clone(),
            None => self.x[leaving.variable].clone(),
        }
    }

    /// Update the steepest edge weights for a basis change.
    ///
    /// # Arguments
    ///
    /// * `r`: Basis position of the leaving variable.
    /// * `alpha_q`: The entering column in terms of the current basis, `B^-1 a_q`.
    /// * `tau`: `B^-1 rho_r`.
    pub(super) fn update_weights(&mut self, r: usize, alpha_q: &[F], tau: &[F]) {
        let Some(weights) = self.steepest_edge_weights.as_mut() else {
            return;
        };
        if tau.len() != weights.len() {
            self.steepest_edge_weights = None;
            return;
        }

        let pivot = &alpha_q[r];
        let beta_r = weights[r].clone();
        weights[r] = beta_r.clone() / &(pivot.clone() * pivot);

        let two = F::one() + &F::one();
        for (i, (weight, alpha)) in weights.iter_mut().zip(alpha_q).enumerate() {
            if i == r || alpha.is_zero() {
                continue;
            }
            let ratio = alpha.clone() / pivot;
            *weight -= &(two.clone() * &ratio * &tau[i]);
            *weight += &(ratio.clone() * &ratio * &beta_r);
        }
    }
}
