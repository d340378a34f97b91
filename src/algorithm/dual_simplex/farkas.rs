//! # Farkas certificates
//!
//! A vector `y` proves that `lower <= A x <= upper, l <= x <= u` has no solution when every `x`
//! within its bounds has `y^T A x` strictly outside of the range that the row sides allow.
use crate::algorithm::dual_simplex::Solver;
use crate::data::linear_program::elements::BoundDirection;
use crate::data::number_types::traits::Field;
use crate::error::SolverError;

impl<F: Field> Solver<F> {
    /// Proof of infeasibility after `opt` returned `Infeasible`.
    ///
    /// Derived from the row of the basis inverse of the variable that couldn't leave the basis, and
    /// cached until the problem is modified. If the infeasibility was found in the bounds of a
    /// single variable, the proof is the zero vector.
    ///
    /// # Return value
    ///
    /// A vector with a value for each constraint, or `None` if the last solve didn't prove
    /// infeasibility.
    pub fn farkas_infeasibility_proof(&mut self) -> Result<Option<Vec<F>>, SolverError> {
        if let Some(proof) = &self.farkas_proof {
            return Ok(Some(proof.clone()));
        }
        let Some(variable) = self.last_leaving else {
            return Ok(None);
        };
        let Some(row) = self.basic_position[variable] else {
            return Ok(None);
        };

        let below_lower = self.bounds[variable][BoundDirection::Lower].finite()
            .is_some_and(|lower| &self.x[variable] < lower);
        let mut ray = vec![F::zero(); self.num_rows()];
        ray[row] = if below_lower { -F::one() } else { F::one() };
        self.factorization()?.btran(&mut ray);

        self.farkas_proof = Some(ray.clone());
        Ok(Some(ray))
    }

    /// Whether a vector proves that the problem is infeasible under the current bounds.
    ///
    /// With `d = -A^T y`, every variable with a positive value in `d` needs a finite lower bound,
    /// every variable with a negative value needs a finite upper bound, and similarly for the
    /// sides of the rows that `y` uses. The sum of the bound contributions should be positive.
    pub fn is_farkas_certificate(&self, y: &[F]) -> bool {
        let (m, n) = (self.num_rows(), self.num_cols());
        if y.len() != m {
            return false;
        }

        let mut d = vec![F::zero(); n];
        for (i, factor) in y.iter().enumerate() {
            if !factor.is_zero() {
                for (j, value) in self.matrix.row(i) {
                    d[j] -= &(value.clone() * factor);
                }
            }
        }

        let mut total = F::zero();
        let contributions = d.iter().enumerate()
            .map(|(j, value)| (j, value.clone()))
            .chain(y.iter().enumerate().map(|(i, value)| (n + i, -value.clone())));
        for (j, value) in contributions {
            let direction = if value > F::zero() {
                BoundDirection::Lower
            } else if value < F::zero() {
                BoundDirection::Upper
            } else {
                continue;
            };
            match self.bounds[j][direction].finite() {
                Some(bound) => total += &(value * bound),
                None => return false,
            }
        }

        total > F::zero()
    }

    /// Check the inexact ray guess against the current basis.
    ///
    /// The guess is expressed in the basis, rounded to the nearest integers where it is close to
    /// them, and transformed back. On success, the result is the cached proof.
    pub(super) fn check_farkas_guess(&mut self) -> Result<bool, SolverError> {
        let Some(guess) = self.farkas_guess.clone() else {
            return Ok(false);
        };
        let limit = self.config.farkas_guess_magnitude_limit;
        if guess.len() != self.num_rows() || guess.iter().any(|value| value.is_nan() || value.abs() > limit) {
            log::debug!("rejecting infeasibility ray guess with invalid values");
            return Ok(false);
        }
        let (Some(ray), Some(tolerance), Some(half)) = (
            guess.iter().map(|&value| F::from_f64(value)).collect::<Option<Vec<_>>>(),
            F::from_f64(self.config.farkas_rounding_tolerance),
            F::from_f64(0.5),
        ) else {
            log::debug!("infeasibility ray guess can't be represented exactly");
            return Ok(false);
        };

        let n = self.num_cols();
        let mut y = self.basic.iter()
            .map(|&j| {
                let value = if j < n {
                    self.matrix.column(j)
                        .map(|(i, coefficient)| coefficient.clone() * &ray[i])
                        .sum()
                } else {
                    ray[j - n].clone()
                };
                let nearest = (value.clone() + &half).floor();
                if (value.clone() - &nearest).abs() < tolerance { nearest } else { value }
            })
            .collect::<Vec<_>>();
        if y.iter().all(|value| value.abs() <= tolerance) {
            log::debug!("infeasibility ray guess is zero on the basis");
            return Ok(false);
        }

        self.factorization()?.btran(&mut y);
        if self.is_farkas_certificate(&y) {
            self.farkas_proof = Some(y);
            Ok(true)
        } else {
            log::debug!("infeasibility ray guess is not a certificate");
            Ok(false)
        }
    }
}
