//! # Steepest edge reference weights
//!
//! The weight of a basic row `r` is the squared norm of row `r` of the basis inverse. Updating the
//! weights after a pivot requires `B^-1 rho_r`, which is computed on a helper thread while the
//! calling thread computes the pivot row and does the ratio test.
use std::sync::Arc;

use rayon::prelude::*;

use crate::algorithm::lower_upper::LUDecomposition;
use crate::algorithm::parallel::Helper;
use crate::data::number_types::traits::Field;

type TauJob<F> = (Arc<LUDecomposition<F>>, Vec<F>);

/// Computes `tau = B^-1 rho` in the background.
pub struct SteepestEdgeHelper<F> {
    helper: Helper<TauJob<F>, Vec<F>>,
}

impl<F: Field> SteepestEdgeHelper<F> {
    pub fn new() -> Self {
        Self {
            helper: Helper::spawn("steepest-edge", |(factorization, mut rho): TauJob<F>| {
                factorization.ftran(&mut rho);
                rho
            }),
        }
    }

    /// Start computing `B^-1 rho`.
    ///
    /// The factorization may not be modified until `wait` has returned.
    pub fn submit(&mut self, factorization: &Arc<LUDecomposition<F>>, rho: Vec<F>) {
        self.helper.submit((Arc::clone(factorization), rho));
    }

    /// Wait for the result of the last `submit`.
    pub fn wait(&mut self) -> Vec<F> {
        self.helper.wait()
    }
}

impl<F: Field> Default for SteepestEdgeHelper<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Compute all weights from scratch.
///
/// The `m` solves are independent and are spread over a thread pool of the requested size. If
/// that pool can't be created, they are done on the calling thread.
pub fn recompute_weights<F: Field>(factorization: &LUDecomposition<F>, nr_threads: usize) -> Vec<F> {
    let m = factorization.m();
    let weight = |i: usize| {
        let mut row = vec![F::zero(); m];
        row[i] = F::one();
        factorization.btran(&mut row);
        row.into_iter()
            .filter(|value| !value.is_zero())
            .map(|value| value.clone() * &value)
            .sum::<F>()
    };

    match rayon::ThreadPoolBuilder::new().num_threads(nr_threads).build() {
        Ok(pool) => pool.install(|| (0..m).into_par_iter().map(weight).collect()),
        Err(error) => {
            log::warn!("could not build thread pool, computing weights sequentially: {}", error);
            (0..m).map(weight).collect()
        }
    }
}
