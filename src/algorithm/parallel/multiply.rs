//! # Row vector times nonbasic columns
//!
//! Computing `y^T A_N`, both for the reduced costs and for the pivot row, is the most expensive
//! step of an iteration that doesn't solve a linear system. The rows of `A` are divided between
//! the calling thread and a helper in small chunks, claimed through a shared cursor.
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::algorithm::parallel::Helper;
use crate::data::linear_algebra::matrix::ConstraintMatrix;
use crate::data::number_types::traits::Field;

/// Number of rows claimed at once.
const CHUNK_SIZE: usize = 16;

/// Everything needed to compute a part of the product.
///
/// The data is only read, the calling thread mutates it after all clones of a job have been
/// dropped.
pub struct MultiplyJob<F> {
    matrix: Arc<ConstraintMatrix<F>>,
    /// For every variable, structural and slack, its position among the nonbasic variables.
    nonbasic_position: Arc<Vec<Option<usize>>>,
    vector: Arc<Vec<F>>,
    next_row: Arc<AtomicUsize>,
}

impl<F> Clone for MultiplyJob<F> {
    fn clone(&self) -> Self {
        Self {
            matrix: Arc::clone(&self.matrix),
            nonbasic_position: Arc::clone(&self.nonbasic_position),
            vector: Arc::clone(&self.vector),
            next_row: Arc::clone(&self.next_row),
        }
    }
}

impl<F: Field> MultiplyJob<F> {
    /// Accumulate the contribution of the rows that this thread manages to claim.
    fn accumulate(&self) -> Vec<F> {
        let m = self.matrix.nr_rows();
        let n = self.matrix.nr_columns();
        let mut result = vec![F::zero(); self.nonbasic_position.len() - m];

        loop {
            let start = self.next_row.fetch_add(CHUNK_SIZE, Ordering::Relaxed);
            if start >= m {
                break;
            }

            for i in start..(start + CHUNK_SIZE).min(m) {
                let factor = &self.vector[i];
                if factor.is_zero() {
                    continue;
                }

                for (j, value) in self.matrix.row(i) {
                    if let Some(position) = self.nonbasic_position[j] {
                        result[position] += &(value.clone() * factor);
                    }
                }
                // The slack column of this row is a unit vector
                if let Some(position) = self.nonbasic_position[n + i] {
                    result[position] += factor;
                }
            }
        }

        result
    }
}

/// Computes `y^T [A I]` restricted to the nonbasic columns, using one helper thread.
pub struct ParallelMultiply<F> {
    helper: Helper<MultiplyJob<F>, Vec<F>>,
}

impl<F: Field> ParallelMultiply<F> {
    pub fn new() -> Self {
        Self {
            helper: Helper::spawn("multiply", |job: MultiplyJob<F>| job.accumulate()),
        }
    }

    /// Multiply a row vector with the nonbasic columns.
    ///
    /// # Arguments
    ///
    /// * `matrix`: Constraint matrix with `m` rows.
    /// * `nonbasic_position`: For each of the `n + m` variables, the position among the nonbasic
    /// variables if it is nonbasic.
    /// * `vector`: Row vector of length `m`.
    ///
    /// # Return value
    ///
    /// A vector of length `n`, indexed by nonbasic position.
    pub fn multiply(
        &mut self,
        matrix: &Arc<ConstraintMatrix<F>>,
        nonbasic_position: &Arc<Vec<Option<usize>>>,
        vector: Vec<F>,
    ) -> Vec<F> {
        debug_assert_eq!(vector.len(), matrix.nr_rows());
        debug_assert_eq!(nonbasic_position.len(), matrix.nr_rows() + matrix.nr_columns());
        debug_assert_eq!(
            nonbasic_position.iter().filter(|position| position.is_some()).count(),
            matrix.nr_columns(),
        );

        let job = MultiplyJob {
            matrix: Arc::clone(matrix),
            nonbasic_position: Arc::clone(nonbasic_position),
            vector: Arc::new(vector),
            next_row: Arc::new(AtomicUsize::new(0)),
        };

        self.helper.submit(job.clone());
        let mut result = job.accumulate();
        let other = self.helper.wait();
        for (total, part) in result.iter_mut().zip(other) {
            if !part.is_zero() {
                *total += &part;
            }
        }

        result
    }
}

impl<F: Field> Default for ParallelMultiply<F> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use std::sync::Arc;

    use num_traits::FromPrimitive;

    use crate::R64;
    use crate::algorithm::parallel::multiply::ParallelMultiply;
    use crate::data::linear_algebra::matrix::ConstraintMatrix;
    use crate::data::number_types::rational::Rational64;

    #[test]
    fn small() {
        // [[1, 2], [0, 3]], x_0 and s_1 basic, s_0 and x_1 at nonbasic positions 0 and 1
        let matrix = Arc::new(ConstraintMatrix::new(
            vec![R64!(1), R64!(2), R64!(3)],
            vec![0, 1, 1],
            vec![0, 2, 3],
            2,
        ).unwrap());
        let positions = Arc::new(vec![None, Some(1), Some(0), None]);
        let mut multiply = ParallelMultiply::new();

        let result = multiply.multiply(&matrix, &positions, vec![R64!(1), R64!(-1)]);
        assert_eq!(result, vec![R64!(1), R64!(2 - 3)]);

        // Reusable
        let result = multiply.multiply(&matrix, &positions, vec![R64!(0), R64!(1, 3)]);
        assert_eq!(result, vec![R64!(0), R64!(1)]);
    }

    #[test]
    fn many_rows() {
        let m = 100;
        let values = (0..m).map(|i| R64!(i as i64)).collect::<Vec<_>>();
        let matrix = Arc::new(ConstraintMatrix::new(
            values,
            vec![0; m],
            (0..=m).collect(),
            1,
        ).unwrap());
        let mut positions = vec![Some(0)];
        positions.extend(vec![None; m]);
        let mut multiply = ParallelMultiply::new();

        let result = multiply.multiply(&matrix, &Arc::new(positions), vec![R64!(1); m]);
        assert_eq!(result, vec![R64!((0..m as i64).sum::<i64>())]);
    }
}
