//! # Forrest & Tomlin LU Update
//!
//! Updating the LU factorization without completely refactoring it.
//!
//! See the 1972 paper by Forrest and Tomlin.

use crate::algorithm::lower_upper::{LUDecomposition, Spike};
use crate::algorithm::lower_upper::eta_file::EtaFile;
use crate::data::number_types::traits::Field;
use crate::error::SolverError;

impl<F: Field> LUDecomposition<F> {
    /// Replace a basis column.
    ///
    /// The spike replaces the column of `U`, after which the row and column are moved to the end
    /// of the processing order. The values in the row that are now below the diagonal are
    /// eliminated using the rows after it, and that elimination is stored as a new eta file.
    ///
    /// # Arguments
    ///
    /// * `pivot`: Index of the basis column that leaves.
    /// * `spike`: Result of `ftran_with_spike` on the entering column.
    ///
    /// # Errors
    ///
    /// If the new basis is singular. The decomposition should be discarded in that case.
    pub fn change_basis(&mut self, pivot: usize, Spike(spike): Spike<F>) -> Result<(), SolverError> {
        let m = self.m();
        debug_assert!(pivot < m);

        // Remove the old column from the rows
        for (i, _) in &self.upper_columns[pivot][1..] {
            remove_entry(&mut self.upper_rows[*i], pivot);
        }

        // Insert the spike as the new column
        let mut new_column = vec![(pivot, F::zero())];
        let mut row = vec![F::zero(); m];
        for (i, value) in spike {
            if i == pivot {
                row[pivot] = value.clone();
                new_column[0].1 = value;
            } else {
                self.upper_rows[i].push((pivot, value.clone()));
                new_column.push((i, value));
            }
        }

        // Take out the rest of the row, it will be eliminated
        for (j, value) in self.upper_rows[pivot].drain(1..) {
            remove_entry(&mut self.upper_columns[j], pivot);
            row[j] = value;
        }

        let position = self.inverse_permutation[pivot];
        let mut multipliers = Vec::new();
        for k in (position + 1)..m {
            let i = self.permutation[k];
            if !row[i].is_zero() {
                let ratio = -row[i].clone() / &self.upper_rows[i][0].1;
                row[i] = F::zero();
                for (j, value) in &self.upper_rows[i][1..] {
                    row[*j] += &(ratio.clone() * value);
                }
                multipliers.push((i, ratio));
            }
        }

        let diagonal = row.swap_remove(pivot);
        if diagonal.is_zero() {
            return Err(SolverError::SingularBasis { remaining: 1 });
        }
        self.upper_rows[pivot] = vec![(pivot, diagonal.clone())];
        new_column[0].1 = diagonal;
        self.upper_columns[pivot] = new_column;

        if !multipliers.is_empty() {
            self.update_etas.push(EtaFile::new(multipliers, pivot));
        }

        self.permutation.remove(position);
        self.permutation.push(pivot);
        for k in position..m {
            self.inverse_permutation[self.permutation[k]] = k;
        }

        Ok(())
    }
}

/// Remove the off-diagonal value with the given index from a row or column of `U`.
fn remove_entry<F>(line: &mut Vec<(usize, F)>, index: usize) {
    if let Some(data_index) = line[1..].iter().position(|&(i, _)| i == index) {
        // The diagonal stays in front
        line.swap_remove(1 + data_index);
    }
}

#[cfg(test)]
mod test {
    use num_traits::FromPrimitive;

    use crate::R64;
    use crate::algorithm::lower_upper::LUDecomposition;
    use crate::algorithm::lower_upper::test::{assert_inverse, factorize, matrix_4, unit};
    use crate::data::number_types::rational::Rational64;
    use crate::error::SolverError;

    type T = Rational64;

    fn dense(column: &[(usize, T)], m: usize) -> Vec<T> {
        let mut result = vec![R64!(0); m];
        for (i, value) in column {
            result[*i] = *value;
        }
        result
    }

    fn replace(lu: &mut LUDecomposition<T>, columns: &mut [Vec<(usize, T)>], pivot: usize, new: Vec<(usize, T)>) {
        let mut work = dense(&new, columns.len());
        let spike = lu.ftran_with_spike(&mut work);
        lu.change_basis(pivot, spike).unwrap();
        columns[pivot] = new;
    }

    #[test]
    fn single_update() {
        let (mut lu, mut columns) = factorize(matrix_4());
        replace(&mut lu, &mut columns, 1, vec![(1, R64!(1)), (2, R64!(-3))]);
        assert_eq!(lu.nr_updates(), 1);
        assert_inverse(&lu, &columns);
    }

    #[test]
    fn consecutive_updates() {
        let (mut lu, mut columns) = factorize(matrix_4());
        replace(&mut lu, &mut columns, 0, vec![(0, R64!(1)), (3, R64!(2))]);
        assert_inverse(&lu, &columns);
        replace(&mut lu, &mut columns, 2, vec![(0, R64!(3)), (1, R64!(1)), (2, R64!(1, 3))]);
        assert_inverse(&lu, &columns);
        replace(&mut lu, &mut columns, 0, vec![(2, R64!(7))]);
        assert_inverse(&lu, &columns);
        replace(&mut lu, &mut columns, 3, vec![(0, R64!(1)), (1, R64!(1)), (2, R64!(1)), (3, R64!(1))]);
        assert_inverse(&lu, &columns);
    }

    #[test]
    fn equals_fresh_factorization() {
        let (mut lu, mut columns) = factorize(matrix_4());
        replace(&mut lu, &mut columns, 3, vec![(1, R64!(2)), (3, R64!(-1))]);
        replace(&mut lu, &mut columns, 1, vec![(0, R64!(5)), (2, R64!(1))]);

        let (fresh, order) = LUDecomposition::decompose(columns.clone(), 25).unwrap();
        for i in 0..4 {
            let mut updated_solution = unit(i, 4);
            lu.ftran(&mut updated_solution);
            let mut fresh_solution = unit(i, 4);
            fresh.ftran(&mut fresh_solution);
            for (k, &j) in order.iter().enumerate() {
                assert_eq!(fresh_solution[k], updated_solution[j]);
            }
        }
    }

    #[test]
    fn identity_update() {
        let columns = (0..3).map(|i| vec![(i, R64!(1))]).collect();
        let (mut lu, mut columns) = factorize(columns);
        replace(&mut lu, &mut columns, 0, vec![(0, R64!(2)), (1, R64!(1)), (2, R64!(1))]);
        assert_inverse(&lu, &columns);
        replace(&mut lu, &mut columns, 2, vec![(0, R64!(1)), (2, R64!(3))]);
        assert_inverse(&lu, &columns);
    }

    #[test]
    fn singular() {
        let (mut lu, columns) = factorize(matrix_4());
        let mut work = dense(&columns[0], 4);
        let spike = lu.ftran_with_spike(&mut work);
        assert_eq!(lu.change_basis(2, spike), Err(SolverError::SingularBasis { remaining: 1 }));
    }
}
