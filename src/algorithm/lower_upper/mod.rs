//! # LU decomposition
//!
//! Factorization of the basis matrix that supports solving linear systems with the basis and its
//! transpose, as well as cheap updates when a single basis column is replaced.
use std::fmt;
use std::fmt::Display;

use crate::algorithm::lower_upper::eta_file::EtaFile;
use crate::data::number_types::traits::Field;

mod decomposition;
mod eta_file;
mod forrest_tomlin_update;

/// Decompose a basis matrix `B` into `R E B = U` where
///
/// * `E` is the product of the eliminations done while factorizing
/// * `R` is the product of the eliminations done while updating
/// * `U` is upper triangular after a symmetric permutation
///
/// Rows and columns of `U` share their indices, the value `(i, i)` is the diagonal. The order in
/// which rows and columns are processed is kept in `permutation`: a row `i` only has values in
/// columns that come at or after `i` in that order.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct LUDecomposition<F> {
    /// Upper triangular matrix `U`, row major.
    ///
    /// The diagonal value is the first element of each row, the others are not sorted.
    upper_rows: Vec<Vec<(usize, F)>>,
    /// Upper triangular matrix `U`, column major.
    ///
    /// The diagonal value is the first element of each column, the others are not sorted.
    upper_columns: Vec<Vec<(usize, F)>>,
    /// Order in which the diagonal entries are processed when solving with `U'`.
    permutation: Vec<usize>,
    /// Position of each index in `permutation`.
    inverse_permutation: Vec<usize>,
    /// Eliminations that make up `E`, in the order they were applied to `B`.
    factor_etas: Vec<EtaFile<F>>,
    /// Eliminations that make up `R`, in the order they were applied.
    update_etas: Vec<EtaFile<F>>,
}

/// The transformed entering column before the final triangular solve.
///
/// After a basis change, this is the column that replaces the leaving column in `U`.
#[derive(Eq, PartialEq, Clone, Debug)]
pub struct Spike<F>(Vec<(usize, F)>);

impl<F: Field> LUDecomposition<F> {
    /// Solve `B x = b` in place.
    pub fn ftran(&self, work: &mut [F]) {
        self.apply_etas(work);
        self.solve_upper(work);
    }

    /// Solve `B x = b` in place and keep the intermediate result needed to update the
    /// factorization when `b` enters the basis.
    pub fn ftran_with_spike(&self, work: &mut [F]) -> Spike<F> {
        self.apply_etas(work);
        let spike = work.iter().enumerate()
            .filter(|(_, value)| !value.is_zero())
            .map(|(i, value)| (i, value.clone()))
            .collect();
        self.solve_upper(work);

        Spike(spike)
    }

    /// Solve `B' y = c` in place.
    pub fn btran(&self, work: &mut [F]) {
        debug_assert_eq!(work.len(), self.m());

        for &j in &self.permutation {
            if !work[j].is_zero() {
                work[j] /= &self.upper_rows[j][0].1;
                let value = work[j].clone();
                for (column, coefficient) in &self.upper_rows[j][1..] {
                    work[*column] -= &(value.clone() * coefficient);
                }
            }
        }

        for eta in self.update_etas.iter().rev() {
            eta.scatter(work);
        }
        for eta in self.factor_etas.iter().rev() {
            eta.gather(work);
        }
    }

    /// Compute `R E b`.
    fn apply_etas(&self, work: &mut [F]) {
        debug_assert_eq!(work.len(), self.m());

        for eta in &self.factor_etas {
            eta.scatter(work);
        }
        for eta in &self.update_etas {
            eta.gather(work);
        }
    }

    /// Solve `U x = b` in place.
    fn solve_upper(&self, work: &mut [F]) {
        for &j in self.permutation.iter().rev() {
            if !work[j].is_zero() {
                work[j] /= &self.upper_columns[j][0].1;
                let value = work[j].clone();
                for (row, coefficient) in &self.upper_columns[j][1..] {
                    work[*row] -= &(value.clone() * coefficient);
                }
            }
        }
    }

    /// Size of the basis matrix.
    pub fn m(&self) -> usize {
        self.permutation.len()
    }

    /// Number of eliminations done while updating.
    pub fn nr_updates(&self) -> usize {
        self.update_etas.len()
    }

    /// Number of eliminations done while factorizing.
    pub fn nr_factor_etas(&self) -> usize {
        self.factor_etas.len()
    }

    /// Number of values stored in `U`.
    pub fn upper_nnz(&self) -> usize {
        self.upper_rows.iter().map(Vec::len).sum()
    }
}

impl<F: Field> Display for LUDecomposition<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = 10;

        writeln!(f, "Upper:")?;
        write!(f, "{:>width$} |", "")?;
        for &j in &self.permutation {
            write!(f, "{0:>width$}", j, width = width)?;
        }
        writeln!(f)?;
        f.write_str(&"-".repeat((1 + self.m()) * width + 2))?;
        writeln!(f)?;
        for &i in &self.permutation {
            write!(f, "{0:>width$} |", i, width = width)?;
            for &j in &self.permutation {
                let value = self.upper_rows[i].iter()
                    .find(|&&(column, _)| column == j)
                    .map_or_else(|| "0".to_string(), |(_, value)| value.to_string());
                write!(f, "{0:>width$}", value, width = width)?;
            }
            writeln!(f)?;
        }

        let nr_values = |etas: &[EtaFile<F>]| etas.iter().map(EtaFile::len).sum::<usize>();
        writeln!(f, "Factor eta files: {} ({} values)", self.factor_etas.len(), nr_values(&self.factor_etas))?;
        writeln!(f, "Update eta files: {} ({} values)", self.update_etas.len(), nr_values(&self.update_etas))
    }
}
