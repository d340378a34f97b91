//! # LU Decomposition
//!
//! Gaussian elimination on a sparse basis matrix, choosing pivots in the order that keeps the
//! factors sparse.
use std::collections::{BTreeMap, BTreeSet};
use std::mem;

use crate::algorithm::lower_upper::decomposition::index_list::CountBuckets;
use crate::algorithm::lower_upper::decomposition::pivoting::{Markowitz, Pivot};
use crate::algorithm::lower_upper::eta_file::EtaFile;
use crate::algorithm::lower_upper::LUDecomposition;
use crate::data::number_types::traits::Field;
use crate::error::SolverError;

mod index_list;
mod pivoting;

/// The part of the matrix that was not yet pivoted on.
///
/// Active rows only contain values in active columns, because all values in a pivot column are
/// eliminated. The column sets only contain active rows, because a pivot row is removed from them.
/// The lengths of these collections are therefore the nonzero counts of the active submatrix.
pub(super) struct ActiveMatrix<F> {
    rows: Vec<BTreeMap<usize, F>>,
    columns: Vec<BTreeSet<usize>>,
    /// Active rows, grouped by their nonzero count.
    active_rows: CountBuckets,
    /// Active columns, grouped by their nonzero count.
    active_columns: CountBuckets,
}

impl<F> ActiveMatrix<F> {
    /// Build the row major representation from the basis columns.
    pub fn new(columns: Vec<Vec<(usize, F)>>) -> Self {
        let m = columns.len();
        let mut rows = (0..m).map(|_| BTreeMap::new()).collect::<Vec<_>>();
        let mut column_sets = vec![BTreeSet::new(); m];
        for (j, column) in columns.into_iter().enumerate() {
            for (i, value) in column {
                column_sets[j].insert(i);
                rows[i].insert(j, value);
            }
        }

        let active_rows = CountBuckets::new(rows.iter().map(BTreeMap::len), m);
        let active_columns = CountBuckets::new(column_sets.iter().map(BTreeSet::len), m);

        Self {
            rows,
            columns: column_sets,
            active_rows,
            active_columns,
        }
    }

    pub fn row_count(&self, row: usize) -> usize {
        self.rows[row].len()
    }

    pub fn column_count(&self, column: usize) -> usize {
        self.columns[column].len()
    }

    pub fn active_rows_in(&self, column: usize) -> impl Iterator<Item=usize> + '_ {
        self.columns[column].iter().copied()
    }

    pub fn columns_in(&self, row: usize) -> impl Iterator<Item=usize> + '_ {
        self.rows[row].keys().copied()
    }

    /// Active rows with exactly `count` nonzeros.
    pub fn rows_with_count(&self, count: usize) -> impl Iterator<Item=usize> + '_ {
        self.active_rows.iter(count)
    }

    /// Active columns with exactly `count` nonzeros.
    pub fn columns_with_count(&self, count: usize) -> impl Iterator<Item=usize> + '_ {
        self.active_columns.iter(count)
    }
}

impl<F: Field> ActiveMatrix<F> {
    /// Eliminate all other values in the pivot column.
    ///
    /// # Return value
    ///
    /// The elimination as an eta file, `None` if the pivot was the only value in its column.
    fn pivot(&mut self, Pivot { row: p, column: q }: Pivot) -> Option<EtaFile<F>> {
        debug_assert!(self.active_rows.contains(p) && self.active_columns.contains(q));

        self.active_rows.remove(p);
        self.active_columns.remove(q);
        for &j in self.rows[p].keys() {
            self.columns[j].remove(&p);
        }

        let pivot_value = self.rows[p][&q].clone();
        let pivot_row = self.rows[p].iter()
            .filter(|&(&j, _)| j != q)
            .map(|(&j, value)| (j, value.clone()))
            .collect::<Vec<_>>();

        let targets = mem::take(&mut self.columns[q]);
        let mut multipliers = Vec::with_capacity(targets.len());
        for i in targets {
            let value = match self.rows[i].remove(&q) {
                Some(value) => value,
                None => continue,
            };
            let ratio = -value / &pivot_value;

            for (j, pivot_row_value) in &pivot_row {
                let difference = ratio.clone() * pivot_row_value;
                match self.rows[i].get_mut(j) {
                    Some(existing) => {
                        *existing += &difference;
                        if existing.is_zero() {
                            self.rows[i].remove(j);
                            self.columns[*j].remove(&i);
                        }
                    }
                    None => {
                        self.rows[i].insert(*j, difference);
                        self.columns[*j].insert(i);
                    }
                }
            }

            self.active_rows.update(i, self.rows[i].len());
            multipliers.push((i, ratio));
        }
        for (j, _) in &pivot_row {
            self.active_columns.update(*j, self.columns[*j].len());
        }

        if multipliers.is_empty() {
            None
        } else {
            Some(EtaFile::new(multipliers, p))
        }
    }
}

impl<F: Field> LUDecomposition<F> {
    /// Compute the factorization `E B = U` of the basis matrix.
    ///
    /// `E` is a product of eliminations and `U` is triangular after a symmetric permutation.
    /// Every pivot row is assigned the column that it was pivoted on, which means that the basis
    /// columns need to be reordered for `U` to have its diagonal on the diagonal.
    ///
    /// # Arguments
    ///
    /// * `columns`: Sparse basis columns, with row indices and values.
    /// * `search_limit`: Number of candidates the pivot search considers at most.
    ///
    /// # Return value
    ///
    /// The decomposition and the reordering of the columns: the column at index `i` of the
    /// returned vector should become the `i`-th basis column.
    pub fn decompose(
        columns: Vec<Vec<(usize, F)>>,
        search_limit: usize,
    ) -> Result<(Self, Vec<usize>), SolverError> {
        let m = columns.len();
        let rule = Markowitz::new(search_limit);
        let mut active = ActiveMatrix::new(columns);

        let mut permutation = Vec::with_capacity(m);
        let mut column_order = vec![0; m];
        let mut pivot_row_of_column = vec![0; m];
        let mut factor_etas = Vec::new();
        while !active.active_rows.is_empty() {
            let pivot = rule.choose_pivot(&active)
                .ok_or(SolverError::SingularBasis { remaining: active.active_rows.len() })?;

            permutation.push(pivot.row);
            column_order[pivot.row] = pivot.column;
            pivot_row_of_column[pivot.column] = pivot.row;
            if let Some(eta) = active.pivot(pivot) {
                factor_etas.push(eta);
            }
        }

        // Rename the columns to the rows they were pivoted on, placing the diagonal first
        let mut upper_rows = Vec::with_capacity(m);
        let mut upper_columns = vec![Vec::new(); m];
        for (p, row) in active.rows.into_iter().enumerate() {
            let q = column_order[p];
            let mut new_row = Vec::with_capacity(row.len());
            let mut off_diagonal = Vec::with_capacity(row.len());
            for (j, value) in row {
                if j == q {
                    new_row.insert(0, (p, value));
                } else {
                    off_diagonal.push((pivot_row_of_column[j], value));
                }
            }
            new_row.extend(off_diagonal);
            upper_rows.push(new_row);
        }
        for (i, row) in upper_rows.iter().enumerate() {
            upper_columns[i].push((i, row[0].1.clone()));
        }
        for (i, row) in upper_rows.iter().enumerate() {
            for (j, value) in &row[1..] {
                upper_columns[*j].push((i, value.clone()));
            }
        }

        let mut inverse_permutation = vec![0; m];
        for (k, &p) in permutation.iter().enumerate() {
            inverse_permutation[p] = k;
        }

        Ok((
            Self {
                upper_rows,
                upper_columns,
                permutation,
                inverse_permutation,
                factor_etas,
                update_etas: Vec::new(),
            },
            column_order,
        ))
    }
}
