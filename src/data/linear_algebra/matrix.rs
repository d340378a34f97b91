//! # Constraint matrix
//!
//! The coefficients of the structural columns of the constraints are stored twice: row major for
//! computing the pivot row `rho^T A`, and column major for basis columns and right hand side
//! computations. The slack columns form an identity matrix and are never stored.
use std::fmt::{Display, Formatter};
use std::fmt;

use crate::data::number_types::traits::Field;
use crate::error::{expect_index, expect_len, SolverError};

/// Sparse constraint matrix in both compressed row and compressed column format.
///
/// Explicit zeros are never stored. The row major representation is leading, the column major one
/// is rebuilt from it after every change in the number of rows.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConstraintMatrix<F> {
    nr_columns: usize,

    row_values: Vec<F>,
    row_indices: Vec<usize>,
    row_starts: Vec<usize>,

    column_values: Vec<F>,
    column_indices: Vec<usize>,
    column_starts: Vec<usize>,
}

impl<F: Field> ConstraintMatrix<F> {
    /// Create a new matrix from compressed row data.
    ///
    /// # Arguments
    ///
    /// * `values`: Nonzero coefficients, row after row.
    /// * `column_indices`: Column of each value.
    /// * `row_starts`: Index in `values` where each row begins, followed by the total number of
    /// values.
    /// * `nr_columns`: Number of structural columns.
    ///
    /// # Return value
    ///
    /// The matrix, or an error if the three slices are not consistent with each other. Zero
    /// values are dropped.
    pub fn new(
        values: Vec<F>,
        column_indices: Vec<usize>,
        row_starts: Vec<usize>,
        nr_columns: usize,
    ) -> Result<Self, SolverError> {
        expect_len(&column_indices, values.len(), "column index vector")?;
        if row_starts.first() != Some(&0) {
            return Err(SolverError::MalformedInput("row start vector must begin with 0".to_string()));
        }
        if row_starts.last() != Some(&values.len()) {
            return Err(SolverError::MalformedInput(format!(
                "row start vector must end with the number of values {}", values.len(),
            )));
        }
        if row_starts.windows(2).any(|pair| pair[0] > pair[1]) {
            return Err(SolverError::MalformedInput("row start vector is not sorted".to_string()));
        }
        for &column in &column_indices {
            expect_index(column, nr_columns, "column")?;
        }

        let mut row_values = Vec::with_capacity(values.len());
        let mut row_indices = Vec::with_capacity(values.len());
        let mut new_row_starts = Vec::with_capacity(row_starts.len());
        new_row_starts.push(0);
        let mut values = values.into_iter().zip(column_indices);
        for pair in row_starts.windows(2) {
            for (value, column) in values.by_ref().take(pair[1] - pair[0]) {
                if !value.is_zero() {
                    row_values.push(value);
                    row_indices.push(column);
                }
            }
            new_row_starts.push(row_values.len());
        }

        let mut matrix = Self {
            nr_columns,
            row_values,
            row_indices,
            row_starts: new_row_starts,
            column_values: Vec::new(),
            column_indices: Vec::new(),
            column_starts: Vec::new(),
        };
        matrix.rebuild_columns();

        Ok(matrix)
    }

    /// Append a constraint row given as a dense coefficient vector.
    ///
    /// Zero coefficients are dropped, the column major copy is rebuilt.
    pub fn push_row(&mut self, coefficients: &[F]) -> Result<(), SolverError> {
        expect_len(coefficients, self.nr_columns, "constraint")?;

        for (column, value) in coefficients.iter().enumerate() {
            if !value.is_zero() {
                self.row_values.push(value.clone());
                self.row_indices.push(column);
            }
        }
        self.row_starts.push(self.row_values.len());
        self.rebuild_columns();

        Ok(())
    }

    /// Remove a constraint row, shifting the rows after it up by one.
    pub fn remove_row(&mut self, row: usize) -> Result<(), SolverError> {
        expect_index(row, self.nr_rows(), "constraint")?;

        let (start, end) = (self.row_starts[row], self.row_starts[row + 1]);
        let len = end - start;
        self.row_values.drain(start..end);
        self.row_indices.drain(start..end);
        self.row_starts.remove(row + 1);
        for row_start in &mut self.row_starts[(row + 1)..] {
            *row_start -= len;
        }
        self.rebuild_columns();

        Ok(())
    }

    /// Recompute the column major representation from the row major one.
    ///
    /// Values are collected in one bucket per column, so rows within a column stay sorted and the
    /// work is linear in the number of nonzeros.
    fn rebuild_columns(&mut self) {
        let mut buckets = vec![Vec::new(); self.nr_columns];
        for row in 0..self.nr_rows() {
            for k in self.row_starts[row]..self.row_starts[row + 1] {
                buckets[self.row_indices[k]].push((row, k));
            }
        }

        self.column_values = Vec::with_capacity(self.row_values.len());
        self.column_indices = Vec::with_capacity(self.row_values.len());
        self.column_starts = Vec::with_capacity(self.nr_columns + 1);
        for bucket in buckets {
            self.column_starts.push(self.column_values.len());
            for (row, k) in bucket {
                self.column_values.push(self.row_values[k].clone());
                self.column_indices.push(row);
            }
        }
        self.column_starts.push(self.column_values.len());
    }

    /// Nonzero values in a row, with their column index.
    pub fn row(&self, row: usize) -> impl Iterator<Item=(usize, &F)> {
        let range = self.row_starts[row]..self.row_starts[row + 1];
        self.row_indices[range.clone()].iter().copied().zip(&self.row_values[range])
    }

    /// Nonzero values in a structural column, with their row index.
    pub fn column(&self, column: usize) -> impl Iterator<Item=(usize, &F)> {
        let range = self.column_starts[column]..self.column_starts[column + 1];
        self.column_indices[range.clone()].iter().copied().zip(&self.column_values[range])
    }

    /// Dense copy of a row, used when exporting problem data.
    pub fn dense_row(&self, row: usize) -> Vec<F> {
        let mut dense = vec![F::zero(); self.nr_columns];
        for (column, value) in self.row(row) {
            dense[column] = value.clone();
        }
        dense
    }

    /// Number of constraints.
    pub fn nr_rows(&self) -> usize {
        self.row_starts.len() - 1
    }

    /// Number of structural variables.
    pub fn nr_columns(&self) -> usize {
        self.nr_columns
    }

    /// Number of stored values.
    pub fn nnz(&self) -> usize {
        self.row_values.len()
    }
}

impl<F: Field> Display for ConstraintMatrix<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for row in 0..self.nr_rows() {
            for value in self.dense_row(row) {
                write!(f, "{:>6}", value.to_string())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
