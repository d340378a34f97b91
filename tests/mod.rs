//! # Integration tests
//!
//! Integration tests completely external from the crate. All code written in this module could be
//! written by an external user of the crate.
use dual_simplex::data::linear_algebra::matrix::ConstraintMatrix;
use dual_simplex::data::linear_program::elements::BoundValue;
use dual_simplex::data::number_types::traits::Field;

mod basis;
mod cycling;
mod infeasibility;
mod warm_start;

/// Route the solver's logging to the test output, controlled by `RUST_LOG`.
fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Build a matrix from dense rows.
fn dense<F: Field>(rows: Vec<Vec<F>>, nr_columns: usize) -> ConstraintMatrix<F> {
    let mut matrix = ConstraintMatrix::new(vec![], vec![], vec![0], nr_columns).unwrap();
    for row in rows {
        matrix.push_row(&row).unwrap();
    }
    matrix
}

fn finite<F>(value: F) -> BoundValue<F> {
    BoundValue::Finite(value)
}

fn infinite<F: Clone>(len: usize) -> Vec<BoundValue<F>> {
    vec![BoundValue::Infinite; len]
}
