//! Infeasible problems and their certificates.
use num_traits::FromPrimitive;

use dual_simplex::{OptimizationResult, Solver, R64};
use dual_simplex::data::linear_program::elements::BoundValue;
use dual_simplex::data::number_types::rational::Rational64;

use crate::{dense, finite, infinite, init};

/// x0 + x1 <= 1 and x0 + x1 >= 2 with free variables and no costs.
fn contradicting_rows() -> Solver<Rational64> {
    Solver::new(
        dense(vec![vec![R64!(1), R64!(1)], vec![R64!(1), R64!(1)]], 2),
        vec![R64!(0), R64!(0)],
        vec![BoundValue::Infinite, finite(R64!(2))],
        vec![finite(R64!(1)), BoundValue::Infinite],
        infinite(2),
        infinite(2),
    ).unwrap()
}

#[test]
fn contradicting_rows_certificate() {
    init();

    let mut solver = contradicting_rows();
    assert_eq!(solver.opt(), Ok(OptimizationResult::Infeasible));

    let proof = solver.farkas_infeasibility_proof().unwrap().unwrap();
    assert_eq!(proof.len(), 2);
    assert!(solver.is_farkas_certificate(&proof));
    let negated = proof.iter().map(|&value| -value).collect::<Vec<_>>();
    assert!(!solver.is_farkas_certificate(&negated));
}

#[test]
fn repaired_by_changing_a_side() {
    init();

    let mut solver = contradicting_rows();
    assert_eq!(solver.opt(), Ok(OptimizationResult::Infeasible));

    solver.set_rhs(1, R64!(1)).unwrap();
    assert_eq!(solver.farkas_infeasibility_proof(), Ok(None));
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    let x = solver.x();
    assert_eq!(x[0] + x[1], R64!(1));
}

#[test]
fn contradicting_equalities() {
    init();

    // x0 - x1 = 0 and x0 - x1 = 1 with x in [0, 10]
    let mut solver = Solver::new(
        dense(vec![vec![R64!(1), R64!(-1)], vec![R64!(1), R64!(-1)]], 2),
        vec![R64!(0), R64!(0)],
        vec![finite(R64!(0)), finite(R64!(1))],
        vec![finite(R64!(0)), finite(R64!(1))],
        vec![finite(R64!(0)); 2],
        vec![finite(R64!(10)); 2],
    ).unwrap();

    assert_eq!(solver.opt().map(OptimizationResult::code), Ok(2));
    let proof = solver.farkas_infeasibility_proof().unwrap().unwrap();
    assert!(solver.is_farkas_certificate(&proof));
}

#[test]
fn dual_infeasible() {
    init();

    // Also primal infeasible, but no dual feasible basis exists
    let mut solver = contradicting_rows();
    solver.set_objective(vec![R64!(1), R64!(0)]).unwrap();

    assert_eq!(solver.opt().map(OptimizationResult::code), Ok(1));
}

#[test]
fn ray_guess_from_floating_point() {
    init();

    let mut solver = contradicting_rows();
    solver.set_inexact_farkas_infeasibility_guess(vec![-0.9999, 1.0002]).unwrap();

    assert_eq!(solver.opt(), Ok(OptimizationResult::Infeasible));
    let proof = solver.farkas_infeasibility_proof().unwrap().unwrap();
    assert_eq!(proof, vec![R64!(-1), R64!(1)]);
}
