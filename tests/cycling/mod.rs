//! Degenerate problems on which naive pivoting rules cycle.
use num_traits::FromPrimitive;

use dual_simplex::{OptimizationResult, Solver, SolverConfig, RB, R64};
use dual_simplex::data::number_types::rational::{Rational64, RationalBig};

use crate::{dense, finite, infinite, init};

fn beale_problem(config: SolverConfig) -> Solver<RationalBig> {
    Solver::with_config(
        config,
        dense(vec![
            vec![RB!(1, 4), RB!(-8), RB!(-1), RB!(9)],
            vec![RB!(1, 2), RB!(-12), RB!(-1, 2), RB!(3)],
            vec![RB!(0), RB!(0), RB!(1), RB!(0)],
        ], 4),
        vec![RB!(-3, 4), RB!(20), RB!(-1, 2), RB!(6)],
        infinite(3),
        vec![finite(RB!(0)), finite(RB!(0)), finite(RB!(1))],
        vec![finite(RB!(0)); 4],
        infinite(4),
    ).unwrap()
}

#[test]
fn beale() {
    init();

    let mut solver = beale_problem(SolverConfig::default());
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.objective_value(), RB!(-5, 4));
    assert_eq!(solver.x(), &[RB!(1), RB!(0), RB!(1), RB!(0)]);
    assert_eq!(solver.opt().map(OptimizationResult::code), Ok(0));
}

#[test]
fn beale_anti_cycling_immediately() {
    init();

    let config = SolverConfig {
        cycle_threshold: 0,
        perturbation_threshold: 0,
        refactor_interval: 1,
        ..SolverConfig::default()
    };
    let mut solver = beale_problem(config);
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.objective_value(), RB!(-5, 4));
}

#[test]
fn many_rows_through_origin() {
    init();

    // min x0 + x1 s.t. a_i^T x >= 0 for five rays, x free
    let rows = vec![
        vec![R64!(1), R64!(1)],
        vec![R64!(1), R64!(2)],
        vec![R64!(2), R64!(1)],
        vec![R64!(1), R64!(3)],
        vec![R64!(3), R64!(1)],
    ];
    let mut solver = Solver::<Rational64>::new(
        dense(rows, 2),
        vec![R64!(1), R64!(1)],
        vec![finite(R64!(0)); 5],
        infinite(5),
        infinite(2),
        infinite(2),
    ).unwrap();

    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.x(), &[R64!(0), R64!(0)]);
    assert_eq!(solver.objective_value(), R64!(0));
}
