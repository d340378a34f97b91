//! Sequences of modifications, each solved from the basis of the previous solve.
use num_traits::FromPrimitive;

use dual_simplex::{OptimizationResult, Solver, R64};
use dual_simplex::data::linear_program::elements::BoundValue;
use dual_simplex::data::number_types::rational::Rational64;

use crate::{dense, finite, infinite, init};

/// max 5 x0 + 4 x1 + 3 x2 subject to three packing constraints, written as a minimization.
fn packing() -> Solver<Rational64> {
    Solver::new(
        dense(vec![
            vec![R64!(2), R64!(3), R64!(1)],
            vec![R64!(4), R64!(1), R64!(2)],
            vec![R64!(3), R64!(4), R64!(2)],
        ], 3),
        vec![R64!(-5), R64!(-4), R64!(-3)],
        infinite(3),
        vec![finite(R64!(5)), finite(R64!(11)), finite(R64!(8))],
        vec![finite(R64!(0)); 3],
        infinite(3),
    ).unwrap()
}

fn assert_same_optimum(solver: &Solver<Rational64>, mut fresh: Solver<Rational64>) {
    assert_eq!(fresh.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.objective_value(), fresh.objective_value());
}

#[test]
fn branching_sequence() {
    init();

    let mut solver = packing();
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.x(), &[R64!(2), R64!(0), R64!(1)]);
    assert_eq!(solver.objective_value(), R64!(-13));
    assert_eq!(solver.y(), Some(vec![R64!(-1), R64!(0), R64!(-1)]));

    // Branch down on x0, then up on x2
    solver.set_var_ub(0, finite(R64!(1))).unwrap();
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.x(), &[R64!(1), R64!(0), R64!(5, 2)]);
    assert_eq!(solver.objective_value(), R64!(-25, 2));
    let mut fresh = packing();
    fresh.set_var_ub(0, finite(R64!(1))).unwrap();
    assert_same_optimum(&solver, fresh);

    solver.set_var_lb(2, finite(R64!(2))).unwrap();
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.objective_value(), R64!(-25, 2));

    solver.set_objective(vec![R64!(-1), R64!(-1), R64!(-1)]).unwrap();
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.x(), &[R64!(0), R64!(0), R64!(4)]);
    let mut fresh = packing();
    fresh.set_var_bounds(0, finite(R64!(0)), finite(R64!(1))).unwrap();
    fresh.set_var_lb(2, finite(R64!(2))).unwrap();
    fresh.set_objective(vec![R64!(-1), R64!(-1), R64!(-1)]).unwrap();
    assert_same_optimum(&solver, fresh);

    // Back to the root problem
    solver.set_var_bounds(0, finite(R64!(0)), BoundValue::Infinite).unwrap();
    solver.set_var_lb(2, finite(R64!(0))).unwrap();
    solver.set_objective(vec![R64!(-5), R64!(-4), R64!(-3)]).unwrap();
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.x(), &[R64!(2), R64!(0), R64!(1)]);
}

#[test]
fn adding_a_cut() {
    init();

    let mut solver = packing();
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));

    solver.add_constraint(&[R64!(1), R64!(1), R64!(1)], BoundValue::Infinite, finite(R64!(2))).unwrap();
    assert_eq!(solver.num_rows(), 4);
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.x(), &[R64!(2), R64!(0), R64!(0)]);
    assert_eq!(solver.objective_value(), R64!(-10));
    assert_eq!(solver.constraint_bounds(3), Ok((BoundValue::Infinite, finite(R64!(2)))));

    solver.remove_constraint(3).unwrap();
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.objective_value(), R64!(-13));
}

#[test]
fn cut_off_then_resume() {
    init();

    let mut solver = packing();
    // Never reached, the optimum is -13
    solver.set_infeasibility_bound(finite(R64!(-10)));
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));

    // The objective value of the previous optimum already reaches the bound
    solver.set_var_ub(0, finite(R64!(1))).unwrap();
    solver.set_infeasibility_bound(finite(R64!(-13)));
    assert_eq!(solver.opt().map(OptimizationResult::code), Ok(3));

    solver.set_infeasibility_bound(BoundValue::Infinite);
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.objective_value(), R64!(-25, 2));
}
