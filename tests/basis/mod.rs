//! Exporting and importing bases, directly and through an initial basis provider.
use num_traits::FromPrimitive;

use dual_simplex::{OptimizationResult, Solver, SolverError, R64};
use dual_simplex::algorithm::dual_simplex::{InitialBasis, InitialBasisProvider, ProblemView};
use dual_simplex::data::linear_program::elements::{BoundValue, VariableStatus};
use dual_simplex::data::number_types::rational::Rational64;

use crate::{dense, finite, infinite, init};

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

fn codes(statuses: &[VariableStatus]) -> Vec<i32> {
    statuses.iter().map(|status| status.code()).collect()
}

#[test]
fn export_import() {
    init();

    let mut solver = packing();
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    let (var_stati, con_stati) = solver.base();
    assert_eq!(codes(&var_stati), vec![1, 0, 1]);
    assert_eq!(codes(&con_stati), vec![0, 1, 0]);

    let mut other = packing();
    other.set_base(&var_stati, &con_stati).unwrap();
    assert_eq!(other.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(other.x(), solver.x());
    assert_eq!(other.y(), solver.y());
    assert_eq!(other.base(), (var_stati, con_stati));
}

#[test]
fn import_from_codes() {
    init();

    let var_stati = [1i32, 0, 1].into_iter()
        .map(VariableStatus::try_from)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    let con_stati = [0i32, 1, 0].into_iter()
        .map(VariableStatus::try_from)
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    let mut solver = packing();
    solver.set_base(&var_stati, &con_stati).unwrap();
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.objective_value(), R64!(-13));

    assert!(VariableStatus::try_from(4).is_err());
}

#[test]
fn wrong_number_of_basic_variables() {
    init();

    let mut solver = packing();
    let result = solver.set_base(
        &[VariableStatus::Basic; 3],
        &[VariableStatus::Basic, VariableStatus::AtLower, VariableStatus::AtLower],
    );
    assert_eq!(result, Err(SolverError::InvalidBasis { basic: 4, nonbasic: 2 }));

    // The solver is still usable
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.objective_value(), R64!(-13));
}

#[test]
fn clearing_the_basis() {
    init();

    let mut solver = packing();
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));

    solver.clear_basis();
    assert_eq!(solver.y(), None);
    assert_eq!(solver.x(), &[R64!(0); 3]);
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(solver.objective_value(), R64!(-13));
}

/// Suggests the basis it was created with, and counts how often it was asked.
struct Suggestion {
    basis: InitialBasis,
    nr_calls: std::rc::Rc<std::cell::Cell<usize>>,
}

impl InitialBasisProvider<Rational64> for Suggestion {
    fn initial_basis(&mut self, problem: &ProblemView<'_, Rational64>) -> Option<InitialBasis> {
        self.nr_calls.set(self.nr_calls.get() + 1);
        assert_eq!(problem.objective(), &[R64!(-5), R64!(-4), R64!(-3)]);
        assert_eq!(problem.constraint_bounds(1), (BoundValue::Infinite, finite(R64!(11))));
        assert_eq!(problem.variable_bounds(0), (&finite(R64!(0)), &BoundValue::Infinite));

        Some(self.basis.clone())
    }
}

#[test]
fn provider() {
    init();

    let mut solver = packing();
    assert_eq!(solver.opt(), Ok(OptimizationResult::Optimal));
    let (var_stati, con_stati) = solver.base();

    let nr_calls = std::rc::Rc::new(std::cell::Cell::new(0));
    let mut other = packing();
    other.set_initial_basis_provider(Box::new(Suggestion {
        basis: InitialBasis { var_stati, con_stati, farkas_ray: None },
        nr_calls: nr_calls.clone(),
    }));
    assert_eq!(other.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(other.x(), solver.x());
    assert_eq!(nr_calls.get(), 1);

    // Only consulted without a basis
    other.set_var_ub(1, finite(R64!(1))).unwrap();
    assert_eq!(other.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(nr_calls.get(), 1);
    other.clear_basis();
    assert_eq!(other.opt(), Ok(OptimizationResult::Optimal));
    assert_eq!(nr_calls.get(), 2);
}
