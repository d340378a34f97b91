//! # Building blocks to describe linear programs.
use std::fmt;
use std::ops::Not;

use enum_map::{Enum, EnumMap};

use crate::data::number_types::traits::Field;
use crate::error::SolverError;

/// Direction of a bound.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Enum)]
pub enum BoundDirection {
    /// The value may not go below the bound.
    Lower,
    /// The value may not go above the bound.
    Upper,
}

impl Not for BoundDirection {
    type Output = Self;

    fn not(self) -> Self::Output {
        match self {
            Self::Lower => Self::Upper,
            Self::Upper => Self::Lower,
        }
    }
}

/// One side of the feasible interval of a variable or constraint.
///
/// An infinite lower bound is minus infinity, an infinite upper bound is plus infinity: the side
/// on which the value is stored determines the sign.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BoundValue<F> {
    /// A finite bound.
    Finite(F),
    /// No bound on this side.
    Infinite,
}

impl<F> BoundValue<F> {
    /// The bound value, if it is finite.
    pub fn finite(&self) -> Option<&F> {
        match self {
            BoundValue::Finite(value) => Some(value),
            BoundValue::Infinite => None,
        }
    }

    /// Whether there is no bound on this side.
    pub fn is_infinite(&self) -> bool {
        matches!(self, BoundValue::Infinite)
    }
}

impl<F: Field> BoundValue<F> {
    /// Whether the bound is finite and equal to `value`.
    pub fn is_at(&self, value: &F) -> bool {
        self.finite().is_some_and(|bound| bound == value)
    }

    /// Additive inverse of a finite bound.
    ///
    /// Used to translate between constraint sides and slack variable bounds.
    pub fn negated(&self) -> Self {
        match self {
            BoundValue::Finite(value) => BoundValue::Finite(-value.clone()),
            BoundValue::Infinite => BoundValue::Infinite,
        }
    }
}

impl<F> From<F> for BoundValue<F> {
    fn from(value: F) -> Self {
        BoundValue::Finite(value)
    }
}

impl<F: fmt::Display> fmt::Display for BoundValue<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Finite(value) => write!(f, "{}", value),
            BoundValue::Infinite => f.write_str("inf"),
        }
    }
}

/// Lower and upper bound of a single variable.
pub type Bounds<F> = EnumMap<BoundDirection, BoundValue<F>>;

/// Create the bounds of a variable.
pub fn bounds<F>(lower: BoundValue<F>, upper: BoundValue<F>) -> Bounds<F> {
    EnumMap::from_array([lower, upper])
}

/// Bounds of the slack variable of a constraint `lower <= a^T x <= upper`.
///
/// The full system is `A x + s = 0`, so `s = -a^T x` and the sides swap and change sign.
pub fn slack_bounds<F: Field>(lower: &BoundValue<F>, upper: &BoundValue<F>) -> Bounds<F> {
    bounds(upper.negated(), lower.negated())
}

/// Whether both sides are finite and equal.
pub fn is_fixed<F: Field>(bounds: &Bounds<F>) -> bool {
    match (bounds[BoundDirection::Lower].finite(), bounds[BoundDirection::Upper].finite()) {
        (Some(lower), Some(upper)) => lower == upper,
        _ => false,
    }
}

/// Whether both sides are finite and the lower one exceeds the upper one.
pub fn is_contradictory<F: Field>(bounds: &Bounds<F>) -> bool {
    match (bounds[BoundDirection::Lower].finite(), bounds[BoundDirection::Upper].finite()) {
        (Some(lower), Some(upper)) => lower > upper,
        _ => false,
    }
}

/// The value a nonbasic variable takes when it is placed "at" a bound.
///
/// Falls back to the other side if the requested one is infinite, and to zero for a free
/// variable.
pub fn resting_value<F: Field>(bounds: &Bounds<F>, direction: BoundDirection) -> F {
    bounds[direction].finite()
        .or_else(|| bounds[!direction].finite())
        .cloned()
        .unwrap_or_else(F::zero)
}

/// Position of a variable relative to the basis, as used when importing and exporting bases.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VariableStatus {
    /// Nonbasic at its lower bound.
    AtLower,
    /// In the basis.
    Basic,
    /// Nonbasic at its upper bound.
    AtUpper,
    /// Nonbasic at neither bound (a free variable at zero).
    Free,
}

impl VariableStatus {
    /// Integer encoding: 0 at lower, 1 basic, 2 at upper, 3 free.
    pub fn code(self) -> i32 {
        match self {
            VariableStatus::AtLower => 0,
            VariableStatus::Basic => 1,
            VariableStatus::AtUpper => 2,
            VariableStatus::Free => 3,
        }
    }
}

impl TryFrom<i32> for VariableStatus {
    type Error = SolverError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(VariableStatus::AtLower),
            1 => Ok(VariableStatus::Basic),
            2 => Ok(VariableStatus::AtUpper),
            3 => Ok(VariableStatus::Free),
            other => Err(SolverError::MalformedInput(format!("unknown variable status {}", other))),
        }
    }
}
