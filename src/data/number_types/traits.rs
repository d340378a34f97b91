//! # Traits
//!
//! The solver is generic over the number type it computes with. Pivoting decisions are made by
//! comparing values with zero exactly, so the only sensible implementations are exact ones.
use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

use num::Integer;
use num::rational::Ratio;
use num_traits::{FromPrimitive, NumAssign, Signed};

/// Basic ordered field operations with Self and with references to Self.
///
/// The by-reference operations let the hot loops of the factorization avoid cloning the right
/// hand side of every operation, which matters for arbitrary precision types.
pub trait Field:
    Ord +
    Signed + // Additive and multiplicative identities, negation, absolute value
    Sum +
    // Operations with a reference as the right hand side
    for<'r> Add<&'r Self, Output=Self> +
    for<'r> AddAssign<&'r Self> +
    for<'r> Sub<&'r Self, Output=Self> +
    for<'r> SubAssign<&'r Self> +
    for<'r> Mul<&'r Self, Output=Self> +
    for<'r> MulAssign<&'r Self> +
    for<'r> Div<&'r Self, Output=Self> +
    for<'r> DivAssign<&'r Self> +
    // Inexact input, such as an infeasibility ray guess computed by a floating point solver
    FromPrimitive +

    // Practicalities
    Clone +
    Display +
    Debug +
    // Values are handed to helper threads
    Send +
    Sync +
    'static
{
    /// Largest integer not larger than this value.
    fn floor(&self) -> Self;
}

impl<T> Field for Ratio<T>
where
    T: Clone + Integer + Signed + NumAssign + Display + Debug + Send + Sync + 'static,
    Ratio<T>: FromPrimitive,
{
    fn floor(&self) -> Self {
        Ratio::floor(self)
    }
}

/// Helper macro for tests.
#[macro_export]
macro_rules! F {
    ($value:expr) => {
        {
            F::from_f64($value as f64).unwrap()
        }
    };
}

#[cfg(test)]
mod test {
    use num::{One, Zero};
    use num_traits::{FromPrimitive, Signed};

    use crate::{R64, RB};
    use crate::data::number_types::rational::{Rational64, RationalBig};
    use crate::data::number_types::traits::Field;

    #[test]
    fn abs() {
        fn test<F: Field>() {
            let v = F::one();
            let w = -v.clone();
            assert_eq!(w.abs(), v);
            assert_eq!(v.clone().abs(), v);
            assert_eq!(F::zero().abs(), F::zero());
        }

        test::<Rational64>();
        test::<RationalBig>();
    }

    #[test]
    fn floor() {
        assert_eq!(Field::floor(&R64!(7, 2)), R64!(3));
        assert_eq!(Field::floor(&R64!(-7, 2)), R64!(-4));
        assert_eq!(Field::floor(&RB!(4)), RB!(4));
        assert_eq!(Field::floor(&RB!(-1, 3)), RB!(-1));
    }

    #[test]
    fn by_reference() {
        fn test<F: Field>() {
            let two = F!(2);
            let mut x = F!(3);
            x += &two;
            assert_eq!(x, F!(5));
            x -= &two;
            x *= &two;
            assert_eq!(x, F!(6));
            x /= &two;
            assert_eq!(x.clone() * &two - &two, F!(4));
            assert!((x / &two).is_positive());
        }

        test::<Rational64>();
        test::<RationalBig>();
    }
}
