//! # Rational numbers
//!
//! Primary way to do exact computation. `Rational64` is fast but can overflow on problems with
//! large coefficients, `RationalBig` can't overflow.

/// Aliased type to ease a possible transition to own variant in the future.
pub type Rational64 = num::rational::Rational64;
/// Aliased type to ease a possible transition to own variant in the future.
pub type RationalBig = num::BigRational;

/// Shorthand for creating a rational number in tests.
#[macro_export]
macro_rules! R64 {
    ($value:expr) => {
        Rational64::from_f64($value as f64).unwrap()
    };
    ($numer:expr, $denom:expr) => {
        Rational64::new($numer, $denom)
    };
}

/// Shorthand for creating a rational number in tests.
#[macro_export]
macro_rules! RB {
    ($value:expr) => {
        RationalBig::from_f64($value as f64).unwrap()
    };
    ($numer:expr, $denom:expr) => {
        RationalBig::new(num::BigInt::from($numer as i64), num::BigInt::from($denom as i64))
    };
}
