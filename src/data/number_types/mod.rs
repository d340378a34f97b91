//! # Number types
//!
//! The solver is defined over an ordered field. This module defines that space and provides the
//! exact implementations it is used with.
//!
//! A benefit of this approach is that the same code can be tested with small, fast rationals and
//! run with arbitrary precision ones.
pub mod traits;
pub mod rational;
