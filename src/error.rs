//! # Error reporting for solver requests
//!
//! Errors describe requests that can't be carried out: inconsistently sized input, bound changes
//! that can't be interpreted, bases that are not bases. Whether a linear program is infeasible or
//! unbounded is not an error, that is the outcome of solving it.
use std::error::Error;
use std::fmt;
use std::fmt::Display;

/// A `SolverError` is returned when a request to the solver can't be carried out.
///
/// The solver is not modified when an error is returned.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SolverError {
    /// Sizes or indices of the provided data don't match the problem.
    ///
    /// The contained `String` is a message for the end user.
    MalformedInput(String),
    /// A single right hand side value was provided for a constraint that has two different finite
    /// sides, so it is not clear which one should be replaced.
    AmbiguousBound {
        /// Index of the constraint.
        row: usize,
    },
    /// No pivot could be found while factorizing the basis matrix.
    ///
    /// This indicates an internal inconsistency: a basis built by the solver is never singular.
    SingularBasis {
        /// Number of rows that were not yet pivoted on.
        remaining: usize,
    },
    /// A basis was provided that doesn't have exactly one basic variable per constraint.
    InvalidBasis {
        /// Number of variables marked basic.
        basic: usize,
        /// Number of variables marked nonbasic.
        nonbasic: usize,
    },
}

impl Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SolverError::MalformedInput(message) => write!(f, "MalformedInput: {}", message),
            SolverError::AmbiguousBound { row } => write!(
                f, "AmbiguousBound: cannot determine which bound of constraint {} to set", row,
            ),
            SolverError::SingularBasis { remaining } => write!(
                f, "SingularBasis: no pivot found with {} rows remaining", remaining,
            ),
            SolverError::InvalidBasis { basic, nonbasic } => write!(
                f, "InvalidBasis: {} basic and {} nonbasic variables", basic, nonbasic,
            ),
        }
    }
}

impl Error for SolverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        None
    }
}

/// Check that a slice has the length the problem dimensions require.
pub(crate) fn expect_len<T>(values: &[T], expected: usize, what: &str) -> Result<(), SolverError> {
    if values.len() == expected {
        Ok(())
    } else {
        Err(SolverError::MalformedInput(format!(
            "{} has length {}, expected {}", what, values.len(), expected,
        )))
    }
}

/// Check that an index refers to an existing row or column.
pub(crate) fn expect_index(index: usize, len: usize, what: &str) -> Result<(), SolverError> {
    if index < len {
        Ok(())
    } else {
        Err(SolverError::MalformedInput(format!(
            "{} index {} out of range, there are {}", what, index, len,
        )))
    }
}
