//! Error types for structured error handling.
//!
//! This module provides:
//! - `OptimiserError`: Malformed configuration or input detected before iterating
//! - `LinalgError`: Failures of the dense linear solver
//!
//! Non-convergence is deliberately absent here. A run that ends DIVERGED or
//! MAX_ITER is a valid outcome reported through
//! [`TerminalStatus`](crate::optimiser::TerminalStatus).

use thiserror::Error;

/// Errors from the dense linear algebra helpers.
///
/// # Examples
/// ```
/// use odts_core::types::LinalgError;
///
/// let err = LinalgError::Singular { pivot: 1 };
/// assert_eq!(format!("{}", err), "Singular matrix: zero pivot in column 1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    /// A pivot was exactly zero (or not finite) during factorisation.
    #[error("Singular matrix: zero pivot in column {pivot}")]
    Singular {
        /// Column in which elimination broke down
        pivot: usize,
    },

    /// The coefficient matrix is not square.
    #[error("Matrix is not square: {rows}x{cols}")]
    NotSquare {
        /// Number of rows
        rows: usize,
        /// Length of the offending row
        cols: usize,
    },

    /// Right-hand side length does not match the matrix.
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Matrix dimension
        expected: usize,
        /// Right-hand side length
        actual: usize,
    },

    /// The solution contains NaN or infinite entries.
    #[error("Solution is not finite")]
    NonFinite,
}

/// Errors raised before an optimisation starts.
///
/// # Examples
/// ```
/// use odts_core::types::OptimiserError;
///
/// let err = OptimiserError::DimensionMismatch { expected: 2, actual: 3 };
/// assert_eq!(
///     format!("{}", err),
///     "Dimension mismatch: objective has 2 variables, initial point has 3"
/// );
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OptimiserError {
    /// Configuration values out of range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Initial point or objective definition rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Initial point does not match the objective's variable count.
    #[error("Dimension mismatch: objective has {expected} variables, initial point has {actual}")]
    DimensionMismatch {
        /// Number of objective variables
        expected: usize,
        /// Length of the supplied point
        actual: usize,
    },

    /// Wrapped linear algebra error.
    #[error("Linear algebra error: {0}")]
    Linalg(#[from] LinalgError),
}

impl OptimiserError {
    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create an invalid input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
