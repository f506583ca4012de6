//! Numerical building blocks for the optimiser.
//!
//! ## Available Routines
//!
//! - [`linalg`]: Euclidean norm, transpose and LU solve with partial pivoting
//! - [`differentiation`]: Central finite-difference Jacobian of a gradient (the Hessian)
//!
//! Matrices are row-major `Vec<Vec<T>>`, matching the small dimensions the
//! optimiser works with.
//!
//! ## Example
//!
//! ```
//! use odts_core::math::linalg::{lu_solve, norm};
//!
//! // Solve [[2, 1], [1, 3]] x = [3, 5]
//! let a: Vec<Vec<f64>> = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
//! let x = lu_solve(&a, &[3.0, 5.0]).unwrap();
//!
//! assert!((x[0] - 0.8).abs() < 1e-12);
//! assert!((x[1] - 1.4).abs() < 1e-12);
//! assert!((norm(&[3.0_f64, 4.0]) - 5.0).abs() < 1e-12);
//! ```

pub mod differentiation;
pub mod linalg;

pub use differentiation::{central_difference_hessian, DEFAULT_HESSIAN_STEP};
pub use linalg::{lu_solve, norm, transpose};
