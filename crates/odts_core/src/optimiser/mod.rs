//! Newton's-method optimiser.
//!
//! ## Algorithm
//!
//! ```text
//! g = ∇f(x)                 (closed form)
//! H = central difference of ∇f at x, transposed
//! solve H · step = g        (LU with partial pivoting)
//! x_next = x − step
//! ```
//!
//! ## State Machine
//!
//! ```text
//! RUNNING ──residual < tol──────────────────────▶ CONVERGED
//!    │    ──i > 1 and res_i / res_{i-1} > 1.5───▶ DIVERGED
//!    └────max_iterations exhausted──────────────▶ MAX_ITER
//! ```
//!
//! A singular Newton system is not an error: the step reports a residual of
//! +∞ and leaves the point unchanged, and the state machine above handles the
//! rest.
//!
//! ## Configuration
//!
//! [`NewtonConfig`] controls:
//! - `tolerance`: Convergence threshold on the residual (default: 1e-8)
//! - `max_iterations`: Iteration bound (default: 20)
//! - `divergence_ratio`: Residual growth threshold (default: 1.5)
//! - `hessian_step`: Finite-difference perturbation (default: 1e-6)

mod batch;
mod config;
mod newton;
mod trace;

pub use batch::run_batch;
pub use config::NewtonConfig;
pub use newton::{NewtonOptimiser, NewtonStep};
pub use trace::{IterationRecord, OptimisationOutcome, TerminalStatus};
