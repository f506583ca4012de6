//! # odts_core: Newton's-Method Optimiser Kernel
//!
//! ## Role
//!
//! odts_core is the bottom layer of the workspace, providing:
//! - Objective functions with closed-form gradients (`objective`)
//! - Dense linear algebra and finite-difference differentiation (`math`)
//! - The Newton step, driver state machine and iteration trace (`optimiser`)
//! - Error types: `OptimiserError`, `LinalgError` (`types`)
//!
//! ## No I/O
//!
//! The optimiser never touches the filesystem. It returns the complete
//! iteration trace, which export collaborators (see `odts_audit`) serialise.
//!
//! ## Usage Examples
//!
//! ```rust
//! use odts_core::objective::PerturbedQuadratic;
//! use odts_core::optimiser::{NewtonConfig, NewtonOptimiser, TerminalStatus};
//!
//! let optimiser = NewtonOptimiser::new(PerturbedQuadratic::reference(), NewtonConfig::default());
//! let outcome = optimiser.run(&[1.05, 1.95]).unwrap();
//!
//! assert_eq!(outcome.status, TerminalStatus::Converged);
//! assert!(outcome.final_record().residual < 1e-8);
//! ```
//!
//! ## Feature Flags
//!
//! - `num-dual-mode` (default): `DualObjective`, gradients by forward-mode AD via num-dual
//! - `parallel` (default): multi-start batches run on the rayon thread pool

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod objective;
pub mod optimiser;
pub mod types;

/// Prelude module for convenient imports
pub mod prelude {
    #[cfg(feature = "num-dual-mode")]
    pub use crate::objective::DualObjective;
    pub use crate::objective::{ClosedFormObjective, Objective, PerturbedQuadratic};
    pub use crate::optimiser::{
        run_batch, IterationRecord, NewtonConfig, NewtonOptimiser, NewtonStep,
        OptimisationOutcome, TerminalStatus,
    };
    pub use crate::types::{LinalgError, OptimiserError};
}
