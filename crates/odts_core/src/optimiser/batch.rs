//! Multi-start runs.
//!
//! Each start is an independent optimisation with its own trace. With the
//! `parallel` feature the runs are distributed over the rayon thread pool.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::{NewtonOptimiser, OptimisationOutcome};
use crate::objective::Objective;
use crate::types::OptimiserError;

/// Run `optimiser` from every point in `starts`.
///
/// Results are returned in the order of `starts`; an invalid start yields an
/// `Err` in its slot without affecting the others.
///
/// # Example
///
/// ```
/// use odts_core::objective::PerturbedQuadratic;
/// use odts_core::optimiser::{run_batch, NewtonOptimiser};
///
/// let optimiser = NewtonOptimiser::with_defaults(PerturbedQuadratic::quadratic());
/// let starts = vec![vec![0.0, 0.0], vec![3.0, -1.0]];
/// let outcomes = run_batch(&optimiser, &starts);
///
/// assert_eq!(outcomes.len(), 2);
/// assert!(outcomes.iter().all(|o| o.as_ref().unwrap().converged()));
/// ```
pub fn run_batch<O: Objective>(
    optimiser: &NewtonOptimiser<O>,
    starts: &[Vec<f64>],
) -> Vec<Result<OptimisationOutcome, OptimiserError>> {
    #[cfg(feature = "parallel")]
    {
        starts.par_iter().map(|x0| optimiser.run(x0)).collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        starts.iter().map(|x0| optimiser.run(x0)).collect()
    }
}
