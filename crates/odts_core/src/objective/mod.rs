//! Objective functions with closed-form gradients.
//!
//! The optimiser only ever evaluates gradients; the objective value is
//! carried for reporting. Gradients are fixed when an objective is built and
//! are never re-derived per call.
//!
//! ## Available Objectives
//!
//! - [`PerturbedQuadratic`]: `(x-cx)² + (y-cy)² + a·sin(w·x·y)`, the reference instance
//! - [`ClosedFormObjective`]: caller-supplied value and partial-derivative closures
//! - [`DualObjective`]: partial derivatives produced by forward-mode AD (`num-dual-mode`)

mod closed_form;
#[cfg(feature = "num-dual-mode")]
mod dual;
mod perturbed;

pub use closed_form::{ClosedFormBuilder, ClosedFormObjective};
#[cfg(feature = "num-dual-mode")]
pub use dual::DualObjective;
pub use perturbed::PerturbedQuadratic;

/// A twice-differentiable scalar function over `R^n` with an analytic gradient.
///
/// Implementations must be pure: the same point always yields the same value
/// and gradient. `Send + Sync` lets independent runs share one objective
/// across threads.
pub trait Objective: Send + Sync {
    /// Number of variables `n`.
    fn dimension(&self) -> usize;

    /// Objective value at `x`.
    fn value(&self, x: &[f64]) -> f64;

    /// Gradient at `x` (length `n`).
    fn gradient(&self, x: &[f64]) -> Vec<f64>;

    /// Variable names, used by export collaborators for column headers.
    fn variables(&self) -> Vec<String> {
        (0..self.dimension()).map(|i| format!("x{}", i)).collect()
    }

    /// Human-readable expression of the objective.
    fn expression(&self) -> String {
        format!("f: R^{} -> R", self.dimension())
    }
}

impl<O: Objective + ?Sized> Objective for &O {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn value(&self, x: &[f64]) -> f64 {
        (**self).value(x)
    }

    fn gradient(&self, x: &[f64]) -> Vec<f64> {
        (**self).gradient(x)
    }

    fn variables(&self) -> Vec<String> {
        (**self).variables()
    }

    fn expression(&self) -> String {
        (**self).expression()
    }
}

impl<O: Objective + ?Sized> Objective for Box<O> {
    fn dimension(&self) -> usize {
        (**self).dimension()
    }

    fn value(&self, x: &[f64]) -> f64 {
        (**self).value(x)
    }

    fn gradient(&self, x: &[f64]) -> Vec<f64> {
        (**self).gradient(x)
    }

    fn variables(&self) -> Vec<String> {
        (**self).variables()
    }

    fn expression(&self) -> String {
        (**self).expression()
    }
}
