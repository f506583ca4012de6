//! Objectives differentiated by forward-mode automatic differentiation.
//!
//! Only the value expression is written by the caller, over `Dual64`
//! numbers. One partial-derivative evaluator per variable is produced at
//! construction by seeding that coordinate's dual part with 1.

use std::sync::Arc;

use num_dual::Dual64;

use super::Objective;
use crate::types::OptimiserError;

type DualFn = dyn Fn(&[Dual64]) -> Dual64 + Send + Sync;
type PartialFn = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;

/// Objective whose gradient is derived with num-dual.
///
/// # Example
///
/// ```
/// use num_dual::{Dual64, DualNum};
/// use odts_core::objective::{DualObjective, Objective};
///
/// // f(x, y) = x²·y + sin(y)
/// let f = DualObjective::new(["x", "y"], |p: &[Dual64]| p[0] * p[0] * p[1] + p[1].sin())
///     .unwrap();
///
/// let g = f.gradient(&[2.0, 0.0]);
/// assert!((g[0] - 0.0).abs() < 1e-12);
/// assert!((g[1] - 5.0).abs() < 1e-12);
/// ```
pub struct DualObjective {
    variables: Vec<String>,
    expression: String,
    function: Arc<DualFn>,
    partials: Vec<PartialFn>,
}

impl DualObjective {
    /// Build an objective from its dual-number expression.
    ///
    /// # Errors
    ///
    /// Returns `OptimiserError::InvalidInput` when `variables` is empty.
    pub fn new<I, S, F>(variables: I, function: F) -> Result<Self, OptimiserError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: Fn(&[Dual64]) -> Dual64 + Send + Sync + 'static,
    {
        let variables: Vec<String> = variables.into_iter().map(Into::into).collect();
        if variables.is_empty() {
            return Err(OptimiserError::invalid_input(
                "objective needs at least one variable",
            ));
        }

        let function: Arc<DualFn> = Arc::new(function);
        let partials = (0..variables.len())
            .map(|i| {
                let f = Arc::clone(&function);
                Box::new(move |x: &[f64]| f(&seed(x, Some(i))).eps) as PartialFn
            })
            .collect();
        let expression = format!("f({})", variables.join(", "));

        Ok(Self {
            variables,
            expression,
            function,
            partials,
        })
    }

    /// Replace the human-readable expression.
    pub fn with_expression(mut self, expression: impl Into<String>) -> Self {
        self.expression = expression.into();
        self
    }
}

/// Lift a real point into dual numbers, seeding coordinate `active` if given.
fn seed(x: &[f64], active: Option<usize>) -> Vec<Dual64> {
    x.iter()
        .enumerate()
        .map(|(j, &v)| Dual64::new(v, if Some(j) == active { 1.0 } else { 0.0 }))
        .collect()
}

impl std::fmt::Debug for DualObjective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DualObjective")
            .field("variables", &self.variables)
            .field("expression", &self.expression)
            .finish_non_exhaustive()
    }
}

impl Objective for DualObjective {
    fn dimension(&self) -> usize {
        self.variables.len()
    }

    fn value(&self, x: &[f64]) -> f64 {
        (self.function)(&seed(x, None)).re
    }

    fn gradient(&self, x: &[f64]) -> Vec<f64> {
        self.partials.iter().map(|d| d(x)).collect()
    }

    fn variables(&self) -> Vec<String> {
        self.variables.clone()
    }

    fn expression(&self) -> String {
        self.expression.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::PerturbedQuadratic;
    use approx::assert_relative_eq;
    use num_dual::DualNum;

    fn reference_dual() -> DualObjective {
        DualObjective::new(["x", "y"], |p: &[Dual64]| {
            let dx = p[0] - Dual64::from(1.0);
            let dy = p[1] - Dual64::from(2.0);
            dx * dx + dy * dy + Dual64::from(0.1) * (Dual64::from(10.0) * p[0] * p[1]).sin()
        })
        .unwrap()
    }

    #[test]
    fn test_matches_analytic_reference_gradient() {
        let ad = reference_dual();
        let analytic = PerturbedQuadratic::reference();

        for p in [[0.3, 0.8], [1.05, 1.95], [-2.0, 4.0]] {
            let g_ad = ad.gradient(&p);
            let g_an = analytic.gradient(&p);
            assert_relative_eq!(g_ad[0], g_an[0], epsilon = 1e-12);
            assert_relative_eq!(g_ad[1], g_an[1], epsilon = 1e-12);
            assert_relative_eq!(ad.value(&p), analytic.value(&p), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_empty_variables_rejected() {
        let result = DualObjective::new(Vec::<String>::new(), |_p: &[Dual64]| Dual64::from(0.0));
        assert!(matches!(result, Err(OptimiserError::InvalidInput(_))));
    }

    #[test]
    fn test_with_expression() {
        let f = reference_dual().with_expression("reference");
        assert_eq!(f.expression(), "reference");
        assert_eq!(f.dimension(), 2);
    }

    #[test]
    fn test_default_expression() {
        assert_eq!(reference_dual().expression(), "f(x, y)");
    }
}
