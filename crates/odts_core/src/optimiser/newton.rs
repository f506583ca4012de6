//! Newton's-method driver.

use tracing::{debug, info, warn};

use super::{IterationRecord, NewtonConfig, OptimisationOutcome, TerminalStatus};
use crate::math::{central_difference_hessian, lu_solve, norm};
use crate::objective::Objective;
use crate::types::OptimiserError;

/// Divergence is only checked for iteration indices above this value.
const DIVERGENCE_GRACE: usize = 1;

/// Output of a single Newton step.
#[derive(Debug, Clone, PartialEq)]
pub struct NewtonStep {
    /// Candidate next point `x − H⁻¹·g` (or `x` unchanged on a singular system)
    pub next: Vec<f64>,
    /// Gradient at the evaluated point
    pub gradient: Vec<f64>,
    /// `‖g‖₂`, or +∞ when the Newton system could not be solved
    pub residual: f64,
}

impl NewtonStep {
    /// Whether the linear solve failed and the residual was replaced by +∞.
    pub fn is_singular(&self) -> bool {
        self.residual == f64::INFINITY
    }
}

/// Newton's-method optimiser with a finite-difference Hessian.
///
/// Applies undamped steps `x ← x − H⁻¹·g` where `g` is the analytic gradient
/// and `H` its central-difference Jacobian, and classifies the run as
/// CONVERGED, DIVERGED or MAX_ITER.
///
/// # Convergence
///
/// Newton's method converges quadratically near a non-degenerate stationary
/// point. It seeks `∇f = 0`, so it may stop at a maximum or saddle as readily
/// as at a minimum. Far from such a point the residual can grow; a ratio of
/// consecutive residuals above `divergence_ratio` ends the run.
///
/// # Example
///
/// ```
/// use odts_core::objective::PerturbedQuadratic;
/// use odts_core::optimiser::{NewtonConfig, NewtonOptimiser};
///
/// let optimiser = NewtonOptimiser::new(PerturbedQuadratic::quadratic(), NewtonConfig::default());
/// let outcome = optimiser.run(&[0.0, 0.0]).unwrap();
///
/// assert!(outcome.converged());
/// assert!((outcome.point[0] - 1.0).abs() < 1e-6);
/// assert!((outcome.point[1] - 2.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonOptimiser<O: Objective> {
    objective: O,
    config: NewtonConfig,
}

impl<O: Objective> NewtonOptimiser<O> {
    /// Create an optimiser for `objective` with the given configuration.
    pub fn new(objective: O, config: NewtonConfig) -> Self {
        Self { objective, config }
    }

    /// Create an optimiser with default configuration.
    pub fn with_defaults(objective: O) -> Self {
        Self::new(objective, NewtonConfig::default())
    }

    /// Returns a reference to the objective.
    pub fn objective(&self) -> &O {
        &self.objective
    }

    /// Returns a reference to the optimiser configuration.
    pub fn config(&self) -> &NewtonConfig {
        &self.config
    }

    /// Gradient of the objective at `x`.
    ///
    /// # Errors
    ///
    /// Returns `OptimiserError` when `x` is empty, non-finite or of the wrong
    /// dimension.
    pub fn gradient(&self, x: &[f64]) -> Result<Vec<f64>, OptimiserError> {
        self.check_point(x)?;
        Ok(self.objective.gradient(x))
    }

    /// Central-difference Hessian at `x` (transposed, not symmetrised).
    ///
    /// # Errors
    ///
    /// Same conditions as [`NewtonOptimiser::gradient`].
    pub fn hessian(&self, x: &[f64]) -> Result<Vec<Vec<f64>>, OptimiserError> {
        self.check_point(x)?;
        Ok(self.hessian_at(x))
    }

    /// Solve `H(x) · step = g` for the raw Newton step at `x`.
    ///
    /// # Errors
    ///
    /// Returns `OptimiserError::Linalg` when the Hessian is singular or the
    /// solution is not finite, and the [`NewtonOptimiser::gradient`] errors
    /// for a malformed point.
    pub fn direction(&self, x: &[f64]) -> Result<Vec<f64>, OptimiserError> {
        self.check_point(x)?;
        let g = self.objective.gradient(x);
        let h = self.hessian_at(x);
        Ok(lu_solve(&h, &g)?)
    }

    /// Perform one Newton step from `x`.
    ///
    /// A singular Newton system does not fail: the point is returned
    /// unchanged with a residual of +∞ so that the driver's termination logic
    /// still applies.
    ///
    /// # Errors
    ///
    /// Only a malformed point is an error; see [`NewtonOptimiser::gradient`].
    pub fn newton_step(&self, x: &[f64]) -> Result<NewtonStep, OptimiserError> {
        self.check_point(x)?;
        Ok(self.step_at(x))
    }

    fn hessian_at(&self, x: &[f64]) -> Vec<Vec<f64>> {
        central_difference_hessian(|p| self.objective.gradient(p), x, self.config.hessian_step)
    }

    /// Newton step at a point already known to match the objective.
    fn step_at(&self, x: &[f64]) -> NewtonStep {
        let gradient = self.objective.gradient(x);
        let hessian = self.hessian_at(x);

        match lu_solve(&hessian, &gradient) {
            Ok(step) => {
                let next = x.iter().zip(&step).map(|(xi, si)| xi - si).collect();
                let residual = norm(&gradient);
                NewtonStep {
                    next,
                    gradient,
                    residual,
                }
            }
            Err(err) => {
                warn!(point = ?x, error = %err, "Newton system unsolvable; residual set to infinity");
                NewtonStep {
                    next: x.to_vec(),
                    gradient,
                    residual: f64::INFINITY,
                }
            }
        }
    }

    /// Run the optimisation from `x0`.
    ///
    /// For each iteration the pre-step point, gradient and residual are
    /// recorded. The run stops as CONVERGED when the residual drops below the
    /// tolerance, as DIVERGED when (from iteration 2 on) the residual grows by
    /// more than `divergence_ratio` over the previous one, and as MAX_ITER when
    /// the iteration bound is exhausted.
    ///
    /// # Returns
    ///
    /// * `Ok(outcome)` - Any of the three terminal states; inspect `outcome.status`
    /// * `Err(OptimiserError)` - Invalid configuration or initial point, detected before iterating
    pub fn run(&self, x0: &[f64]) -> Result<OptimisationOutcome, OptimiserError> {
        self.config.validate()?;
        self.check_point(x0)?;

        let max_iterations = self.config.max_iterations;
        let mut x = x0.to_vec();
        let mut trace: Vec<IterationRecord> = Vec::new();
        let mut status = None;

        for iteration in 0..max_iterations {
            let NewtonStep {
                next,
                gradient,
                residual,
            } = self.step_at(&x);
            debug!(iteration, residual, "Newton iteration");

            let previous = trace.last().map(|r| r.residual);
            trace.push(IterationRecord {
                iteration,
                point: x.clone(),
                gradient,
                residual,
                status: None,
            });

            if residual < self.config.tolerance {
                status = Some(TerminalStatus::Converged);
                break;
            }
            if iteration > DIVERGENCE_GRACE {
                if let Some(prev) = previous {
                    if (residual / prev).abs() > self.config.divergence_ratio {
                        status = Some(TerminalStatus::Diverged);
                        break;
                    }
                }
            }

            x = next;
        }

        let status = status.unwrap_or(TerminalStatus::MaxIter);
        if let Some(last) = trace.last_mut() {
            last.status = Some(status);
        }

        info!(
            status = %status,
            iterations = trace.len(),
            point = ?x,
            "Optimisation finished"
        );

        Ok(OptimisationOutcome {
            point: x,
            status,
            trace,
        })
    }

    fn check_point(&self, x: &[f64]) -> Result<(), OptimiserError> {
        if x.is_empty() {
            return Err(OptimiserError::invalid_input("point is empty"));
        }
        let expected = self.objective.dimension();
        if x.len() != expected {
            return Err(OptimiserError::DimensionMismatch {
                expected,
                actual: x.len(),
            });
        }
        if let Some(i) = x.iter().position(|v| !v.is_finite()) {
            return Err(OptimiserError::invalid_input(format!(
                "coordinate {} is not finite: {}",
                i, x[i]
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objective::{ClosedFormObjective, PerturbedQuadratic};
    use approx::assert_relative_eq;

    fn reference() -> NewtonOptimiser<PerturbedQuadratic> {
        NewtonOptimiser::with_defaults(PerturbedQuadratic::reference())
    }

    fn flat_plane() -> ClosedFormObjective {
        // Constant non-zero gradient, identically zero Hessian
        ClosedFormObjective::builder(["x", "y"])
            .value(|p| p[0] + p[1])
            .partial(|_| 1.0)
            .partial(|_| 1.0)
            .build()
            .unwrap()
    }

    fn assert_single_terminal_marker(outcome: &OptimisationOutcome) {
        let (last, rest) = outcome.trace.split_last().unwrap();
        assert_eq!(last.status, Some(outcome.status));
        assert!(rest.iter().all(|r| r.status.is_none()));
        for (i, r) in outcome.trace.iter().enumerate() {
            assert_eq!(r.iteration, i);
        }
    }

    // ========================================
    // Newton step
    // ========================================

    #[test]
    fn test_newton_step_on_quadratic_lands_on_centre() {
        let optimiser = NewtonOptimiser::with_defaults(PerturbedQuadratic::quadratic());
        let step = optimiser.newton_step(&[0.0, 0.0]).unwrap();

        assert_relative_eq!(step.next[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(step.next[1], 2.0, epsilon = 1e-6);
        assert_eq!(step.gradient, vec![-2.0, -4.0]);
        assert_relative_eq!(step.residual, 20.0_f64.sqrt(), epsilon = 1e-15);
        assert!(!step.is_singular());
    }

    #[test]
    fn test_newton_step_singular_returns_infinity() {
        let optimiser = NewtonOptimiser::with_defaults(flat_plane());
        let step = optimiser.newton_step(&[0.5, -0.5]).unwrap();

        assert_eq!(step.residual, f64::INFINITY);
        assert!(step.is_singular());
        assert_eq!(step.next, vec![0.5, -0.5]);
        assert_eq!(step.gradient, vec![1.0, 1.0]);
    }

    #[test]
    fn test_direction_reports_singular_hessian() {
        let optimiser = NewtonOptimiser::with_defaults(flat_plane());
        let result = optimiser.direction(&[0.0, 0.0]);
        assert!(matches!(result, Err(OptimiserError::Linalg(_))));
    }

    #[test]
    fn test_hessian_of_reference_is_nearly_symmetric() {
        let h = reference().hessian(&[0.3, 0.8]).unwrap();
        assert_relative_eq!(h[0][1], h[1][0], epsilon = 1e-4);
    }

    // ========================================
    // Driver state machine
    // ========================================

    #[test]
    fn test_reference_converges_near_centre() {
        let outcome = reference().run(&[1.05, 1.95]).unwrap();

        assert_eq!(outcome.status, TerminalStatus::Converged);
        assert!(outcome.iterations() <= 10);
        assert!(outcome.final_record().residual < 1e-8);
        assert_single_terminal_marker(&outcome);
    }

    #[test]
    fn test_converged_returns_pre_step_point() {
        let outcome = reference().run(&[1.05, 1.95]).unwrap();
        assert_eq!(outcome.point, outcome.final_record().point);
    }

    #[test]
    fn test_max_iter_returns_advanced_point() {
        let optimiser = NewtonOptimiser::new(
            PerturbedQuadratic::reference(),
            NewtonConfig::default().with_max_iterations(3),
        );
        let outcome = optimiser.run(&[0.3, 0.8]).unwrap();

        assert_eq!(outcome.status, TerminalStatus::MaxIter);
        assert_eq!(outcome.iterations(), 3);
        assert_single_terminal_marker(&outcome);

        let expected = optimiser.newton_step(&outcome.final_record().point).unwrap().next;
        assert_eq!(outcome.point, expected);
    }

    #[test]
    fn test_singular_hessian_terminates_with_max_iter() {
        let optimiser = NewtonOptimiser::new(
            flat_plane(),
            NewtonConfig::default().with_max_iterations(5),
        );
        let outcome = optimiser.run(&[1.0, 1.0]).unwrap();

        assert_eq!(outcome.status, TerminalStatus::MaxIter);
        assert_eq!(outcome.iterations(), 5);
        assert!(outcome.residuals().iter().all(|r| r.is_infinite()));
        assert_eq!(outcome.point, vec![1.0, 1.0]);
    }

    #[test]
    fn test_zero_gradient_start_converges_immediately() {
        let optimiser = NewtonOptimiser::with_defaults(PerturbedQuadratic::quadratic());
        let outcome = optimiser.run(&[1.0, 2.0]).unwrap();

        assert_eq!(outcome.status, TerminalStatus::Converged);
        assert_eq!(outcome.iterations(), 1);
        assert_eq!(outcome.point, vec![1.0, 2.0]);
    }

    // ========================================
    // Input validation
    // ========================================

    #[test]
    fn test_dimension_mismatch_rejected() {
        let result = reference().run(&[1.0, 2.0, 3.0]);
        assert_eq!(
            result.unwrap_err(),
            OptimiserError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn test_empty_point_rejected() {
        let result = reference().run(&[]);
        assert!(matches!(result, Err(OptimiserError::InvalidInput(_))));
    }

    #[test]
    fn test_non_finite_point_rejected() {
        let result = reference().run(&[f64::NAN, 2.0]);
        match result {
            Err(OptimiserError::InvalidInput(msg)) => assert!(msg.contains("coordinate 0")),
            other => panic!("Expected InvalidInput error, got {:?}", other),
        }
    }

    #[test]
    fn test_step_rejects_malformed_point() {
        let optimiser = reference();
        assert_eq!(
            optimiser.newton_step(&[1.0]).unwrap_err(),
            OptimiserError::DimensionMismatch {
                expected: 2,
                actual: 1
            }
        );
        assert!(matches!(
            optimiser.hessian(&[]),
            Err(OptimiserError::InvalidInput(_))
        ));
        assert!(matches!(
            optimiser.direction(&[0.3, f64::INFINITY]),
            Err(OptimiserError::InvalidInput(_))
        ));
        assert!(matches!(
            optimiser.gradient(&[1.0, 2.0, 3.0]),
            Err(OptimiserError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_unbounded_iteration_limit_does_not_preallocate() {
        let optimiser = NewtonOptimiser::new(
            PerturbedQuadratic::reference(),
            NewtonConfig::default().with_max_iterations(usize::MAX),
        );
        let outcome = optimiser.run(&[1.05, 1.95]).unwrap();

        assert_eq!(outcome.status, TerminalStatus::Converged);
        assert!(outcome.iterations() <= 10);
    }

    #[test]
    fn test_zero_max_iterations_rejected() {
        let optimiser = NewtonOptimiser::new(
            PerturbedQuadratic::reference(),
            NewtonConfig::default().with_max_iterations(0),
        );
        assert!(matches!(
            optimiser.run(&[0.3, 0.8]),
            Err(OptimiserError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_accessors() {
        let optimiser = reference();
        assert_eq!(optimiser.config().max_iterations, 20);
        assert_eq!(optimiser.objective().amplitude(), 0.1);
    }
}
