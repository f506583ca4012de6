//! Optimiser configuration.

use crate::math::DEFAULT_HESSIAN_STEP;
use crate::types::OptimiserError;

/// Configuration for [`NewtonOptimiser`](super::NewtonOptimiser).
///
/// # Example
///
/// ```
/// use odts_core::optimiser::NewtonConfig;
///
/// let config = NewtonConfig::default();
/// assert_eq!(config.max_iterations, 20);
/// assert!(config.tolerance <= 1e-8);
///
/// let custom = NewtonConfig::new(1e-10, 50).unwrap().with_divergence_ratio(2.0);
/// assert_eq!(custom.max_iterations, 50);
/// assert_eq!(custom.divergence_ratio, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonConfig {
    /// Residual below which a run is CONVERGED.
    pub tolerance: f64,

    /// Upper bound on recorded iterations.
    pub max_iterations: usize,

    /// Consecutive residual ratio above which a run is DIVERGED.
    ///
    /// Checked from iteration 2 onwards.
    pub divergence_ratio: f64,

    /// Coordinate perturbation of the central-difference Hessian.
    pub hessian_step: f64,
}

impl Default for NewtonConfig {
    /// Default values:
    /// - `tolerance`: 1e-8
    /// - `max_iterations`: 20
    /// - `divergence_ratio`: 1.5
    /// - `hessian_step`: 1e-6
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 20,
            divergence_ratio: 1.5,
            hessian_step: DEFAULT_HESSIAN_STEP,
        }
    }
}

impl NewtonConfig {
    /// Create a validated configuration with default divergence ratio and Hessian step.
    ///
    /// # Errors
    ///
    /// Returns `OptimiserError::InvalidConfig` if `tolerance` is not a positive
    /// finite number or `max_iterations == 0`.
    pub fn new(tolerance: f64, max_iterations: usize) -> Result<Self, OptimiserError> {
        let config = Self {
            tolerance,
            max_iterations,
            ..Default::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Set the iteration bound.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the divergence ratio.
    pub fn with_divergence_ratio(mut self, divergence_ratio: f64) -> Self {
        self.divergence_ratio = divergence_ratio;
        self
    }

    /// Set the Hessian perturbation.
    pub fn with_hessian_step(mut self, hessian_step: f64) -> Self {
        self.hessian_step = hessian_step;
        self
    }

    /// Check every field; the first violation is reported.
    pub fn validate(&self) -> Result<(), OptimiserError> {
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(OptimiserError::invalid_config(format!(
                "tolerance must be positive and finite, got {}",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(OptimiserError::invalid_config(
                "max_iterations must be > 0",
            ));
        }
        if !(self.divergence_ratio.is_finite() && self.divergence_ratio > 0.0) {
            return Err(OptimiserError::invalid_config(format!(
                "divergence_ratio must be positive and finite, got {}",
                self.divergence_ratio
            )));
        }
        if !(self.hessian_step.is_finite() && self.hessian_step > 0.0) {
            return Err(OptimiserError::invalid_config(format!(
                "hessian_step must be positive and finite, got {}",
                self.hessian_step
            )));
        }
        Ok(())
    }
}
