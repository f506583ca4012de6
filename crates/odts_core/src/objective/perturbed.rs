//! Quadratic bowl perturbed by an oscillatory term.

use super::Objective;

/// Two-variable objective `f(x, y) = (x - cx)² + (y - cy)² + a·sin(w·x·y)`.
///
/// The quadratic part has its minimum at the centre `(cx, cy)`; the sine term
/// with amplitude `a` and frequency `w` adds local stationary points around it.
///
/// Gradient (closed form):
///
/// ```text
/// ∂f/∂x = 2(x - cx) + a·w·y·cos(w·x·y)
/// ∂f/∂y = 2(y - cy) + a·w·x·cos(w·x·y)
/// ```
///
/// # Example
///
/// ```
/// use odts_core::objective::{Objective, PerturbedQuadratic};
///
/// let f = PerturbedQuadratic::quadratic();
/// assert_eq!(f.value(&[1.0, 2.0]), 0.0);
/// assert_eq!(f.gradient(&[2.0, 2.0]), vec![2.0, 0.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerturbedQuadratic {
    centre: [f64; 2],
    amplitude: f64,
    frequency: f64,
}

impl PerturbedQuadratic {
    const REFERENCE_CENTRE: [f64; 2] = [1.0, 2.0];
    const REFERENCE_AMPLITUDE: f64 = 0.1;
    const REFERENCE_FREQUENCY: f64 = 10.0;

    /// Create an objective with an explicit centre, amplitude and frequency.
    pub fn new(centre: [f64; 2], amplitude: f64, frequency: f64) -> Self {
        Self {
            centre,
            amplitude,
            frequency,
        }
    }

    /// The reference instance `(x-1)² + (y-2)² + 0.1·sin(10xy)`.
    pub fn reference() -> Self {
        Self::new(
            Self::REFERENCE_CENTRE,
            Self::REFERENCE_AMPLITUDE,
            Self::REFERENCE_FREQUENCY,
        )
    }

    /// The unperturbed bowl `(x-1)² + (y-2)²`.
    pub fn quadratic() -> Self {
        Self::new(Self::REFERENCE_CENTRE, 0.0, Self::REFERENCE_FREQUENCY)
    }

    /// Replace the amplitude of the oscillatory term.
    pub fn with_amplitude(mut self, amplitude: f64) -> Self {
        self.amplitude = amplitude;
        self
    }

    /// Centre of the quadratic bowl.
    pub fn centre(&self) -> [f64; 2] {
        self.centre
    }

    /// Amplitude of the oscillatory term.
    pub fn amplitude(&self) -> f64 {
        self.amplitude
    }

    /// Frequency of the oscillatory term.
    pub fn frequency(&self) -> f64 {
        self.frequency
    }
}

impl Default for PerturbedQuadratic {
    fn default() -> Self {
        Self::reference()
    }
}

impl Objective for PerturbedQuadratic {
    fn dimension(&self) -> usize {
        2
    }

    fn value(&self, x: &[f64]) -> f64 {
        let dx = x[0] - self.centre[0];
        let dy = x[1] - self.centre[1];
        dx * dx + dy * dy + self.amplitude * (self.frequency * x[0] * x[1]).sin()
    }

    fn gradient(&self, x: &[f64]) -> Vec<f64> {
        let c = self.amplitude * self.frequency * (self.frequency * x[0] * x[1]).cos();
        vec![
            2.0 * (x[0] - self.centre[0]) + c * x[1],
            2.0 * (x[1] - self.centre[1]) + c * x[0],
        ]
    }

    fn variables(&self) -> Vec<String> {
        vec!["x".to_string(), "y".to_string()]
    }

    fn expression(&self) -> String {
        let [cx, cy] = self.centre;
        if self.amplitude == 0.0 {
            format!("(x-{})^2 + (y-{})^2", cx, cy)
        } else {
            format!(
                "(x-{})^2 + (y-{})^2 + {}*sin({}xy)",
                cx, cy, self.amplitude, self.frequency
            )
        }
    }
}
