//! Iteration records and run outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Terminal state of an optimisation run.
///
/// Exactly one record of a finished trace carries a status: the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TerminalStatus {
    /// Residual fell below the tolerance
    Converged,
    /// Consecutive residual ratio exceeded the divergence ratio
    Diverged,
    /// Iteration bound reached without either of the above
    MaxIter,
}

impl TerminalStatus {
    /// Audit tag of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TerminalStatus::Converged => "CONVERGED",
            TerminalStatus::Diverged => "DIVERGED",
            TerminalStatus::MaxIter => "MAX_ITER",
        }
    }
}

impl fmt::Display for TerminalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// State of one completed iteration, as evaluated before the step is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// Zero-based iteration index
    pub iteration: usize,
    /// Point at which the gradient was evaluated (pre-step)
    pub point: Vec<f64>,
    /// Gradient at `point`
    pub gradient: Vec<f64>,
    /// Euclidean norm of `gradient`, or +∞ when the Newton system was singular
    pub residual: f64,
    /// Terminal status; set on the last record only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TerminalStatus>,
}

/// Result of [`NewtonOptimiser::run`](super::NewtonOptimiser::run).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimisationOutcome {
    /// Returned point.
    ///
    /// On CONVERGED or DIVERGED this is the pre-step point of the terminal
    /// iteration; on MAX_ITER it is the point after the final step.
    pub point: Vec<f64>,
    /// How the run ended
    pub status: TerminalStatus,
    /// Append-only iteration trace
    pub trace: Vec<IterationRecord>,
}

impl OptimisationOutcome {
    /// Whether the run ended CONVERGED.
    pub fn converged(&self) -> bool {
        self.status == TerminalStatus::Converged
    }

    /// Number of recorded iterations.
    pub fn iterations(&self) -> usize {
        self.trace.len()
    }

    /// Residual series in iteration order.
    pub fn residuals(&self) -> Vec<f64> {
        self.trace.iter().map(|r| r.residual).collect()
    }

    /// The terminal record.
    ///
    /// # Panics
    ///
    /// Never for outcomes produced by the optimiser, whose traces are non-empty.
    pub fn final_record(&self) -> &IterationRecord {
        self.trace
            .last()
            .expect("optimiser traces always hold at least one record")
    }
}
