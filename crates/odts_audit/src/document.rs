//! JSON audit document.

use chrono::{DateTime, Utc};
use odts_core::objective::Objective;
use odts_core::optimiser::{IterationRecord, OptimisationOutcome, TerminalStatus};
use serde::{Deserialize, Serialize};

use crate::AuditError;

/// Default model label written into audit documents.
pub const DEFAULT_MODEL: &str = "ODTS v2.0 Multivariable";

/// Default compliance label written into audit documents.
pub const DEFAULT_COMPLIANCE: &str = "Survival Reserve Stress Minimization";

/// One trace entry as written to the audit document.
///
/// Non-finite numbers have no JSON representation; a residual of +∞ (singular
/// Newton system) is written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Iteration index
    pub iter: usize,
    /// Pre-step point
    pub x: Vec<f64>,
    /// Gradient at `x`
    pub grad: Vec<f64>,
    /// Residual, `None` when not finite
    pub res: Option<f64>,
    /// Terminal status (last record only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TerminalStatus>,
}

impl From<&IterationRecord> for AuditRecord {
    fn from(record: &IterationRecord) -> Self {
        Self {
            iter: record.iteration,
            x: record.point.clone(),
            grad: record.gradient.clone(),
            res: finite(record.residual),
            status: record.status,
        }
    }
}

/// Audit document for a single optimisation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditDocument {
    /// Model label
    pub model: String,
    /// Compliance label, omitted when unset
    #[serde(
        rename = "biological_compliance",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub compliance: Option<String>,
    /// Export time (UTC)
    pub timestamp: DateTime<Utc>,
    /// Objective expression
    pub function: String,
    /// Objective variable names
    pub variables: Vec<String>,
    /// Terminal status of the run
    pub status: TerminalStatus,
    /// Returned point
    pub optimal: Vec<f64>,
    /// Objective value at `optimal`, `None` when not finite
    pub objective_value: Option<f64>,
    /// Number of recorded iterations
    pub iterations: usize,
    /// Full iteration trace
    pub trace: Vec<AuditRecord>,
}

impl AuditDocument {
    /// Build a document from an objective and the outcome of running it.
    pub fn new<O: Objective + ?Sized>(objective: &O, outcome: &OptimisationOutcome) -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            compliance: Some(DEFAULT_COMPLIANCE.to_string()),
            timestamp: Utc::now(),
            function: objective.expression(),
            variables: objective.variables(),
            status: outcome.status,
            optimal: outcome.point.clone(),
            objective_value: finite(objective.value(&outcome.point)),
            iterations: outcome.iterations(),
            trace: outcome.trace.iter().map(AuditRecord::from).collect(),
        }
    }

    /// Replace the model label.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Replace the compliance label.
    pub fn with_compliance(mut self, label: impl Into<String>) -> Self {
        self.compliance = Some(label.into());
        self
    }

    /// Drop the compliance label from the document.
    pub fn without_compliance(mut self) -> Self {
        self.compliance = None;
        self
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, AuditError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document previously produced by [`AuditDocument::to_json`].
    pub fn from_json(json: &str) -> Result<Self, AuditError> {
        Ok(serde_json::from_str(json)?)
    }
}

fn finite(v: f64) -> Option<f64> {
    v.is_finite().then_some(v)
}
