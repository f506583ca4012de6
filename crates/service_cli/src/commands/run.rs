//! Run command implementation
//!
//! Runs one Newton optimisation and exports its audit trail through odts_audit.

use std::path::PathBuf;

use odts_audit::{AuditDocument, AuditSink, ExportedFiles, FileSink};
use odts_core::optimiser::{NewtonConfig, NewtonOptimiser, OptimisationOutcome};
use tracing::{info, warn};

use crate::config::{CliConfig, ObjectiveKind};
use crate::{CliError, Result};

/// Command line overrides for a single run
#[derive(Debug, Clone, Default)]
pub struct RunOverrides {
    /// Starting point
    pub x0: Option<Vec<f64>>,
    /// Iteration bound
    pub max_iterations: Option<usize>,
    /// Objective selection
    pub objective: Option<ObjectiveKind>,
    /// Directory for audit artefacts
    pub output_dir: Option<PathBuf>,
    /// Skip the audit export
    pub no_export: bool,
}

impl RunOverrides {
    /// Merge into `config`, command line taking precedence.
    pub fn apply(&self, mut config: CliConfig) -> CliConfig {
        if let Some(x0) = &self.x0 {
            config.initial_point = x0.clone();
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(objective) = self.objective {
            config.objective = objective;
        }
        if let Some(output_dir) = &self.output_dir {
            config.output_dir = output_dir.clone();
        }
        config
    }
}

/// What a run produced
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Optimiser result
    pub outcome: OptimisationOutcome,
    /// Exported artefacts, `None` when export was skipped
    pub exported: Option<ExportedFiles>,
}

/// Run the run command
pub fn run(config: CliConfig, overrides: &RunOverrides) -> Result<RunReport> {
    let config = overrides.apply(config);
    config.validate()?;

    info!("Starting optimisation...");
    info!("  Objective: {:?}", config.objective);
    info!("  Initial point: {:?}", config.initial_point);
    info!("  Max iterations: {}", config.max_iterations);

    let objective = config.objective.build();
    let newton = NewtonConfig::default().with_max_iterations(config.max_iterations);
    let outcome = NewtonOptimiser::new(objective, newton).run(&config.initial_point)?;

    let last = outcome.final_record();
    info!(
        status = %outcome.status,
        iterations = outcome.iterations(),
        residual = last.residual,
        "Run complete"
    );
    info!("  Final point: {:?}", outcome.point);
    if !outcome.converged() {
        warn!("Run did not converge ({})", outcome.status);
    }

    let exported = if overrides.no_export {
        info!("Audit export skipped");
        None
    } else {
        let doc = AuditDocument::new(&objective, &outcome);
        let sink = FileSink::new(&config.output_dir).with_file_stem(config.file_stem.as_str());
        Some(sink.export(&doc)?)
    };

    Ok(RunReport { outcome, exported })
}

/// Parse a comma separated point such as `0.3,0.8`.
pub fn parse_point(text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .map(|part| {
            part.trim().parse::<f64>().map_err(|e| {
                CliError::invalid_argument(format!("Invalid coordinate '{}': {}", part.trim(), e))
            })
        })
        .collect()
}
