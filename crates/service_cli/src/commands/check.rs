//! Check command implementation
//!
//! Validates the effective configuration and smoke-tests the optimiser.

use odts_core::objective::PerturbedQuadratic;
use odts_core::optimiser::NewtonOptimiser;
use tracing::{error, info};

use crate::config::CliConfig;
use crate::{CliError, Result};

/// Start used for the optimiser smoke test; converges in a handful of steps.
const SMOKE_TEST_START: [f64; 2] = [1.05, 1.95];

/// Run the check command
pub fn run(config: &CliConfig) -> Result<()> {
    info!("Checking configuration...");
    for line in config.to_toml()?.lines() {
        info!("  {}", line);
    }

    if let Err(e) = config.validate() {
        error!("{}", e);
        return Err(e.into());
    }
    info!("Configuration OK");

    let outcome =
        NewtonOptimiser::with_defaults(PerturbedQuadratic::reference()).run(&SMOKE_TEST_START)?;
    if !outcome.converged() {
        return Err(CliError::Check(format!(
            "optimiser smoke test ended {} after {} iterations",
            outcome.status,
            outcome.iterations()
        )));
    }
    info!(
        iterations = outcome.iterations(),
        "Optimiser smoke test converged"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_default_config() {
        assert!(run(&CliConfig::default()).is_ok());
    }

    #[test]
    fn test_check_reports_invalid_config() {
        let mut config = CliConfig::default();
        config.max_iterations = 0;
        assert!(matches!(run(&config), Err(CliError::Config(_))));
    }
}
