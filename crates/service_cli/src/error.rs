//! CLI error types.

use odts_audit::AuditError;
use odts_core::types::OptimiserError;
use thiserror::Error;

use crate::config::ConfigError;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Invalid command line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Optimiser rejected its input
    #[error("Optimiser error: {0}")]
    Optimiser(#[from] OptimiserError),

    /// Audit export failed
    #[error("Audit export error: {0}")]
    Audit(#[from] AuditError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// System check failed
    #[error("Check failed: {0}")]
    Check(String),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}

/// Result alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
