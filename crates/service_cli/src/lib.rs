//! odts CLI - Command Line Operations for the Newton Optimiser
//!
//! Library half of the `odts` binary: configuration, errors and command
//! implementations, kept here so they can be exercised from integration tests.
//!
//! # Commands
//!
//! - `odts run` - Run one optimisation and export the audit trail
//! - `odts check` - Validate configuration and smoke-test the optimiser

pub mod commands;
pub mod config;
mod error;

pub use error::{CliError, Result};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::commands::run::{RunOverrides, RunReport};
    pub use crate::config::{CliConfig, ConfigError, ObjectiveKind, DEFAULT_CONFIG_FILE};
    pub use crate::error::{CliError, Result};
}
