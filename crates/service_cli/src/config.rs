//! CLI configuration management.
//!
//! Handles loading of run configuration from TOML files with environment
//! variable override support. A missing file yields the defaults; a file that
//! exists but does not parse is an error.

use odts_core::objective::PerturbedQuadratic;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const DEFAULT_CONFIG_FILE: &str = "odts.toml";

/// Upper bound accepted for `max_iterations`
const MAX_ITERATIONS_LIMIT: usize = 1_000_000;

/// Built-in objective selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveKind {
    /// (x-1)^2 + (y-2)^2 + 0.1*sin(10xy)
    Reference,
    /// (x-1)^2 + (y-2)^2
    Quadratic,
}

impl Default for ObjectiveKind {
    fn default() -> Self {
        Self::Reference
    }
}

impl ObjectiveKind {
    /// Construct the objective.
    pub fn build(self) -> PerturbedQuadratic {
        match self {
            Self::Reference => PerturbedQuadratic::reference(),
            Self::Quadratic => PerturbedQuadratic::quadratic(),
        }
    }

    /// Parse a case-insensitive name.
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "reference" => Some(Self::Reference),
            "quadratic" => Some(Self::Quadratic),
            _ => None,
        }
    }
}

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CliConfig {
    /// Starting point
    #[serde(default = "default_initial_point")]
    pub initial_point: Vec<f64>,

    /// Iteration bound
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Objective to minimise
    #[serde(default)]
    pub objective: ObjectiveKind,

    /// Directory for audit artefacts
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File stem for audit artefacts
    #[serde(default = "default_file_stem")]
    pub file_stem: String,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_initial_point() -> Vec<f64> {
    vec![0.3, 0.8]
}

fn default_max_iterations() -> usize {
    20
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_stem() -> String {
    "odts".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            initial_point: default_initial_point(),
            max_iterations: default_max_iterations(),
            objective: ObjectiveKind::default(),
            output_dir: default_output_dir(),
            file_stem: default_file_stem(),
            log_level: default_log_level(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        Self::from_toml(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or return the defaults if it does not exist
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(max_iter) = std::env::var("ODTS_MAX_ITER") {
            if let Ok(max_iter) = max_iter.trim().parse() {
                self.max_iterations = max_iter;
            }
        }

        if let Ok(output_dir) = std::env::var("ODTS_OUTPUT_DIR") {
            self.output_dir = PathBuf::from(output_dir);
        }

        if let Ok(log_level) = std::env::var("ODTS_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(objective) = std::env::var("ODTS_OBJECTIVE") {
            self.objective = ObjectiveKind::parse(&objective).unwrap_or(self.objective);
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, valid_log_levels
            ));
        }

        if self.max_iterations == 0 {
            errors.push("max_iterations must be greater than 0".to_string());
        }
        if self.max_iterations > MAX_ITERATIONS_LIMIT {
            errors.push(format!(
                "max_iterations {} exceeds maximum allowed (1,000,000)",
                self.max_iterations
            ));
        }

        // Both built-in objectives are functions of (x, y)
        if self.initial_point.len() != 2 {
            errors.push(format!(
                "initial_point must have 2 coordinates, got {}",
                self.initial_point.len()
            ));
        }
        if self.initial_point.iter().any(|v| !v.is_finite()) {
            errors.push("initial_point coordinates must be finite".to_string());
        }

        if self.output_dir.as_os_str().is_empty() {
            errors.push("output_dir cannot be empty".to_string());
        }

        if self.file_stem.is_empty() {
            errors.push("file_stem cannot be empty".to_string());
        } else if self.file_stem.contains(['/', '\\']) {
            errors.push(format!(
                "file_stem '{}' must not contain path separators",
                self.file_stem
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Render the effective configuration as TOML
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

/// Configuration error type
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    Io(String),
    /// Parse error in config file
    Parse(String),
    /// Validation error
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(msg) => write!(f, "IO error: {}", msg),
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::Validation(errors) => write!(f, "Validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.initial_point, vec![0.3, 0.8]);
        assert_eq!(config.max_iterations, 20);
        assert_eq!(config.objective, ObjectiveKind::Reference);
        assert_eq!(config.file_stem, "odts");
    }

    #[test]
    fn test_default_config_validates() {
        assert!(CliConfig::default().validate().is_ok());
    }

    #[test]
    fn test_env_override() {
        std::env::set_var("ODTS_MAX_ITER", "7");
        std::env::set_var("ODTS_OBJECTIVE", "Quadratic");
        let config = CliConfig::default().with_env_override();
        std::env::remove_var("ODTS_MAX_ITER");
        std::env::remove_var("ODTS_OBJECTIVE");

        assert_eq!(config.max_iterations, 7);
        assert_eq!(config.objective, ObjectiveKind::Quadratic);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = CliConfig::from_toml(
            r#"
            initial_point = [2.5, 0.5]
            objective = "quadratic"
            "#,
        )
        .unwrap();
        assert_eq!(config.initial_point, vec![2.5, 0.5]);
        assert_eq!(config.objective, ObjectiveKind::Quadratic);
        assert_eq!(config.max_iterations, 20);
        assert_eq!(config.output_dir, PathBuf::from("."));
    }

    #[test]
    fn test_unknown_objective_is_parse_error() {
        let result = CliConfig::from_toml(r#"objective = "rosenbrock""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = CliConfig::load_or_default(Path::new("/nonexistent/odts.toml")).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_validate_invalid_log_level() {
        let mut config = CliConfig::default();
        config.log_level = "loud".to_string();

        if let Err(ConfigError::Validation(errors)) = config.validate() {
            assert!(errors.iter().any(|e| e.contains("log_level")));
        } else {
            panic!("Expected validation error");
        }
    }

    #[test]
    fn test_validate_multiple_errors() {
        let mut config = CliConfig::default();
        config.max_iterations = 0;
        config.initial_point = vec![f64::NAN];
        config.file_stem = "a/b".to_string();

        if let Err(ConfigError::Validation(errors)) = config.validate() {
            assert_eq!(errors.len(), 4, "{:?}", errors);
        } else {
            panic!("Expected validation error");
        }
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CliConfig::default();
        let text = config.to_toml().unwrap();
        assert_eq!(CliConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn test_objective_kind_parse() {
        assert_eq!(ObjectiveKind::parse("REFERENCE"), Some(ObjectiveKind::Reference));
        assert_eq!(ObjectiveKind::parse("cubic"), None);
        assert_eq!(ObjectiveKind::Quadratic.build().amplitude(), 0.0);
    }

    #[test]
    fn test_config_error_display() {
        let error = ConfigError::Validation(vec!["Error 1".to_string(), "Error 2".to_string()]);
        let display = format!("{}", error);
        assert!(display.contains("Error 1"));
        assert!(display.contains("Error 2"));
    }
}
