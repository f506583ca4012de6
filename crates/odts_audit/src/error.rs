//! Error types for audit export.

use thiserror::Error;

/// Audit export error type
#[derive(Debug, Error)]
pub enum AuditError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialisation error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV serialisation error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Nothing to export
    #[error("Trace is empty")]
    EmptyTrace,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(AuditError::EmptyTrace.to_string(), "Trace is empty");

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing dir");
        let err: AuditError = io.into();
        assert!(err.to_string().contains("missing dir"));
    }
}
