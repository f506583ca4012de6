//! Audit sinks.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::csv_trace::write_trace;
use crate::{AuditDocument, AuditError};

/// Default file stem for exported artefacts.
pub const DEFAULT_FILE_STEM: &str = "odts";

/// Paths of the artefacts produced by one export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFiles {
    /// JSON audit document
    pub json_path: PathBuf,
    /// CSV iteration trace
    pub csv_path: PathBuf,
}

/// Destination for audit documents.
pub trait AuditSink {
    /// Persist `doc`, returning the artefacts written.
    fn export(&self, doc: &AuditDocument) -> Result<ExportedFiles, AuditError>;
}

/// Writes `<stem>_audit.json` and `<stem>_trace.csv` into a directory.
#[derive(Debug, Clone)]
pub struct FileSink {
    output_dir: PathBuf,
    file_stem: String,
}

impl FileSink {
    /// Create a sink for `output_dir` using the default file stem.
    ///
    /// The directory is created on first export if it does not exist.
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            file_stem: DEFAULT_FILE_STEM.to_string(),
        }
    }

    /// Replace the file stem.
    pub fn with_file_stem(mut self, stem: impl Into<String>) -> Self {
        self.file_stem = stem.into();
        self
    }

    /// Output directory
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path of the JSON document.
    pub fn json_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_audit.json", self.file_stem))
    }

    /// Path of the CSV trace.
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}_trace.csv", self.file_stem))
    }
}

impl AuditSink for FileSink {
    fn export(&self, doc: &AuditDocument) -> Result<ExportedFiles, AuditError> {
        if doc.trace.is_empty() {
            return Err(AuditError::EmptyTrace);
        }
        fs::create_dir_all(&self.output_dir)?;

        let json_path = self.json_path();
        let json = doc.to_json()?;
        fs::write(&json_path, &json)?;
        info!(
            path = %json_path.display(),
            size = json.len(),
            "Audit document written"
        );

        let csv_path = self.csv_path();
        write_trace(BufWriter::new(File::create(&csv_path)?), doc)?;
        info!(
            path = %csv_path.display(),
            rows = doc.trace.len(),
            "Trace written"
        );

        Ok(ExportedFiles {
            json_path,
            csv_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_use_stem() {
        let sink = FileSink::new("/tmp/odts").with_file_stem("run42");
        assert_eq!(sink.output_dir(), Path::new("/tmp/odts"));
        assert_eq!(sink.json_path(), PathBuf::from("/tmp/odts/run42_audit.json"));
        assert_eq!(sink.csv_path(), PathBuf::from("/tmp/odts/run42_trace.csv"));
    }

    #[test]
    fn test_default_stem() {
        let sink = FileSink::new(".");
        assert!(sink.json_path().ends_with("odts_audit.json"));
        assert!(sink.csv_path().ends_with("odts_trace.csv"));
    }
}
