//! # odts_audit: Audit Trail Export
//!
//! Serialises the iteration trace of an optimisation run for review. The
//! optimiser itself performs no I/O; this crate is the sink it hands results to.
//!
//! ## Modules
//!
//! - [`document`]: JSON audit document (run metadata plus full trace)
//! - [`csv_trace`]: Tabular trace, one row per iteration
//! - [`sink`]: The [`AuditSink`] trait and its file-backed implementation
//!
//! ## Example
//!
//! ```
//! use odts_audit::AuditDocument;
//! use odts_core::objective::PerturbedQuadratic;
//! use odts_core::optimiser::NewtonOptimiser;
//!
//! let objective = PerturbedQuadratic::reference();
//! let outcome = NewtonOptimiser::with_defaults(objective).run(&[1.05, 1.95]).unwrap();
//!
//! let doc = AuditDocument::new(&objective, &outcome);
//! let json = doc.to_json().unwrap();
//! assert!(json.contains("\"status\": \"CONVERGED\""));
//! ```

pub mod csv_trace;
pub mod document;
mod error;
pub mod sink;

pub use document::{AuditDocument, AuditRecord};
pub use error::AuditError;
pub use sink::{AuditSink, ExportedFiles, FileSink};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::csv_trace::write_trace;
    pub use crate::document::{AuditDocument, AuditRecord};
    pub use crate::error::AuditError;
    pub use crate::sink::{AuditSink, ExportedFiles, FileSink};
}
