//! Tabular iteration trace.
//!
//! One row per iteration: `iter, x0..x{n-1}, g0..g{n-1}, res, status`. The
//! status column is blank except on the terminal row.

use std::io::Write;

use crate::{AuditDocument, AuditError};

/// Written in place of a non-finite residual.
const INFINITE_RESIDUAL: &str = "inf";

/// Header row for an `n`-dimensional trace.
pub fn header(n: usize) -> Vec<String> {
    let mut row = Vec::with_capacity(2 * n + 3);
    row.push("iter".to_string());
    row.extend((0..n).map(|i| format!("x{}", i)));
    row.extend((0..n).map(|i| format!("g{}", i)));
    row.push("res".to_string());
    row.push("status".to_string());
    row
}

/// Write the trace of `doc` as CSV.
///
/// # Errors
///
/// * `AuditError::EmptyTrace` - The document has no iterations
/// * `AuditError::Csv` - Writer failure
pub fn write_trace<W: Write>(writer: W, doc: &AuditDocument) -> Result<(), AuditError> {
    let first = doc.trace.first().ok_or(AuditError::EmptyTrace)?;
    let n = first.x.len();

    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(header(n))?;

    for record in &doc.trace {
        let mut row = Vec::with_capacity(2 * n + 3);
        row.push(record.iter.to_string());
        row.extend(record.x.iter().map(|v| v.to_string()));
        row.extend(record.grad.iter().map(|v| v.to_string()));
        row.push(match record.res {
            Some(res) => res.to_string(),
            None => INFINITE_RESIDUAL.to_string(),
        });
        row.push(record.status.map(|s| s.as_str().to_string()).unwrap_or_default());
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}
