//! Record export.
//!
//! Loaded records can be saved as a pretty-printed JSON array or as headerless CSV in the
//! same six-column shape the loader reads, so an export can be fed straight back in.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::debug;

use crate::common::error::{Result, TimelineError};
use crate::record::InstructionTimingRecord;

/// Writes `records` to `path` as a JSON array, replacing any existing file.
///
/// # Errors
///
/// [`TimelineError::OutputWrite`] if the file cannot be created or written.
pub fn write_json(records: &[InstructionTimingRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let fail = |e: &dyn std::fmt::Display| TimelineError::output(path, e);
    let file = File::create(path).map_err(|e| fail(&e))?;
    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, records).map_err(|e| fail(&e))?;
    out.write_all(b"\n").map_err(|e| fail(&e))?;
    out.flush().map_err(|e| fail(&e))?;
    debug!(path = %path.display(), count = records.len(), "exported records as JSON");
    Ok(())
}

/// Writes `records` to `path` as headerless CSV, replacing any existing file.
///
/// # Errors
///
/// [`TimelineError::OutputWrite`] if the file cannot be created or written.
pub fn write_csv(records: &[InstructionTimingRecord], path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let fail = |e: &dyn std::fmt::Display| TimelineError::output(path, e);
    let file = File::create(path).map_err(|e| fail(&e))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);
    for r in records {
        writer
            .write_record([
                r.index.to_string(),
                r.mnemonic.clone(),
                r.issue.to_string(),
                r.start.to_string(),
                r.complete.to_string(),
                r.writeback.to_string(),
            ])
            .map_err(|e| fail(&e))?;
    }
    writer.flush().map_err(|e| fail(&e))?;
    debug!(path = %path.display(), count = records.len(), "exported records as CSV");
    Ok(())
}
