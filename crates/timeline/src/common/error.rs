//! Error definitions.
//!
//! This module defines every failure a run can hit. It provides:
//! 1. **Input errors:** The timing source is missing, unreadable, or holds a malformed row.
//! 2. **Output errors:** The chart or an export cannot be written to its destination.
//! 3. **Configuration errors:** A chart configuration file is unreadable or out of range.
//!
//! All of them are terminal for a run; nothing is retried and no partial output is produced.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result alias used by every fallible operation in the crate.
pub type Result<T> = std::result::Result<T, TimelineError>;

/// Errors raised while loading records, rendering, or exporting.
#[derive(Debug, Error)]
pub enum TimelineError {
    /// The timing input could not be opened for reading.
    #[error("cannot open timing source '{}': {source}", .path.display())]
    SourceUnavailable {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A row of the timing input does not describe a record.
    ///
    /// `row` is 1-based and counts physical lines of the input.
    #[error("malformed record at row {row}: {fault}")]
    MalformedRecord {
        /// 1-based row number of the offending line.
        row: u64,
        /// What is wrong with the row.
        fault: RecordFault,
    },

    /// The chart or an export could not be written.
    #[error("cannot write '{}': {reason}", .path.display())]
    OutputWrite {
        /// Destination path.
        path: PathBuf,
        /// Human-readable cause (backend or I/O message).
        reason: String,
    },

    /// A chart configuration is unreadable or holds an out-of-range value.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Human-readable cause.
        reason: String,
    },
}

impl TimelineError {
    /// Builds a [`TimelineError::OutputWrite`] from any displayable cause.
    pub fn output(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::OutputWrite {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns `true` for [`TimelineError::MalformedRecord`].
    pub const fn is_malformed_record(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}

/// Reasons a single input row is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordFault {
    /// The row has fewer than the six required fields.
    #[error("expected 6 fields, found {found}")]
    MissingFields {
        /// Number of fields present.
        found: usize,
    },

    /// An integer column holds text that is not an integer.
    #[error("field '{field}' is not an integer: {value:?}")]
    InvalidInteger {
        /// Column name (`index`, `issue`, `start`, `complete`, `writeback`).
        field: &'static str,
        /// Raw field text.
        value: String,
    },

    /// The row could not be decoded (bad UTF-8 or broken quoting).
    #[error("unreadable row: {reason}")]
    Unreadable {
        /// Decoder message.
        reason: String,
    },
}
