//! Timing record loader.
//!
//! This module reads a headerless, comma-separated table into [`InstructionTimingRecord`]s. It performs:
//! 1. **Row splitting:** Standard CSV quoting, so a quoted mnemonic may contain commas.
//! 2. **Field conversion:** Columns 0 and 2..=5 become integers; column 1 is kept verbatim.
//! 3. **Atomic failure:** The first bad row aborts the load; callers get every record or none.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::common::error::{RecordFault, Result, TimelineError};
use crate::record::InstructionTimingRecord;

/// Number of columns a row must carry. Extra trailing columns are ignored.
pub const FIELD_COUNT: usize = 6;

/// Loads every record from the file at `path`, in row order.
///
/// The file is closed before this returns, on success and on error.
///
/// # Errors
///
/// [`TimelineError::SourceUnavailable`] if the file cannot be opened, and
/// [`TimelineError::MalformedRecord`] for the first row that cannot be parsed.
pub fn load_records(path: impl AsRef<Path>) -> Result<Vec<InstructionTimingRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| TimelineError::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(file)?;
    debug!(path = %path.display(), count = records.len(), "loaded timing records");
    Ok(records)
}

/// Parses records from any reader, in row order.
///
/// There is no header row: the first line is a record. A blank line is a row with no
/// fields and fails like any other short row.
///
/// # Errors
///
/// [`TimelineError::MalformedRecord`] for the first row that cannot be parsed.
pub fn parse_records<R: Read>(mut reader: R) -> Result<Vec<InstructionTimingRecord>> {
    let mut input = Vec::new();
    if let Err(err) = reader.read_to_end(&mut input) {
        return Err(TimelineError::MalformedRecord {
            row: line_at(&input, input.len()),
            fault: RecordFault::Unreadable {
                reason: err.to_string(),
            },
        });
    }

    // The csv reader drops empty lines, so rows up to the first blank one are read
    // on their own and the blank row is reported afterwards.
    let blank = first_blank_line(&input);
    let body = blank.map_or(&input[..], |offset| &input[..offset]);
    let records = parse_rows(body)?;
    match blank {
        Some(offset) => Err(TimelineError::MalformedRecord {
            row: line_at(&input, offset),
            fault: RecordFault::MissingFields { found: 0 },
        }),
        None => Ok(records),
    }
}

fn parse_rows(input: &[u8]) -> Result<Vec<InstructionTimingRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    let mut records = Vec::new();
    let mut row: u64 = 0;
    for result in rdr.records() {
        row += 1;
        let raw = result.map_err(|err| TimelineError::MalformedRecord {
            row: err.position().map_or(row, csv::Position::line),
            fault: RecordFault::Unreadable {
                reason: err.to_string(),
            },
        })?;
        let line = raw.position().map_or(row, csv::Position::line);
        let record = parse_row(&raw).map_err(|fault| TimelineError::MalformedRecord {
            row: line,
            fault,
        })?;
        records.push(record);
    }
    Ok(records)
}

/// Byte offset of the first empty line outside a quoted field.
///
/// A line is empty when its terminator (`\n` or `\r\n`) follows the previous terminator
/// directly. The position after a final terminator is end of input, not a line.
fn first_blank_line(input: &[u8]) -> Option<usize> {
    let mut line_start = true;
    let mut field_start = true;
    let mut quoted = false;
    let mut i = 0;
    while let Some(&byte) = input.get(i) {
        if quoted {
            if byte == b'"' {
                if input.get(i + 1) == Some(&b'"') {
                    i += 1;
                } else {
                    quoted = false;
                }
            }
            i += 1;
            continue;
        }
        let crlf = byte == b'\r' && input.get(i + 1) == Some(&b'\n');
        if line_start && (byte == b'\n' || crlf) {
            return Some(i);
        }
        match byte {
            b'\n' => {
                line_start = true;
                field_start = true;
            }
            b'\r' => {}
            b',' => {
                line_start = false;
                field_start = true;
            }
            b'"' if field_start => {
                line_start = false;
                field_start = false;
                quoted = true;
            }
            _ => {
                line_start = false;
                field_start = false;
            }
        }
        i += 1;
    }
    None
}

/// 1-based line number of byte `offset`.
fn line_at(input: &[u8], offset: usize) -> u64 {
    let newlines = input[..offset].iter().filter(|&&b| b == b'\n').count();
    newlines as u64 + 1
}

/// Converts one split row into a record.
fn parse_row(raw: &StringRecord) -> std::result::Result<InstructionTimingRecord, RecordFault> {
    if raw.len() < FIELD_COUNT {
        return Err(RecordFault::MissingFields { found: raw.len() });
    }
    Ok(InstructionTimingRecord {
        index: int_field(raw, 0, "index")?,
        mnemonic: raw[1].to_string(),
        issue: int_field(raw, 2, "issue")?,
        start: int_field(raw, 3, "start")?,
        complete: int_field(raw, 4, "complete")?,
        writeback: int_field(raw, 5, "writeback")?,
    })
}

/// Parses column `i` as an integer. Surrounding whitespace and a leading sign are accepted.
fn int_field(
    raw: &StringRecord,
    i: usize,
    field: &'static str,
) -> std::result::Result<i64, RecordFault> {
    let text = &raw[i];
    text.trim()
        .parse::<i64>()
        .map_err(|_| RecordFault::InvalidInteger {
            field,
            value: text.to_string(),
        })
}
