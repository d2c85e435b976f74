//! Instruction timing records.
//!
//! A record is one instruction's complete timing data: the clock cycle at which it entered
//! each of the four tracked pipeline stages, plus the index and mnemonic used to label it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Pipeline stages tracked per instruction, in pipeline order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Instruction issued to a functional unit.
    Issue,
    /// Execution started.
    Start,
    /// Execution completed.
    Complete,
    /// Result written back.
    Writeback,
}

impl Stage {
    /// All stages in pipeline order; also the legend order.
    pub const ALL: [Self; 4] = [Self::Issue, Self::Start, Self::Complete, Self::Writeback];

    /// Lowercase stage name used in legends and reports.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Issue => "issue",
            Self::Start => "start",
            Self::Complete => "complete",
            Self::Writeback => "writeback",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One row of timing input.
///
/// A physically meaningful record satisfies `issue <= start <= complete <= writeback`, but
/// nothing here enforces it; see [`InstructionTimingRecord::is_ordered`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstructionTimingRecord {
    /// Sequence number for display. Not necessarily contiguous or sorted.
    pub index: i64,
    /// Opcode and operands as a display string, kept verbatim.
    pub mnemonic: String,
    /// Cycle at which the instruction was issued.
    pub issue: i64,
    /// Cycle at which execution started.
    pub start: i64,
    /// Cycle at which execution completed.
    pub complete: i64,
    /// Cycle at which the result was written back.
    pub writeback: i64,
}

impl InstructionTimingRecord {
    /// Creates a record from its six fields.
    pub fn new(
        index: i64,
        mnemonic: impl Into<String>,
        issue: i64,
        start: i64,
        complete: i64,
        writeback: i64,
    ) -> Self {
        Self {
            index,
            mnemonic: mnemonic.into(),
            issue,
            start,
            complete,
            writeback,
        }
    }

    /// Cycle at which the instruction entered `stage`.
    pub const fn cycle(&self, stage: Stage) -> i64 {
        match stage {
            Stage::Issue => self.issue,
            Stage::Start => self.start,
            Stage::Complete => self.complete,
            Stage::Writeback => self.writeback,
        }
    }

    /// Length of the execution interval, `complete - start + 1`.
    ///
    /// Negative when completion precedes the cycle before start. `None` on overflow.
    pub const fn execution_cycles(&self) -> Option<i64> {
        match self.complete.checked_sub(self.start) {
            Some(d) => d.checked_add(1),
            None => None,
        }
    }

    /// Whether the four stage cycles are non-decreasing in pipeline order.
    pub const fn is_ordered(&self) -> bool {
        self.issue <= self.start && self.start <= self.complete && self.complete <= self.writeback
    }

    /// Display label: `"{index}: {mnemonic}"`.
    pub fn label(&self) -> String {
        format!("{}: {}", self.index, self.mnemonic)
    }
}
