//! Timeline layout.
//!
//! This module places records on the chart without touching any drawing backend. It computes:
//! 1. **Rows:** One row per rendered record, stacked bottom-up by sequence position.
//! 2. **Bars:** Up to four stage intervals per row on the shared cycle axis.
//! 3. **Extents:** The cycle and vertical ranges the chart must cover.
//!
//! The first record of the sequence is never laid out; see [`SKIPPED_LEADING_RECORDS`].

use tracing::debug;

use crate::config::LayoutConfig;
use crate::record::{InstructionTimingRecord, Stage};

/// Records dropped from the front of the sequence before layout.
///
/// Row 0 of the input never appears on the chart. Existing traces and charts depend on this
/// offset, so it is kept even though it may have been meant to skip a header row.
pub const SKIPPED_LEADING_RECORDS: usize = 1;

/// Cycle at which row labels are anchored (right-aligned, left of the axis origin).
pub const LABEL_ANCHOR_CYCLE: i64 = -1;

/// One stage interval `[start, start + width)` on the cycle axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bar {
    /// Stage this bar depicts; selects its color.
    pub stage: Stage,
    /// First cycle covered.
    pub start: i64,
    /// Length in cycles. Zero-width bars are kept.
    pub width: i64,
}

impl Bar {
    /// Unit-width bar at `cycle`.
    pub const fn unit(stage: Stage, cycle: i64) -> Self {
        Self {
            stage,
            start: cycle,
            width: 1,
        }
    }

    /// Exclusive end cycle.
    pub const fn end(&self) -> i64 {
        self.start.saturating_add(self.width)
    }
}

/// One chart row.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineRow {
    /// Position among rendered rows (0 is the bottom row).
    pub position: usize,
    /// The record's `index` field.
    pub record_index: i64,
    /// Text shown left of the axis.
    pub label: String,
    /// Bottom edge in chart units.
    pub y: f64,
    /// Row height in chart units.
    pub height: f64,
    /// Stage intervals in [`Stage::ALL`] order; the start bar may be missing.
    pub bars: Vec<Bar>,
}

impl TimelineRow {
    /// Vertical center, where the label is placed.
    pub fn center(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// The bar for `stage`, if it was laid out.
    pub fn bar(&self, stage: Stage) -> Option<&Bar> {
        self.bars.iter().find(|b| b.stage == stage)
    }
}

/// Complete placement of a chart.
#[derive(Clone, Debug, PartialEq)]
pub struct TimelineLayout {
    /// Rendered rows, bottom-up.
    pub rows: Vec<TimelineRow>,
    /// Geometry the rows were placed with.
    pub geometry: LayoutConfig,
}

impl TimelineLayout {
    /// Lays out `records`, skipping the leading record.
    ///
    /// Vertical position follows sequence position only. A start bar whose duration
    /// `complete - start + 1` is negative is left out of its row.
    pub fn build(records: &[InstructionTimingRecord], geometry: &LayoutConfig) -> Self {
        let rows = records
            .iter()
            .skip(SKIPPED_LEADING_RECORDS)
            .enumerate()
            .map(|(position, record)| Self::row(position, record, geometry))
            .collect();
        Self {
            rows,
            geometry: *geometry,
        }
    }

    fn row(
        position: usize,
        record: &InstructionTimingRecord,
        geometry: &LayoutConfig,
    ) -> TimelineRow {
        let mut bars = Vec::with_capacity(Stage::ALL.len());
        bars.push(Bar::unit(Stage::Issue, record.issue));
        match record.execution_cycles() {
            Some(width) if width >= 0 => bars.push(Bar {
                stage: Stage::Start,
                start: record.start,
                width,
            }),
            _ => debug!(
                index = record.index,
                start = record.start,
                complete = record.complete,
                "omitting start bar: completion precedes start"
            ),
        }
        bars.push(Bar::unit(Stage::Complete, record.complete));
        bars.push(Bar::unit(Stage::Writeback, record.writeback));

        TimelineRow {
            position,
            record_index: record.index,
            label: record.label(),
            y: position as f64 * geometry.pitch(),
            height: geometry.row_height,
            bars,
        }
    }

    /// Number of rendered rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no row is rendered.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest bar start and latest bar end over all rows.
    pub fn cycle_span(&self) -> Option<(i64, i64)> {
        let bars = self.rows.iter().flat_map(|r| r.bars.iter());
        let lo = bars.clone().map(|b| b.start).min()?;
        let hi = bars.map(Bar::end).max()?;
        Some((lo, hi))
    }

    /// Cycle axis range: from the label anchor (or an earlier bar) to one cycle past the last bar.
    pub fn x_range(&self) -> (i64, i64) {
        self.cycle_span().map_or((LABEL_ANCHOR_CYCLE, 1), |(lo, hi)| {
            (lo.min(LABEL_ANCHOR_CYCLE), hi.saturating_add(1))
        })
    }

    /// Vertical range: from 0 to the top of the last row (one row height when empty).
    pub fn y_range(&self) -> (f64, f64) {
        let top = self
            .rows
            .last()
            .map_or(self.geometry.row_height, |r| r.y + r.height);
        (0.0, top)
    }
}
