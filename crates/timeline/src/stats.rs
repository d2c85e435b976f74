//! Timeline summary statistics.
//!
//! This module summarizes the records a chart shows. It reports:
//! 1. **Extent:** First issue cycle, last writeback cycle, and the span between them.
//! 2. **Latency:** Mean issue-to-writeback latency per instruction.
//! 3. **Consistency:** Records with out-of-order stages and records whose start bar is omitted.
//!
//! Statistics cover the same subset the renderer draws, so the leading record is excluded.

use crate::layout::SKIPPED_LEADING_RECORDS;
use crate::record::InstructionTimingRecord;

/// Summary of the rendered subset of a trace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TimelineStats {
    /// Records in the input sequence.
    pub records: usize,
    /// Rows drawn on the chart.
    pub rendered_rows: usize,
    /// Earliest issue cycle among rendered rows.
    pub first_issue: Option<i64>,
    /// Latest writeback cycle among rendered rows.
    pub last_writeback: Option<i64>,
    /// Rendered rows whose stage cycles are not non-decreasing.
    pub out_of_order: usize,
    /// Rendered rows drawn without a start bar.
    pub omitted_start_bars: usize,
    /// Mean of `writeback - issue + 1` over rendered rows.
    pub mean_latency: Option<f64>,
}

impl TimelineStats {
    /// Computes statistics for `records`.
    pub fn from_records(records: &[InstructionTimingRecord]) -> Self {
        let shown = records.get(SKIPPED_LEADING_RECORDS..).unwrap_or_default();
        let latency_sum: f64 = shown
            .iter()
            .map(|r| (r.writeback as f64) - (r.issue as f64) + 1.0)
            .sum();

        Self {
            records: records.len(),
            rendered_rows: shown.len(),
            first_issue: shown.iter().map(|r| r.issue).min(),
            last_writeback: shown.iter().map(|r| r.writeback).max(),
            out_of_order: shown.iter().filter(|r| !r.is_ordered()).count(),
            omitted_start_bars: shown
                .iter()
                .filter(|r| !r.execution_cycles().is_some_and(|d| d >= 0))
                .count(),
            mean_latency: (!shown.is_empty()).then(|| latency_sum / shown.len() as f64),
        }
    }

    /// Cycles from the first issue to the last writeback, inclusive.
    pub fn span_cycles(&self) -> Option<i64> {
        let (first, last) = (self.first_issue?, self.last_writeback?);
        last.checked_sub(first)?.checked_add(1)
    }

    /// Prints the report to stdout.
    pub fn print(&self) {
        let opt = |v: Option<i64>| v.map_or_else(|| "-".to_string(), |c| c.to_string());
        println!("\n==========================================================");
        println!("PIPELINE TIMELINE SUMMARY");
        println!("==========================================================");
        println!("records                  {}", self.records);
        println!("rendered_rows            {}", self.rendered_rows);
        println!("first_issue              {}", opt(self.first_issue));
        println!("last_writeback           {}", opt(self.last_writeback));
        println!("span_cycles              {}", opt(self.span_cycles()));
        match self.mean_latency {
            Some(l) => println!("mean_latency             {l:.2} cycles"),
            None => println!("mean_latency             -"),
        }
        println!("----------------------------------------------------------");
        println!("out_of_order             {}", self.out_of_order);
        println!("omitted_start_bars       {}", self.omitted_start_bars);
        println!("==========================================================");
    }
}
