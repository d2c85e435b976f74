//! # Statistics Tests
//!
//! Summary figures over the rendered subset of a trace.

use pipeviz_core::parse_records;
use pipeviz_core::stats::TimelineStats;

use crate::common::{SAMPLE_TRACE, record};

#[test]
fn test_sample_trace_summary() {
    let stats = TimelineStats::from_records(&parse_records(SAMPLE_TRACE.as_bytes()).unwrap());
    assert_eq!(stats.records, 5);
    assert_eq!(stats.rendered_rows, 4);
    assert_eq!(stats.first_issue, Some(1));
    assert_eq!(stats.last_writeback, Some(22));
    assert_eq!(stats.span_cycles(), Some(22));
    assert_eq!(stats.out_of_order, 0);
    assert_eq!(stats.omitted_start_bars, 0);
    // Latencies: 5, 9, 20, 5.
    let mean = stats.mean_latency.unwrap();
    assert!((mean - 9.75).abs() < 1e-9);
}

#[test]
fn test_leading_record_excluded() {
    // The NOP issues at cycle 0 but is not on the chart.
    let records = [record(0, "NOP", 0, 0, 0, 100), record(1, "FADD", 3, 4, 6, 7)];
    let stats = TimelineStats::from_records(&records);
    assert_eq!(stats.first_issue, Some(3));
    assert_eq!(stats.last_writeback, Some(7));
    assert_eq!(stats.span_cycles(), Some(5));
}

#[test]
fn test_inconsistent_records_counted() {
    let records = [
        record(0, "NOP", 0, 0, 0, 0),
        record(1, "A", 0, 5, 2, 6),
        record(2, "B", 0, 5, 4, 6),
        record(3, "C", 0, 1, 2, 3),
    ];
    let stats = TimelineStats::from_records(&records);
    assert_eq!(stats.out_of_order, 2);
    assert_eq!(stats.omitted_start_bars, 1);
}

#[test]
fn test_empty_and_single_record() {
    for records in [vec![], vec![record(0, "NOP", 0, 0, 0, 1)]] {
        let stats = TimelineStats::from_records(&records);
        assert_eq!(stats.rendered_rows, 0);
        assert_eq!(stats.first_issue, None);
        assert_eq!(stats.span_cycles(), None);
        assert_eq!(stats.mean_latency, None);
    }
}
