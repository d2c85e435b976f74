//! Pipeline timing timeline library.
//!
//! This crate turns per-instruction pipeline timing traces into Gantt-style charts. It provides:
//! 1. **Records:** The instruction timing record and the four pipeline stages it tracks.
//! 2. **Loading:** A CSV loader that produces records in input row order.
//! 3. **Layout:** Pure placement of one row of stage bars per record on a shared cycle axis.
//! 4. **Rendering:** Drawing a layout to a PNG, BMP, JPEG or SVG image.
//! 5. **Reporting:** Configuration, summary statistics, and record export.

/// Shared error types.
pub mod common;
/// Chart configuration (defaults, JSON loading, validation).
pub mod config;
/// JSON and CSV export of loaded records.
pub mod export;
/// Row and bar placement for the timeline chart.
pub mod layout;
/// CSV record loader.
pub mod loader;
/// Instruction timing record and pipeline stage definitions.
pub mod record;
/// Chart drawing and image output.
pub mod render;
/// Timeline summary statistics.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Error type shared by every fallible operation in the crate.
pub use crate::common::error::{Result, TimelineError};
/// One row of timing input.
pub use crate::record::{InstructionTimingRecord, Stage};
/// Computed chart layout; returned by the renderer.
pub use crate::layout::TimelineLayout;
/// Loader entry points.
pub use crate::loader::{load_records, parse_records};
/// Renderer entry point.
pub use crate::render::render_timeline;
