//! Common types shared across the loader, renderer, and exporters.

/// Error taxonomy and the crate-wide `Result` alias.
pub mod error;

pub use error::{RecordFault, Result, TimelineError};
