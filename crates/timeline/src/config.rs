//! Chart configuration.
//!
//! This module defines the knobs of the timeline chart. It provides:
//! 1. **Defaults:** Row geometry, image size, captions, and the stage color palette.
//! 2. **Structures:** Layout settings (row geometry) and chart settings (image, text, colors).
//! 3. **Loading:** JSON deserialization where every field is optional, plus range validation.
//!
//! The CLI uses `Config::default()` unless a JSON file is passed with `--config`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::common::error::{Result, TimelineError};
use crate::record::Stage;

/// Default configuration constants for the chart.
mod defaults {
    /// Height of one row, in chart units.
    pub const ROW_HEIGHT: f64 = 0.15;

    /// Vertical gap between consecutive rows, in chart units.
    pub const ROW_GAP: f64 = 0.05;

    /// Image width in pixels.
    pub const WIDTH: u32 = 1024;

    /// Image height in pixels.
    pub const HEIGHT: u32 = 768;

    /// Width in pixels reserved left of the plot for row labels.
    pub const LABEL_AREA: u32 = 180;

    /// Base font size in pixels for labels and legend.
    pub const FONT_SIZE: u32 = 16;

    /// Chart caption.
    pub const TITLE: &str = "Floating-Point Pipeline Timeline";

    /// Caption of the cycle axis.
    pub const X_LABEL: &str = "Clock Cycles";

    pub const ISSUE: [u8; 3] = [0, 0, 255];
    pub const START: [u8; 3] = [255, 165, 0];
    pub const COMPLETE: [u8; 3] = [0, 128, 0];
    pub const WRITEBACK: [u8; 3] = [255, 0, 0];
}

/// Root configuration.
///
/// # Examples
///
/// ```
/// use pipeviz_core::Config;
///
/// let json = r#"{ "layout": { "row_height": 0.3 } }"#;
/// let config = Config::from_json_str(json).unwrap();
/// assert!((config.layout.row_height - 0.3).abs() < f64::EPSILON);
/// assert_eq!(config.chart.width, 1024);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Row geometry.
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Image and presentation settings.
    #[serde(default)]
    pub chart: ChartConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// [`TimelineError::InvalidConfig`] on malformed JSON or out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| TimelineError::InvalidConfig {
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses, and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// [`TimelineError::InvalidConfig`] if the file cannot be read or is invalid.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| TimelineError::InvalidConfig {
            reason: format!("{}: {e}", path.display()),
        })?;
        Self::from_json_str(&text)
    }

    /// Checks that every value is usable for drawing.
    ///
    /// # Errors
    ///
    /// [`TimelineError::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| {
            Err(TimelineError::InvalidConfig {
                reason: reason.to_string(),
            })
        };
        let layout = &self.layout;
        if !layout.row_height.is_finite() || layout.row_height <= 0.0 {
            return invalid("layout.row_height must be a positive number");
        }
        if !layout.row_gap.is_finite() || layout.row_gap < 0.0 {
            return invalid("layout.row_gap must be a non-negative number");
        }
        let chart = &self.chart;
        if chart.width == 0 || chart.height == 0 {
            return invalid("chart.width and chart.height must be non-zero");
        }
        if chart.label_area >= chart.width {
            return invalid("chart.label_area must be narrower than chart.width");
        }
        if chart.font_size == 0 {
            return invalid("chart.font_size must be non-zero");
        }
        Ok(())
    }
}

/// Row geometry of the timeline.
///
/// Row `i` spans `[i * (row_height + row_gap), i * (row_height + row_gap) + row_height]`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct LayoutConfig {
    /// Height of one row, in chart units.
    #[serde(default = "LayoutConfig::default_row_height")]
    pub row_height: f64,

    /// Gap between rows, in chart units.
    #[serde(default = "LayoutConfig::default_row_gap")]
    pub row_gap: f64,
}

impl LayoutConfig {
    const fn default_row_height() -> f64 {
        defaults::ROW_HEIGHT
    }

    const fn default_row_gap() -> f64 {
        defaults::ROW_GAP
    }

    /// Vertical distance between the bottoms of consecutive rows.
    pub fn pitch(&self) -> f64 {
        self.row_height + self.row_gap
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height: defaults::ROW_HEIGHT,
            row_gap: defaults::ROW_GAP,
        }
    }
}

/// Image size, captions, and palette.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartConfig {
    /// Image width in pixels.
    #[serde(default = "ChartConfig::default_width")]
    pub width: u32,

    /// Image height in pixels.
    #[serde(default = "ChartConfig::default_height")]
    pub height: u32,

    /// Chart caption.
    #[serde(default = "ChartConfig::default_title")]
    pub title: String,

    /// Cycle axis caption.
    #[serde(default = "ChartConfig::default_x_label")]
    pub x_label: String,

    /// Pixels reserved left of the plot for row labels.
    #[serde(default = "ChartConfig::default_label_area")]
    pub label_area: u32,

    /// Font size for labels and legend.
    #[serde(default = "ChartConfig::default_font_size")]
    pub font_size: u32,

    /// Stage colors.
    #[serde(default)]
    pub colors: StageColors,
}

impl ChartConfig {
    const fn default_width() -> u32 {
        defaults::WIDTH
    }

    const fn default_height() -> u32 {
        defaults::HEIGHT
    }

    fn default_title() -> String {
        defaults::TITLE.to_string()
    }

    fn default_x_label() -> String {
        defaults::X_LABEL.to_string()
    }

    const fn default_label_area() -> u32 {
        defaults::LABEL_AREA
    }

    const fn default_font_size() -> u32 {
        defaults::FONT_SIZE
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: defaults::WIDTH,
            height: defaults::HEIGHT,
            title: defaults::TITLE.to_string(),
            x_label: defaults::X_LABEL.to_string(),
            label_area: defaults::LABEL_AREA,
            font_size: defaults::FONT_SIZE,
            colors: StageColors::default(),
        }
    }
}

/// RGB color per stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct StageColors {
    /// Issue bar color.
    #[serde(default = "StageColors::default_issue")]
    pub issue: [u8; 3],
    /// Execution (start) bar color.
    #[serde(default = "StageColors::default_start")]
    pub start: [u8; 3],
    /// Complete bar color.
    #[serde(default = "StageColors::default_complete")]
    pub complete: [u8; 3],
    /// Writeback bar color.
    #[serde(default = "StageColors::default_writeback")]
    pub writeback: [u8; 3],
}

impl StageColors {
    const fn default_issue() -> [u8; 3] {
        defaults::ISSUE
    }

    const fn default_start() -> [u8; 3] {
        defaults::START
    }

    const fn default_complete() -> [u8; 3] {
        defaults::COMPLETE
    }

    const fn default_writeback() -> [u8; 3] {
        defaults::WRITEBACK
    }

    /// Color assigned to `stage`.
    pub const fn for_stage(&self, stage: Stage) -> [u8; 3] {
        match stage {
            Stage::Issue => self.issue,
            Stage::Start => self.start,
            Stage::Complete => self.complete,
            Stage::Writeback => self.writeback,
        }
    }
}

impl Default for StageColors {
    fn default() -> Self {
        Self {
            issue: defaults::ISSUE,
            start: defaults::START,
            complete: defaults::COMPLETE,
            writeback: defaults::WRITEBACK,
        }
    }
}
