//! Timeline rendering.
//!
//! This module draws a [`TimelineLayout`] to an image file. It handles:
//! 1. **Format selection:** PNG, BMP and JPEG through the bitmap backend, SVG through the vector one.
//! 2. **Drawing:** Stage bars, row labels, cycle axis, and the fixed four-entry legend.
//! 3. **Atomic output:** The chart is written to a temporary file next to the target and
//!    renamed over it only once the backend has flushed, so a failure leaves no partial image.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontDesc, FontFamily, FontStyle};
use tracing::{info, warn};

use crate::common::error::{Result, TimelineError};
use crate::config::{ChartConfig, Config};
use crate::layout::{LABEL_ANCHOR_CYCLE, SKIPPED_LEADING_RECORDS, TimelineLayout};
use crate::record::{InstructionTimingRecord, Stage};

/// Output image encodings, chosen from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    /// Portable Network Graphics (`.png`).
    Png,
    /// Windows bitmap (`.bmp`).
    Bmp,
    /// JPEG (`.jpg`, `.jpeg`).
    Jpeg,
    /// Scalable Vector Graphics (`.svg`).
    Svg,
}

impl ImageFormat {
    /// Picks the format for `path` by its extension, ignoring case.
    ///
    /// # Errors
    ///
    /// [`TimelineError::OutputWrite`] when the extension is missing or unsupported.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .ok_or_else(|| TimelineError::output(path, "missing image file extension"))?;
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "bmp" => Ok(Self::Bmp),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            "svg" => Ok(Self::Svg),
            other => Err(TimelineError::output(
                path,
                format!("unsupported image format '.{other}'"),
            )),
        }
    }

    /// Canonical file extension, without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Bmp => "bmp",
            Self::Jpeg => "jpg",
            Self::Svg => "svg",
        }
    }
}

/// Lays out `records` and writes the chart to `path`, replacing any existing file.
///
/// The first record is skipped (see [`SKIPPED_LEADING_RECORDS`]). An empty sequence after
/// the skip yields a valid chart with zero rows. Returns the layout that was drawn.
///
/// # Errors
///
/// [`TimelineError::InvalidConfig`] if `config` fails validation, and
/// [`TimelineError::OutputWrite`] if the destination is not writable, the format is
/// unsupported, or the backend fails to draw or encode.
pub fn render_timeline(
    records: &[InstructionTimingRecord],
    path: impl AsRef<Path>,
    config: &Config,
) -> Result<TimelineLayout> {
    config.validate()?;
    let disordered = records
        .iter()
        .skip(SKIPPED_LEADING_RECORDS)
        .filter(|r| !r.is_ordered())
        .count();
    if disordered > 0 {
        warn!(count = disordered, "records with out-of-order stage cycles");
    }

    let layout = TimelineLayout::build(records, &config.layout);
    render_layout(&layout, path.as_ref(), &config.chart)?;
    Ok(layout)
}

/// Writes an already computed layout to `path`.
///
/// # Errors
///
/// [`TimelineError::OutputWrite`] as for [`render_timeline`].
pub fn render_layout(layout: &TimelineLayout, path: &Path, chart: &ChartConfig) -> Result<()> {
    let format = ImageFormat::from_path(path)?;
    let dir = destination_dir(path);
    if !dir.is_dir() {
        return Err(TimelineError::output(path, "destination directory does not exist"));
    }

    let staged = tempfile::Builder::new()
        .prefix(".pipeviz-")
        .suffix(&format!(".{}", format.extension()))
        .tempfile_in(&dir)
        .map_err(|e| TimelineError::output(path, e))?;

    info!("saving the gantt chart at {}", path.display());
    let size = (chart.width, chart.height);
    match format {
        ImageFormat::Svg => {
            let root = SVGBackend::new(staged.path(), size).into_drawing_area();
            draw_chart(&root, layout, chart).map_err(|e| TimelineError::output(path, e))?;
            root.present().map_err(|e| TimelineError::output(path, e))?;
        }
        ImageFormat::Png | ImageFormat::Bmp | ImageFormat::Jpeg => {
            let root = BitMapBackend::new(staged.path(), size).into_drawing_area();
            draw_chart(&root, layout, chart).map_err(|e| TimelineError::output(path, e))?;
            root.present().map_err(|e| TimelineError::output(path, e))?;
        }
    }

    let _file = staged
        .persist(path)
        .map_err(|e| TimelineError::output(path, e.error))?;
    Ok(())
}

/// Directory that will hold `path`; the working directory for bare file names.
fn destination_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

const fn rgb([r, g, b]: [u8; 3]) -> RGBColor {
    RGBColor(r, g, b)
}

fn draw_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    layout: &TimelineLayout,
    cfg: &ChartConfig,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let font_size = f64::from(cfg.font_size);
    let font = FontDesc::new(FontFamily::SansSerif, font_size, FontStyle::Normal);
    let caption = FontDesc::new(FontFamily::SansSerif, font_size * 1.5, FontStyle::Normal);

    root.fill(&WHITE)?;

    let (x0, x1) = layout.x_range();
    let (y0, y1) = layout.y_range();
    let mut chart = ChartBuilder::on(root)
        .caption(&cfg.title, caption)
        .margin(20)
        .x_label_area_size(cfg.font_size * 3)
        .y_label_area_size(cfg.label_area)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .x_desc(cfg.x_label.as_str())
        .disable_y_mesh()
        .disable_y_axis()
        .label_style(font.clone())
        .axis_desc_style(font.clone())
        .draw()?;

    let area = chart.plotting_area();
    for row in &layout.rows {
        for bar in &row.bars {
            let color = rgb(cfg.colors.for_stage(bar.stage));
            area.draw(&Rectangle::new(
                [(bar.start, row.y), (bar.end(), row.y + row.height)],
                color.filled(),
            ))?;
        }
    }

    // Labels hang left of the anchor cycle, into the label area.
    let label_style = TextStyle::from(font.clone()).pos(Pos::new(HPos::Right, VPos::Center));
    for row in &layout.rows {
        area.draw(&Text::new(
            row.label.as_str(),
            (LABEL_ANCHOR_CYCLE, row.center()),
            label_style.clone(),
        ))?;
    }

    for stage in Stage::ALL {
        let color = rgb(cfg.colors.for_stage(stage));
        let _ = chart
            .draw_series(std::iter::empty::<Rectangle<(i64, f64)>>())?
            .label(stage.name())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperLeft)
        .background_style(&WHITE.mix(0.85))
        .border_style(&BLACK)
        .label_font(font)
        .draw()?;

    Ok(())
}
