//! # Render Tests
//!
//! Output format selection, destination checks, atomic replacement, and the
//! content of drawn charts. Tests that inspect drawn text need a system font
//! and return early without one; the staging test asserts on every host.

use std::fs;
use std::path::Path;

use pipeviz_core::config::Config;
use pipeviz_core::render::{ImageFormat, render_layout, render_timeline};
use pipeviz_core::{TimelineError, TimelineLayout};
use rstest::rstest;

use crate::common::{SAMPLE_TRACE, fonts_available, init_tracing, record};

const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn sample_records() -> Vec<pipeviz_core::InstructionTimingRecord> {
    pipeviz_core::parse_records(SAMPLE_TRACE.as_bytes()).unwrap()
}

/// Trimmed bodies of every `<text>` element in an SVG document.
fn svg_texts(svg: &str) -> Vec<String> {
    svg.split("</text>")
        .filter_map(|chunk| chunk.rfind("<text").map(|open| &chunk[open..]))
        .filter_map(|element| element.find('>').map(|end| element[end + 1..].trim().to_string()))
        .collect()
}

#[test]
fn test_svg_texts_ignores_layout_whitespace() {
    let svg = "<svg><text x=\"1\">\nissue\n</text><rect/><text y=\"2\">start</text></svg>";
    assert_eq!(svg_texts(svg), vec!["issue", "start"]);
}

#[rstest]
#[case("plot.png", ImageFormat::Png)]
#[case("plot.PNG", ImageFormat::Png)]
#[case("out/plot.bmp", ImageFormat::Bmp)]
#[case("plot.jpg", ImageFormat::Jpeg)]
#[case("plot.jpeg", ImageFormat::Jpeg)]
#[case("timeline.svg", ImageFormat::Svg)]
fn test_format_from_extension(#[case] path: &str, #[case] format: ImageFormat) {
    assert_eq!(ImageFormat::from_path(Path::new(path)).unwrap(), format);
}

#[rstest]
#[case("plot")]
#[case("plot.gif")]
#[case("plot.pdf")]
fn test_unsupported_format_rejected(#[case] path: &str) {
    let err = ImageFormat::from_path(Path::new(path)).unwrap_err();
    assert!(matches!(err, TimelineError::OutputWrite { .. }));
}

#[test]
fn test_unsupported_format_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.gif");
    let err = render_timeline(&sample_records(), &path, &Config::default()).unwrap_err();
    assert!(matches!(err, TimelineError::OutputWrite { .. }));
    assert!(!path.exists());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_failed_render_leaves_existing_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.tiff");
    fs::write(&path, b"previous").unwrap();
    assert!(render_timeline(&sample_records(), &path, &Config::default()).is_err());
    assert_eq!(fs::read(&path).unwrap(), b"previous");
}

#[test]
fn test_missing_directory_is_output_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("no/such/dir/plot.png");
    let err = render_timeline(&sample_records(), &path, &Config::default()).unwrap_err();
    match err {
        TimelineError::OutputWrite { path: p, .. } => assert_eq!(p, path),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_invalid_config_rejected_before_drawing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.png");
    let mut config = Config::default();
    config.layout.row_height = 0.0;
    let err = render_timeline(&sample_records(), &path, &config).unwrap_err();
    assert!(matches!(err, TimelineError::InvalidConfig { .. }));
    assert!(!path.exists());
}

#[test]
fn test_png_chart_written() {
    if !fonts_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.png");
    let layout = render_timeline(&sample_records(), &path, &Config::default()).unwrap();

    assert_eq!(layout.len(), 4);
    let bytes = fs::read(&path).unwrap();
    assert_eq!(bytes[..8], PNG_MAGIC);
    // Only the chart remains; the staging file was renamed into place.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_existing_chart_overwritten() {
    if !fonts_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.png");
    fs::write(&path, b"stale").unwrap();
    let _layout = render_timeline(&sample_records(), &path, &Config::default()).unwrap();
    assert_eq!(fs::read(&path).unwrap()[..8], PNG_MAGIC);
}

#[test]
fn test_empty_chart_is_valid() {
    if !fonts_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.png");
    let layout = render_timeline(&[record(1, "NOP", 0, 0, 0, 1)], &path, &Config::default())
        .unwrap();
    assert!(layout.is_empty());
    assert_eq!(fs::read(&path).unwrap()[..8], PNG_MAGIC);
}

#[test]
fn test_no_records_at_all_is_valid() {
    if !fonts_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("none.svg");
    let layout = render_timeline(&[], &path, &Config::default()).unwrap();
    assert!(layout.is_empty());
    assert!(fs::read_to_string(&path).unwrap().contains("<svg"));
}

#[test]
fn test_svg_shows_labels_of_rendered_rows_only() {
    if !fonts_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("timeline.svg");
    let records = [record(1, "NOP", 0, 0, 0, 1), record(2, "FADD", 1, 2, 4, 5)];
    let _layout = render_timeline(&records, &path, &Config::default()).unwrap();

    let texts = svg_texts(&fs::read_to_string(&path).unwrap());
    assert!(texts.iter().any(|t| t == "2: FADD"));
    assert!(!texts.iter().any(|t| t == "1: NOP"));
}

#[test]
fn test_legend_lists_every_stage() {
    if !fonts_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("legend.svg");
    // No row uses the start stage, yet the legend still lists it.
    let records = [record(0, "NOP", 0, 0, 0, 0), record(1, "X", 0, 9, 1, 2)];
    let _layout = render_timeline(&records, &path, &Config::default()).unwrap();

    let texts = svg_texts(&fs::read_to_string(&path).unwrap());
    for stage in ["issue", "start", "complete", "writeback"] {
        assert!(texts.iter().any(|t| t == stage), "legend missing {stage}");
    }
    assert!(texts.iter().any(|t| t == "Floating-Point Pipeline Timeline"));
    assert!(texts.iter().any(|t| t == "Clock Cycles"));
}

#[test]
fn test_render_prebuilt_layout() {
    if !fonts_available() {
        return;
    }
    let config = Config::default();
    let layout = TimelineLayout::build(&sample_records(), &config.layout);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prebuilt.png");
    render_layout(&layout, &path, &config.chart).unwrap();
    assert_eq!(fs::read(&path).unwrap()[..8], PNG_MAGIC);
}

#[test]
fn test_render_succeeds_or_leaves_directory_empty() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("plot.png");
    // Includes an out-of-order record, which is drawn as given with a warning.
    let mut records = sample_records();
    records.push(record(5, "FSQRT", 9, 8, 7, 6));
    let result = render_timeline(&records, &path, &Config::default());

    let entries: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    if fonts_available() {
        assert_eq!(result.unwrap().len(), 5);
        assert_eq!(fs::read(&path).unwrap()[..8], PNG_MAGIC);
        assert_eq!(entries.len(), 1);
    } else {
        // Text layout fails without a font; the staged file must not survive.
        assert!(matches!(result, Err(TimelineError::OutputWrite { .. })));
        assert!(entries.is_empty(), "leftover files: {entries:?}");
    }
}
