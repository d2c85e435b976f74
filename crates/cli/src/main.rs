//! Pipeline timeline chart CLI.
//!
//! This binary reads a per-instruction timing trace and renders it as a Gantt chart. It performs:
//! 1. **Load:** Parse the headerless six-column CSV trace into records.
//! 2. **Render:** Draw one row per record (after the first) and save the image.
//! 3. **Report:** Optionally export the records and print a summary.
//!
//! With no arguments it reads `output.csv` and writes `plot.png` in the working directory.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pipeviz_core::config::Config;
use pipeviz_core::stats::TimelineStats;
use pipeviz_core::{export, load_records, render_timeline};

#[derive(Parser, Debug)]
#[command(
    name = "pipeviz",
    author,
    version,
    about = "Render a pipeline timing trace as a Gantt-style timeline",
    long_about = "Reads rows of `index,mnemonic,issue,start,complete,writeback` and draws one bar \
                  per stage on a shared cycle axis.\n\nExamples:\n  pipeviz\n  pipeviz -i trace.csv -o \
                  trace.svg\n  pipeviz -i trace.csv --json trace.json --stats"
)]
struct Cli {
    /// Timing trace to read (headerless CSV).
    #[arg(short, long, default_value = "output.csv")]
    input: PathBuf,

    /// Chart image to write; format follows the extension (png, bmp, jpg, svg).
    #[arg(short, long, default_value = "plot.png")]
    output: PathBuf,

    /// JSON chart configuration (row geometry, image size, colors).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Also export the loaded records as JSON.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Also export the loaded records as headerless CSV.
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print a summary of the rendered rows.
    #[arg(long)]
    stats: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Loads, renders, and reports. Any error is terminal for the run.
fn run(cli: &Cli) -> pipeviz_core::Result<()> {
    let config = match &cli.config {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };
    debug!(?config, "chart configuration");

    let records = load_records(&cli.input)?;
    let layout = render_timeline(&records, &cli.output, &config)?;
    println!(
        "[*] Saved gantt chart with {} rows at {}",
        layout.len(),
        cli.output.display()
    );

    if let Some(path) = &cli.json {
        export::write_json(&records, path)?;
        println!("[*] Exported {} records to {}", records.len(), path.display());
    }
    if let Some(path) = &cli.csv {
        export::write_csv(&records, path)?;
        println!("[*] Exported {} records to {}", records.len(), path.display());
    }
    if cli.stats {
        TimelineStats::from_records(&records).print();
    }
    Ok(())
}
