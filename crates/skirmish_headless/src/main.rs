//! Headless skirmish runner.
//!
//! Loads a battlefield map, runs the baseline battle and the power
//! calibration search, and prints a JSON report to stdout. Logs go to
//! stderr so the report stays machine-readable.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use skirmish_headless::{run_file, ReportConfig};

#[derive(Parser)]
#[command(name = "skirmish_headless")]
#[command(about = "Headless grid combat runner for scoring maps and CI")]
#[command(version)]
struct Cli {
    /// Path to the battlefield map file
    map: PathBuf,

    /// Enable verbose logging to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Include the parsed battlefield in the report
    #[arg(long)]
    show_map: bool,

    /// Skip the power calibration search (baseline outcome only)
    #[arg(long)]
    skip_calibration: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Logging to stderr (stdout is for the report)
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_ansi(true),
        )
        .with(tracing_subscriber::filter::LevelFilter::from_level(
            log_level,
        ))
        .init();

    let config = ReportConfig {
        skip_calibration: cli.skip_calibration,
        show_map: cli.show_map,
    };

    match run_file(&cli.map, &config) {
        Ok(report) => match serde_json::to_string_pretty(&report) {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("failed to encode report: {err}");
                ExitCode::FAILURE
            }
        },
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
