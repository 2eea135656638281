//! Headless battle runner for scoring maps and CI verification.
//!
//! This crate wraps [`skirmish_core`] with file loading and a JSON report:
//!
//! - **stdout**: the scored report (JSON)
//! - **stderr**: human-readable logs (`--verbose` for per-turn detail)
//!
//! # Example
//!
//! ```bash
//! # Score a map (baseline battle + power calibration)
//! cargo run -p skirmish_headless -- caves.txt
//!
//! # Baseline only, with the parsed map echoed into the report
//! cargo run -p skirmish_headless -- caves.txt --skip-calibration --show-map
//! ```

pub mod runner;

pub use runner::{run_file, run_text, Report, ReportConfig, RunnerError};
