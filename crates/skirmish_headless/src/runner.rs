//! Battle execution and report assembly.

use std::path::Path;

use serde::Serialize;
use thiserror::Error;
use tracing::info_span;

use skirmish_core::battle::Battle;
use skirmish_core::calibration::find_minimum_power;
use skirmish_core::error::SimError;
use skirmish_core::simulation::{run_battle, Outcome, RunMode};
use skirmish_core::units::Faction;

/// Errors surfaced by the headless runner.
#[derive(Debug, Error)]
pub enum RunnerError {
    /// The map file could not be read.
    #[error("failed to read map file: {0}")]
    Io(#[from] std::io::Error),

    /// The simulation itself failed.
    #[error(transparent)]
    Sim(#[from] SimError),
}

/// Runner configuration, assembled from CLI flags.
#[derive(Debug, Clone, Default)]
pub struct ReportConfig {
    /// Skip the power calibration search (baseline outcome only).
    pub skip_calibration: bool,
    /// Include the parsed battlefield in the report.
    pub show_map: bool,
}

/// The calibrated half of a report.
#[derive(Debug, Clone, Serialize)]
pub struct CalibratedOutcome {
    /// Minimal elf power yielding zero elf losses.
    pub power: i32,
    /// The outcome of the winning run.
    #[serde(flatten)]
    pub outcome: Outcome,
    /// rounds x total remaining health.
    pub score: u64,
}

/// The full scored report for one map.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// The parsed battlefield, when requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub map: Option<String>,
    /// Outcome at default power for both factions.
    #[serde(flatten)]
    pub baseline: Outcome,
    /// Baseline rounds x total remaining health.
    pub baseline_score: u64,
    /// Outcome at the minimal flawless-victory elf power, unless skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calibrated: Option<CalibratedOutcome>,
}

/// Load a map file and produce its report.
///
/// # Errors
///
/// Returns [`RunnerError::Io`] if the file cannot be read, or propagates
/// simulation errors.
pub fn run_file(path: &Path, config: &ReportConfig) -> Result<Report, RunnerError> {
    let text = std::fs::read_to_string(path)?;
    run_text(&text, config)
}

/// Run the scenario on map text and produce its report.
///
/// The phase spans are diagnostics only and have no effect on results.
///
/// # Errors
///
/// Propagates simulation errors.
pub fn run_text(text: &str, config: &ReportConfig) -> Result<Report, RunnerError> {
    let mut battle = Battle::from_text(text);
    let map = config.show_map.then(|| battle.render());

    let baseline = {
        let _span = info_span!("baseline").entered();
        let rounds = run_battle(&mut battle, RunMode::Complete)?;
        Outcome {
            rounds,
            total_health: battle.total_health(),
        }
    };

    let calibrated = if config.skip_calibration {
        None
    } else {
        let _span = info_span!("calibration").entered();
        let calibration = find_minimum_power(&mut battle, Faction::Elf)?;
        let outcome = Outcome {
            rounds: calibration.rounds,
            total_health: battle.total_health(),
        };
        Some(CalibratedOutcome {
            power: calibration.power,
            score: outcome.score(),
            outcome,
        })
    };

    Ok(Report {
        map,
        baseline_score: baseline.score(),
        baseline,
        calibrated,
    })
}
