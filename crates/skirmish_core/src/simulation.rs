//! Round engine and battle runner.
//!
//! A round gives every living unit one turn, in the reading order of the
//! positions they held when the round started. A round in which some unit
//! finds the enemy roster empty is abandoned and does not count as
//! completed. The runner repeats rounds until a faction is wiped out, or
//! (in early-stop mode) until the protected faction takes its first loss.
//!
//! # Determinism
//!
//! Given identical input, every run produces identical results: state is
//! mutated only inside the sequential per-unit processing, and pathfinding
//! is side-effect-free with respect to battle state.

use serde::Serialize;
use tracing::debug;

use crate::battle::Battle;
use crate::calibration;
use crate::combat::{perform_attack, perform_move};
use crate::error::Result;
use crate::units::Faction;

/// How a round left the battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Both factions still have units; combat continues.
    Continue,
    /// A unit found no targets; combat is over and the round does not
    /// count as completed.
    Ended,
}

/// How long to keep running rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Run until one faction is completely defeated.
    Complete,
    /// Additionally stop as soon as the protected faction's unit count
    /// drops below its starting count. Used for cheap calibration
    /// testing.
    EarlyStop {
        /// The faction whose losses end the run.
        protected: Faction,
    },
}

/// Execute one round of combat.
///
/// The turn order is snapshotted at round start; units defeated earlier in
/// the round are skipped, and units that move do not act again.
///
/// # Errors
///
/// Propagates pathfinding failures from unit movement.
pub fn run_round(battle: &mut Battle) -> Result<RoundOutcome> {
    for (faction, id) in battle.turn_order() {
        if battle.unit(faction, id).is_none() {
            // Defeated earlier this round.
            continue;
        }
        if battle.living_count(faction.opponent()) == 0 {
            debug!(%faction, id = id.0, "nothing left to fight, combat over");
            return Ok(RoundOutcome::Ended);
        }
        perform_move(battle, faction, id)?;
        perform_attack(battle, faction, id);
    }
    Ok(RoundOutcome::Continue)
}

/// Run the battle to termination, returning the number of completed
/// rounds.
///
/// In [`RunMode::EarlyStop`], the check runs after every completed round
/// and the round that triggers it still counts.
///
/// # Errors
///
/// Propagates pathfinding failures from round execution.
pub fn run_battle(battle: &mut Battle, mode: RunMode) -> Result<u32> {
    let protected_start = match mode {
        RunMode::EarlyStop { protected } => battle.initial_count(protected),
        RunMode::Complete => 0,
    };

    let mut rounds = 0;
    loop {
        debug!(round = rounds + 1, "begin round");
        match run_round(battle)? {
            RoundOutcome::Ended => return Ok(rounds),
            RoundOutcome::Continue => {
                rounds += 1;
                if let RunMode::EarlyStop { protected } = mode {
                    if battle.living_count(protected) < protected_start {
                        debug!(%protected, rounds, "stopping early, protected faction lost a unit");
                        return Ok(rounds);
                    }
                }
            }
        }
    }
}

/// The final tally of a finished battle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    /// Fully completed rounds.
    pub rounds: u32,
    /// Sum of health across all living units of both factions.
    pub total_health: i64,
}

impl Outcome {
    /// The battle's score: completed rounds times total remaining health.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn score(&self) -> u64 {
        // Health is always positive for living units.
        u64::from(self.rounds) * self.total_health as u64
    }
}

/// Run the full scenario on a parsed map.
///
/// Returns the pair of scores the scenario is graded on:
/// 1. rounds x total remaining health with default power on both sides;
/// 2. the same product at the minimal elf power yielding zero elf losses.
///
/// # Errors
///
/// Propagates pathfinding failures and calibration exhaustion.
pub fn run_scenario(input: &str) -> Result<(u64, u64)> {
    let mut battle = Battle::from_text(input);

    let rounds = run_battle(&mut battle, RunMode::Complete)?;
    let baseline = Outcome {
        rounds,
        total_health: battle.total_health(),
    };

    let calibration = calibration::find_minimum_power(&mut battle, Faction::Elf)?;
    let calibrated = Outcome {
        rounds: calibration.rounds,
        total_health: battle.total_health(),
    };

    Ok((baseline.score(), calibrated.score()))
}
