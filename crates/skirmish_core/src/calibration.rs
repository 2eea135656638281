//! Minimal-power calibration search.
//!
//! Repeatedly resets the battle from its initial snapshot, raises the
//! protected faction's attack power by one, and reruns in early-stop mode
//! until the protected faction wins without losing a single unit.
//!
//! Raising power strictly lowers per-hit kill thresholds for the
//! protected side, so losses cannot increase with power and the search
//! terminates for any finite unit configuration. A defensive cap guards
//! against malformed input anyway.

use serde::Serialize;
use tracing::info;

use crate::battle::Battle;
use crate::error::{Result, SimError};
use crate::simulation::{run_battle, RunMode};
use crate::units::{Faction, DEFAULT_POWER};

/// Defensive cap on the power search. At this power a single attack kills
/// a fresh unit outright, so values past it cannot change the result.
pub const POWER_CAP: i32 = 200;

/// The result of a successful calibration search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Calibration {
    /// The minimal attack power yielding a flawless victory.
    pub power: i32,
    /// Completed rounds of the winning run.
    pub rounds: u32,
}

/// Find the lowest attack power at which the protected faction wins with
/// zero losses.
///
/// On return the battle holds the terminal state of the winning run, so
/// callers can combine [`Calibration::rounds`] with
/// [`Battle::total_health`] for the final score.
///
/// # Errors
///
/// Returns [`SimError::CalibrationFailed`] if the cap is reached, which
/// only happens on malformed input (e.g. a faction with zero units).
pub fn find_minimum_power(battle: &mut Battle, protected: Faction) -> Result<Calibration> {
    let target = battle.initial_count(protected);
    let mut power = DEFAULT_POWER;
    while power < POWER_CAP {
        power += 1;
        battle.reset();
        battle.set_power(protected, power);
        let rounds = run_battle(battle, RunMode::EarlyStop { protected })?;
        let survivors = battle.living_count(protected);
        info!(power, survivors, target, rounds, "calibration attempt");
        if survivors == target {
            return Ok(Calibration { power, rounds });
        }
    }
    Err(SimError::CalibrationFailed { cap: POWER_CAP })
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORKED_EXAMPLE: &str = "\
#######
#.G...#
#...EG#
#.#.#G#
#..G#E#
#.....#
#######";

    #[test]
    fn test_finds_minimal_power_for_flawless_victory() {
        let mut battle = Battle::from_text(WORKED_EXAMPLE);
        let calibration = find_minimum_power(&mut battle, Faction::Elf).unwrap();
        assert_eq!(calibration.power, 15);
        assert_eq!(calibration.rounds, 29);
        assert_eq!(battle.total_health(), 172);
        assert_eq!(battle.living_count(Faction::Elf), 2);
        assert_eq!(battle.living_count(Faction::Goblin), 0);
    }

    #[test]
    fn test_search_is_idempotent_across_resets() {
        let mut battle = Battle::from_text(WORKED_EXAMPLE);
        let first = find_minimum_power(&mut battle, Faction::Elf).unwrap();
        let first_health = battle.total_health();
        let second = find_minimum_power(&mut battle, Faction::Elf).unwrap();
        assert_eq!(first, second);
        assert_eq!(battle.total_health(), first_health);
    }

    #[test]
    fn test_power_increments_until_no_losses() {
        // 1v1 duel where the goblin lands the first hit: at power 4 the
        // elf needs 50 attacks and takes 150 damage, its first flawless
        // win. The search never retests the baseline power of 3.
        let mut battle = Battle::from_text("######\n#E..G#\n######");
        let calibration = find_minimum_power(&mut battle, Faction::Elf).unwrap();
        assert_eq!(calibration.power, 4);
        assert_eq!(battle.living_count(Faction::Goblin), 0);
        assert_eq!(battle.living_count(Faction::Elf), 1);
    }
}
