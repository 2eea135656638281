//! End-to-end scenario tests against the canonical worked examples.

use skirmish_core::prelude::*;
use skirmish_test_utils::fixtures;

#[test]
fn baseline_scores_match_canon() {
    for scenario in fixtures::canonical_scenarios() {
        let mut battle = Battle::from_text(scenario.map);
        let rounds = run_battle(&mut battle, RunMode::Complete).unwrap();
        let score = u64::from(rounds) * battle.total_health() as u64;
        assert_eq!(score, scenario.baseline_score, "{}", scenario.name);
    }
}

#[test]
fn calibrated_scores_match_canon() {
    for scenario in fixtures::canonical_scenarios() {
        let (Some(expected_score), Some(expected_power)) =
            (scenario.calibrated_score, scenario.minimum_power)
        else {
            continue;
        };
        let mut battle = Battle::from_text(scenario.map);
        let calibration = find_minimum_power(&mut battle, Faction::Elf).unwrap();
        assert_eq!(calibration.power, expected_power, "{}", scenario.name);
        let score = u64::from(calibration.rounds) * battle.total_health() as u64;
        assert_eq!(score, expected_score, "{}", scenario.name);
        // Flawless victory: every elf survived.
        assert_eq!(
            battle.living_count(Faction::Elf),
            battle.initial_count(Faction::Elf),
            "{}",
            scenario.name
        );
    }
}

#[test]
fn run_scenario_reports_both_scores() {
    let (baseline, calibrated) = run_scenario(fixtures::WORKED_EXAMPLE).unwrap();
    assert_eq!(baseline, 27730);
    assert_eq!(calibrated, 4988);
}

#[test]
fn no_two_living_units_share_a_cell() {
    let mut battle = Battle::from_text(fixtures::WORKED_EXAMPLE);
    loop {
        let living: Vec<_> = battle.turn_order();
        let positions: Vec<_> = living
            .iter()
            .map(|(f, id)| battle.unit(*f, *id).unwrap().pos)
            .collect();
        let mut deduped = positions.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), positions.len());
        assert_eq!(battle.occupied().len(), positions.len());

        if run_battle_one_round(&mut battle) {
            break;
        }
    }
}

fn run_battle_one_round(battle: &mut Battle) -> bool {
    use skirmish_core::simulation::{run_round, RoundOutcome};
    matches!(run_round(battle).unwrap(), RoundOutcome::Ended)
}
