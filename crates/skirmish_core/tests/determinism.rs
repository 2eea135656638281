//! Determinism tests: identical input must yield identical results, and
//! calibration attempts must not leak state into each other.

use skirmish_core::prelude::*;
use skirmish_test_utils::{determinism, fixtures};

#[test]
fn repeated_runs_are_identical() {
    determinism::verify_scenario(fixtures::WORKED_EXAMPLE, 3)
        .unwrap()
        .assert_deterministic();
}

#[test]
fn calibration_twice_from_one_snapshot_matches() {
    let mut battle = Battle::from_text(fixtures::WORKED_EXAMPLE);
    let first = find_minimum_power(&mut battle, Faction::Elf).unwrap();
    let first_health = battle.total_health();

    // The second search starts from the same initial snapshot; residual
    // mutation from the first would change its result.
    let second = find_minimum_power(&mut battle, Faction::Elf).unwrap();
    assert_eq!(first, second);
    assert_eq!(battle.total_health(), first_health);
}

#[test]
fn reset_restores_the_parsed_state_exactly() {
    let mut battle = Battle::from_text(fixtures::WORKED_EXAMPLE);
    let initial_render = battle.render();
    let initial_health = battle.total_health();

    run_battle(&mut battle, RunMode::Complete).unwrap();
    assert_ne!(battle.render(), initial_render);

    battle.reset();
    assert_eq!(battle.render(), initial_render);
    assert_eq!(battle.total_health(), initial_health);
}
