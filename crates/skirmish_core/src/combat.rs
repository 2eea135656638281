//! Per-unit move and attack resolution.
//!
//! A unit's turn is a movement step (skipped when an enemy is already
//! adjacent) followed by an attack (a no-op when no enemy is adjacent).
//! All tie-breaks are reading order; attacks prefer the weakest target
//! first, position second.

use std::collections::BTreeSet;

use tracing::debug;

use crate::battle::Battle;
use crate::error::Result;
use crate::pathfinding::{select_move_goal, select_step};
use crate::units::{Faction, UnitId};

/// Perform the unit's movement for this turn. Returns whether it moved.
///
/// The unit stands still when an enemy is already adjacent, when no open
/// cell is adjacent to any enemy, or when none of those cells is
/// reachable. Otherwise it takes exactly one step towards the chosen
/// destination.
///
/// # Errors
///
/// Propagates pathfinding failures; these indicate internal invariant
/// violations, not bad maps.
pub fn perform_move(battle: &mut Battle, faction: Faction, id: UnitId) -> Result<bool> {
    let Some(unit) = battle.unit(faction, id) else {
        return Ok(false);
    };
    let start = unit.pos;
    let enemy = faction.opponent();

    let enemy_positions: Vec<_> = battle.roster(enemy).values().map(|u| u.pos).collect();
    if enemy_positions.iter().any(|p| start.manhattan(*p) == 1) {
        return Ok(false);
    }

    // Open cells adjacent to any enemy are the movement goals.
    let goals: BTreeSet<_> = enemy_positions
        .iter()
        .flat_map(|p| p.neighbors())
        .filter(|n| battle.is_open(*n))
        .collect();
    if goals.is_empty() {
        debug!(%faction, id = id.0, "not moving, nowhere to go");
        return Ok(false);
    }

    let step = {
        let grid = battle.open_grid();
        let Some(goal) = select_move_goal(&grid, start, &goals)? else {
            debug!(%faction, id = id.0, "not moving, cannot reach");
            return Ok(false);
        };
        select_step(&grid, start, goal)?
    };

    debug!(%faction, id = id.0, from = %start, to = %step, "moving");
    battle.relocate(faction, id, step);
    Ok(true)
}

/// Perform the unit's attack for this turn. Returns the damage dealt,
/// which is zero when no enemy is adjacent.
///
/// Among adjacent enemies the target is the one with minimum
/// (health, reading order of position). The target is removed from its
/// roster and from the occupied set the instant its health drops to zero
/// or below.
pub fn perform_attack(battle: &mut Battle, faction: Faction, id: UnitId) -> i32 {
    let Some(unit) = battle.unit(faction, id) else {
        return 0;
    };
    let pos = unit.pos;
    let power = unit.power;
    let enemy = faction.opponent();

    let target = battle
        .roster(enemy)
        .values()
        .filter(|t| pos.manhattan(t.pos) == 1)
        .min_by_key(|t| (t.health, t.pos))
        .map(|t| (t.id, t.pos));
    let Some((target_id, target_pos)) = target else {
        return 0;
    };

    debug!(%faction, id = id.0, target = target_id.0, at = %target_pos, "attacking");
    if battle.apply_damage(enemy, target_id, power) {
        debug!(%enemy, target = target_id.0, "defeated");
    }
    power
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Pos;

    #[test]
    fn test_attack_prefers_weakest_target() {
        let mut battle = Battle::from_text("#####\n#GEG#\n#####");
        let order = battle.turn_order();
        let (_, elf_id) = order[1];
        let (_, right_goblin) = order[2];
        battle.unit_mut(Faction::Goblin, right_goblin).unwrap().health = 50;

        let damage = perform_attack(&mut battle, Faction::Elf, elf_id);
        assert_eq!(damage, 3);
        assert_eq!(
            battle.unit(Faction::Goblin, right_goblin).map(|u| u.health),
            Some(47)
        );
    }

    #[test]
    fn test_attack_ties_break_in_reading_order() {
        let mut battle = Battle::from_text("#####\n#GEG#\n#####");
        let order = battle.turn_order();
        let (_, left_goblin) = order[0];
        let (_, elf_id) = order[1];

        // Equal health on both sides: the lexicographically smaller
        // position takes the hit.
        perform_attack(&mut battle, Faction::Elf, elf_id);
        assert_eq!(
            battle.unit(Faction::Goblin, left_goblin).map(|u| u.health),
            Some(197)
        );
    }

    #[test]
    fn test_attack_without_adjacent_enemy_is_noop() {
        let mut battle = Battle::from_text("#####\n#G.E#\n#####");
        let (_, goblin_id) = battle.turn_order()[0];
        let health_before = battle.total_health();
        assert_eq!(perform_attack(&mut battle, Faction::Goblin, goblin_id), 0);
        assert_eq!(battle.total_health(), health_before);
    }

    #[test]
    fn test_lethal_attack_removes_target() {
        let mut battle = Battle::from_text("#####\n#GE.#\n#####");
        let order = battle.turn_order();
        let (_, goblin_id) = order[0];
        let (_, elf_id) = order[1];
        battle.unit_mut(Faction::Elf, elf_id).unwrap().health = 2;

        perform_attack(&mut battle, Faction::Goblin, goblin_id);
        assert_eq!(battle.living_count(Faction::Elf), 0);
        assert!(!battle.occupied().contains(&Pos::new(1, 2)));
    }

    #[test]
    fn test_move_steps_towards_nearest_enemy() {
        let mut battle = Battle::from_text("#######\n#E...G#\n#######");
        let (_, elf_id) = battle.turn_order()[0];
        assert!(perform_move(&mut battle, Faction::Elf, elf_id).unwrap());
        assert_eq!(
            battle.unit(Faction::Elf, elf_id).map(|u| u.pos),
            Some(Pos::new(1, 2))
        );
    }

    #[test]
    fn test_move_skipped_when_enemy_adjacent() {
        let mut battle = Battle::from_text("#####\n#EG.#\n#####");
        let (_, elf_id) = battle.turn_order()[0];
        assert!(!perform_move(&mut battle, Faction::Elf, elf_id).unwrap());
    }

    #[test]
    fn test_move_skipped_when_no_open_goal() {
        // The goblin is walled in on every side.
        let mut battle = Battle::from_text(
            "#####\n\
             #E.##\n\
             ###G#\n\
             #####",
        );
        let (_, elf_id) = battle.turn_order()[0];
        assert!(!perform_move(&mut battle, Faction::Elf, elf_id).unwrap());
    }

    #[test]
    fn test_move_skipped_when_goals_unreachable() {
        let mut battle = Battle::from_text(
            "######\n\
             #E#.G#\n\
             ######",
        );
        let (_, elf_id) = battle.turn_order()[0];
        assert!(!perform_move(&mut battle, Faction::Elf, elf_id).unwrap());
    }
}
