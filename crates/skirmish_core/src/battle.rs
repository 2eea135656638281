//! Battle state: terrain, rosters, occupancy, and the initial snapshot.
//!
//! # Determinism
//!
//! Rosters are `BTreeMap`s so every iteration over units is in a fixed
//! order. The occupied set is kept exactly equal to the union of living
//! unit positions at all observation points between turns. Calibration
//! attempts are isolated purely through [`Battle::reset`], which rebuilds
//! the rosters and occupancy from an independently owned snapshot taken
//! once after parsing.

use std::collections::{BTreeMap, HashSet};

use crate::grid::{parse_map, Pos, Terrain};
use crate::pathfinding::OpenGrid;
use crate::units::{Faction, Unit, UnitId};

/// A faction's living units, keyed by identity.
pub type Roster = BTreeMap<UnitId, Unit>;

/// Both factions' rosters, indexed by faction tag.
#[derive(Debug, Clone, Default)]
struct Rosters([Roster; 2]);

impl Rosters {
    fn of(&self, faction: Faction) -> &Roster {
        &self.0[faction as usize]
    }

    fn of_mut(&mut self, faction: Faction) -> &mut Roster {
        &mut self.0[faction as usize]
    }

    fn positions(&self) -> impl Iterator<Item = Pos> + '_ {
        self.0.iter().flat_map(|roster| roster.values().map(|u| u.pos))
    }
}

/// The full mutable state of a battle.
#[derive(Debug, Clone)]
pub struct Battle {
    terrain: Terrain,
    occupied: HashSet<Pos>,
    rosters: Rosters,
    /// Immutable deep copy of the post-parse rosters, restored by `reset`.
    snapshot: Rosters,
}

impl Battle {
    /// Parse a battle from map text.
    ///
    /// `#` is a wall, `E` and `G` place units; anything else is open
    /// floor. Parsing never fails - stray characters are ignored.
    #[must_use]
    pub fn from_text(input: &str) -> Self {
        let (terrain, placements) = parse_map(input);
        let mut rosters = Rosters::default();
        let mut occupied = HashSet::new();
        for (key, (faction, pos)) in placements.into_iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            let id = UnitId(key as u32);
            rosters.of_mut(faction).insert(id, Unit::new(id, faction, pos));
            occupied.insert(pos);
        }
        let snapshot = rosters.clone();
        Self {
            terrain,
            occupied,
            rosters,
            snapshot,
        }
    }

    /// Restore the rosters and occupancy to their post-parse state.
    pub fn reset(&mut self) {
        self.rosters = self.snapshot.clone();
        self.occupied = self.rosters.positions().collect();
    }

    /// The living roster of a faction.
    #[must_use]
    pub fn roster(&self, faction: Faction) -> &Roster {
        self.rosters.of(faction)
    }

    /// Number of living units in a faction.
    #[must_use]
    pub fn living_count(&self, faction: Faction) -> usize {
        self.rosters.of(faction).len()
    }

    /// Number of units the faction started the battle with.
    #[must_use]
    pub fn initial_count(&self, faction: Faction) -> usize {
        self.snapshot.of(faction).len()
    }

    /// Look up a living unit.
    #[must_use]
    pub fn unit(&self, faction: Faction, id: UnitId) -> Option<&Unit> {
        self.rosters.of(faction).get(&id)
    }

    /// Sum of health across all living units of both factions.
    #[must_use]
    pub fn total_health(&self) -> i64 {
        Faction::BOTH
            .iter()
            .flat_map(|f| self.rosters.of(*f).values())
            .map(|u| i64::from(u.health))
            .sum()
    }

    /// Set the attack power of every living unit in a faction.
    pub fn set_power(&mut self, faction: Faction, power: i32) {
        for unit in self.rosters.of_mut(faction).values_mut() {
            unit.power = power;
        }
    }

    /// The static terrain.
    #[must_use]
    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// The set of cells occupied by living units.
    #[must_use]
    pub fn occupied(&self) -> &HashSet<Pos> {
        &self.occupied
    }

    /// A pathfinding view over the current walls and occupancy.
    #[must_use]
    pub fn open_grid(&self) -> OpenGrid<'_> {
        OpenGrid::new(self.terrain.walls(), &self.occupied)
    }

    /// Whether a cell can be entered right now.
    #[must_use]
    pub fn is_open(&self, pos: Pos) -> bool {
        !self.terrain.is_wall(pos) && !self.occupied.contains(&pos)
    }

    /// All living units in ascending reading order of their positions.
    ///
    /// This is the per-round turn order: it is captured once at round
    /// start and later position changes do not reorder remaining turns.
    #[must_use]
    pub fn turn_order(&self) -> Vec<(Faction, UnitId)> {
        let mut order: Vec<(Pos, Faction, UnitId)> = Vec::new();
        for faction in Faction::BOTH {
            for unit in self.rosters.of(faction).values() {
                order.push((unit.pos, faction, unit.id));
            }
        }
        // Positions are unique, so an unstable sort is deterministic.
        order.sort_unstable_by_key(|(pos, ..)| *pos);
        order.into_iter().map(|(_, faction, id)| (faction, id)).collect()
    }

    /// Move a living unit to an open cell, keeping occupancy in sync.
    pub(crate) fn relocate(&mut self, faction: Faction, id: UnitId, to: Pos) {
        if let Some(unit) = self.rosters.of_mut(faction).get_mut(&id) {
            self.occupied.remove(&unit.pos);
            self.occupied.insert(to);
            unit.pos = to;
        }
    }

    /// Damage a living unit, removing it the instant health drops to zero
    /// or below. Returns whether the unit was defeated.
    pub(crate) fn apply_damage(&mut self, faction: Faction, id: UnitId, damage: i32) -> bool {
        let Some(unit) = self.rosters.of_mut(faction).get_mut(&id) else {
            return false;
        };
        unit.health -= damage;
        if unit.health <= 0 {
            let pos = unit.pos;
            self.rosters.of_mut(faction).remove(&id);
            self.occupied.remove(&pos);
            true
        } else {
            false
        }
    }

    /// Render the battlefield as ASCII, matching the input format.
    /// Diagnostic only; has no effect on simulation results.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        for row in 0..self.terrain.rows() {
            for col in 0..self.terrain.cols() {
                let pos = Pos::new(row, col);
                let glyph = if self.terrain.is_wall(pos) {
                    '#'
                } else if let Some(faction) = self.faction_at(pos) {
                    faction.glyph()
                } else {
                    '.'
                };
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }

    fn faction_at(&self, pos: Pos) -> Option<Faction> {
        Faction::BOTH.into_iter().find(|faction| {
            self.rosters.of(*faction).values().any(|u| u.pos == pos)
        })
    }

    #[cfg(test)]
    pub(crate) fn unit_mut(&mut self, faction: Faction, id: UnitId) -> Option<&mut Unit> {
        self.rosters.of_mut(faction).get_mut(&id)
    }
}
