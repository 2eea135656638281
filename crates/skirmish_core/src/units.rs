//! Faction and unit definitions.
//!
//! There is a single [`Unit`] type tagged with a two-valued [`Faction`];
//! all faction-specific behavior downstream is a lookup keyed by that tag.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Pos;

/// Default attack power for a freshly parsed unit.
pub const DEFAULT_POWER: i32 = 3;

/// Default health for a freshly parsed unit.
pub const DEFAULT_HEALTH: i32 = 200;

/// The two combatant factions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    /// Elves, marked `E` on the map.
    Elf,
    /// Goblins, marked `G` on the map.
    Goblin,
}

impl Faction {
    /// Both factions, in roster order.
    pub const BOTH: [Faction; 2] = [Faction::Elf, Faction::Goblin];

    /// The opposing faction.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Elf => Self::Goblin,
            Self::Goblin => Self::Elf,
        }
    }

    /// The map glyph for this faction.
    #[must_use]
    pub const fn glyph(self) -> char {
        match self {
            Self::Elf => 'E',
            Self::Goblin => 'G',
        }
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Elf => write!(f, "Elf"),
            Self::Goblin => write!(f, "Goblin"),
        }
    }
}

/// Unique identifier for units, assigned in parse (reading) order.
///
/// Identifiers are unique within a faction's roster; the parser happens to
/// hand out globally unique values but nothing relies on that.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct UnitId(pub u32);

/// A single combatant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Identity within the faction roster.
    pub id: UnitId,
    /// Which side this unit fights for.
    pub faction: Faction,
    /// Current cell. Mutated by movement.
    pub pos: Pos,
    /// Damage dealt per attack.
    pub power: i32,
    /// Remaining health. The unit is removed from its roster the instant
    /// this reaches zero or below, so living units always have health > 0.
    pub health: i32,
}

impl Unit {
    /// Create a unit with default power and health.
    #[must_use]
    pub const fn new(id: UnitId, faction: Faction, pos: Pos) -> Self {
        Self {
            id,
            faction,
            pos,
            power: DEFAULT_POWER,
            health: DEFAULT_HEALTH,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} #{}", self.faction, self.id.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent_is_involutive() {
        for faction in Faction::BOTH {
            assert_ne!(faction.opponent(), faction);
            assert_eq!(faction.opponent().opponent(), faction);
        }
    }

    #[test]
    fn test_new_unit_defaults() {
        let unit = Unit::new(UnitId(7), Faction::Goblin, Pos::new(2, 3));
        assert_eq!(unit.power, 3);
        assert_eq!(unit.health, 200);
        assert_eq!(unit.to_string(), "Goblin #7");
    }
}
