//! Grid positions, reading order, and terrain parsing.
//!
//! Every tie-break in the simulation falls back to *reading order*:
//! ascending by row, then by column. [`Pos`] derives `Ord` with the row
//! field first so the derived ordering *is* reading order, and everything
//! downstream (turn sequencing, target selection, step selection) leans on
//! that.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::units::Faction;

/// A cell position on the battlefield.
///
/// Ordering is lexicographic on (row, col), i.e. reading order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Pos {
    /// Row index (line number in the parsed map).
    pub row: i32,
    /// Column index (character offset in the parsed map).
    pub col: i32,
}

impl Pos {
    /// Create a position from row and column indices.
    #[must_use]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub fn manhattan(self, other: Pos) -> u32 {
        self.row.abs_diff(other.row) + self.col.abs_diff(other.col)
    }

    /// The four cardinal neighbors, enumerated in reading order.
    #[must_use]
    pub const fn neighbors(self) -> [Pos; 4] {
        [
            Pos::new(self.row - 1, self.col),
            Pos::new(self.row, self.col - 1),
            Pos::new(self.row, self.col + 1),
            Pos::new(self.row + 1, self.col),
        ]
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Static battlefield layout: the wall cells, fixed after parsing.
#[derive(Debug, Clone, Default)]
pub struct Terrain {
    walls: HashSet<Pos>,
    rows: i32,
    cols: i32,
}

impl Terrain {
    /// Whether the given cell is a wall.
    #[must_use]
    pub fn is_wall(&self, pos: Pos) -> bool {
        self.walls.contains(&pos)
    }

    /// The wall cell set.
    #[must_use]
    pub fn walls(&self) -> &HashSet<Pos> {
        &self.walls
    }

    /// Number of rows in the parsed map.
    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    /// Number of columns in the widest parsed line.
    #[must_use]
    pub const fn cols(&self) -> i32 {
        self.cols
    }
}

/// Parse a battlefield from text.
///
/// `#` is a wall, `E` and `G` are unit markers (their cells are open floor
/// once the unit is placed), and every other character is treated as open
/// floor. Stray characters are ignored, never an error.
///
/// Units are returned in reading order of their starting positions, which
/// also fixes their identity assignment.
#[must_use]
pub fn parse_map(input: &str) -> (Terrain, Vec<(Faction, Pos)>) {
    let mut terrain = Terrain::default();
    let mut units = Vec::new();
    for (row, line) in input.lines().enumerate() {
        #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
        let row = row as i32;
        let mut cols = 0;
        for (col, ch) in line.trim_end().chars().enumerate() {
            #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
            let pos = Pos::new(row, col as i32);
            match ch {
                '#' => {
                    terrain.walls.insert(pos);
                }
                'E' => units.push((Faction::Elf, pos)),
                'G' => units.push((Faction::Goblin, pos)),
                _ => {}
            }
            cols = pos.col + 1;
        }
        terrain.cols = terrain.cols.max(cols);
        terrain.rows = row + 1;
    }
    (terrain, units)
}
