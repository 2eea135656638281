//! Bounded shortest-path search and movement selection.
//!
//! Movement is four-directional with unit cost, so the Manhattan distance
//! heuristic is admissible and consistent: the first time the goal is
//! popped from the queue, its cost is the true shortest distance.
//!
//! All searches are read-only with respect to battle state; they maintain
//! only call-local structures and are freely repeatable.

use std::collections::{BTreeSet, HashMap, HashSet};

use crate::error::{Result, SimError};
use crate::grid::Pos;
use crate::queue::LazyQueue;

/// No bound on path cost.
pub const UNBOUNDED: u32 = u32::MAX;

/// Read-only view of which cells can be entered: not a wall, not occupied
/// by a living unit.
#[derive(Debug, Clone, Copy)]
pub struct OpenGrid<'a> {
    walls: &'a HashSet<Pos>,
    occupied: &'a HashSet<Pos>,
}

impl<'a> OpenGrid<'a> {
    /// Create a view over the given wall and occupancy sets.
    #[must_use]
    pub const fn new(walls: &'a HashSet<Pos>, occupied: &'a HashSet<Pos>) -> Self {
        Self { walls, occupied }
    }

    /// Whether a cell is open.
    #[must_use]
    pub fn is_open(&self, pos: Pos) -> bool {
        !self.walls.contains(&pos) && !self.occupied.contains(&pos)
    }

    /// The open cardinal neighbors of a cell, in reading order.
    pub fn open_neighbors(&self, pos: Pos) -> impl Iterator<Item = Pos> + '_ {
        pos.neighbors().into_iter().filter(|n| self.is_open(*n))
    }
}

/// Find the cost of the shortest path from `start` to `goal`.
///
/// Returns `None` if the goal is unreachable, or if the best known cost of
/// any expanded node exceeds `limit` - callers pass the cost of the best
/// candidate found so far to prune searches that cannot beat it. A limit
/// equal to the shortest cost still finds the path (the abort is strictly
/// greater-than), which is what lets equal-cost candidates reach the
/// reading-order tie-break.
///
/// # Errors
///
/// Propagates [`SimError::EmptyQueue`], which cannot occur here because the
/// queue is checked before every pop.
pub fn shortest_path_cost(
    grid: &OpenGrid<'_>,
    start: Pos,
    goal: Pos,
    limit: u32,
) -> Result<Option<u32>> {
    let mut queue = LazyQueue::new();
    queue.push(start, start.manhattan(goal));
    let mut dist: HashMap<Pos, u32> = HashMap::new();
    dist.insert(start, 0);

    while !queue.is_empty() {
        let (cost, node) = queue.pop()?;
        if node == goal {
            return Ok(Some(cost));
        }
        if cost > limit {
            return Ok(None);
        }

        let base = dist.get(&node).copied().unwrap_or(UNBOUNDED);
        for neighbor in grid.open_neighbors(node) {
            let score = base + 1;
            if score < dist.get(&neighbor).copied().unwrap_or(UNBOUNDED) {
                dist.insert(neighbor, score);
                queue.set_priority(neighbor, score + neighbor.manhattan(goal));
            }
        }
    }
    Ok(None)
}

/// Select the destination cell for a unit's movement.
///
/// `goals` holds the open cells adjacent to any enemy. The winning goal is
/// the one with the smallest exact path cost from `start`, ties broken by
/// reading order. Goals are *tried* in (Manhattan distance, reading order)
/// order purely so the bound tightens early; the pre-sort never decides
/// the winner.
///
/// Returns `None` when no goal is reachable.
///
/// # Errors
///
/// Propagates errors from [`shortest_path_cost`].
pub fn select_move_goal(
    grid: &OpenGrid<'_>,
    start: Pos,
    goals: &BTreeSet<Pos>,
) -> Result<Option<Pos>> {
    if goals.is_empty() {
        return Ok(None);
    }
    if goals.len() == 1 {
        let goal = *goals.iter().next().ok_or_else(|| {
            SimError::InvalidState("goal set emptied during selection".into())
        })?;
        let cost = shortest_path_cost(grid, start, goal, UNBOUNDED)?;
        return Ok(cost.map(|_| goal));
    }

    let mut ordered: Vec<Pos> = goals.iter().copied().collect();
    ordered.sort_unstable_by_key(|goal| (start.manhattan(*goal), *goal));

    let mut best: Option<(u32, Pos)> = None;
    for goal in ordered {
        let limit = best.map_or(UNBOUNDED, |(cost, _)| cost);
        if let Some(cost) = shortest_path_cost(grid, start, goal, limit)? {
            let improves = match best {
                None => true,
                Some((best_cost, best_goal)) => {
                    cost < best_cost || (cost == best_cost && goal < best_goal)
                }
            };
            if improves {
                best = Some((cost, goal));
            }
        }
    }
    Ok(best.map(|(_, goal)| goal))
}

/// Select the single step a unit takes towards its chosen destination.
///
/// Every open neighbor of `start` is scored by its shortest path cost to
/// `goal` (bounded by the best neighbor so far); the winner is the minimum
/// cost, ties broken by reading order.
///
/// # Errors
///
/// Returns [`SimError::InvalidState`] if no neighbor reaches the goal.
/// Callers only pass destinations already proven reachable, so the path's
/// first step must be among the neighbors.
pub fn select_step(grid: &OpenGrid<'_>, start: Pos, goal: Pos) -> Result<Pos> {
    let mut best: Option<(u32, Pos)> = None;
    for neighbor in grid.open_neighbors(start) {
        let limit = best.map_or(UNBOUNDED, |(cost, _)| cost);
        if let Some(cost) = shortest_path_cost(grid, neighbor, goal, limit)? {
            let improves = match best {
                None => true,
                Some((best_cost, best_step)) => {
                    cost < best_cost || (cost == best_cost && neighbor < best_step)
                }
            };
            if improves {
                best = Some((cost, neighbor));
            }
        }
    }
    best.map(|(_, step)| step).ok_or_else(|| {
        SimError::InvalidState(format!("no step from {start} towards {goal}"))
    })
}
