//! # Skirmish Core
//!
//! Deterministic grid combat simulation core.
//!
//! This crate contains **only** deterministic logic:
//! - No rendering (the ASCII dump in [`battle::Battle::render`] is a
//!   diagnostic, not a frontend)
//! - No IO
//! - No system randomness
//!
//! Given the same battlefield text, every run produces identical results.
//! This enables replayable battles, reliable calibration searches, and
//! determinism testing.
//!
//! ## Crate Structure
//!
//! - [`grid`] - positions, reading order, terrain parsing
//! - [`queue`] - lazy-deletion priority queue
//! - [`pathfinding`] - bounded A* search and movement selection
//! - [`units`] - faction and unit definitions
//! - [`battle`] - battle state, rosters, snapshot/reset
//! - [`combat`] - per-unit move and attack resolution
//! - [`simulation`] - round engine and battle runner
//! - [`calibration`] - minimal-power search

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic)]

pub mod battle;
pub mod calibration;
pub mod combat;
pub mod error;
pub mod grid;
pub mod pathfinding;
pub mod queue;
pub mod simulation;
pub mod units;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::battle::Battle;
    pub use crate::calibration::{find_minimum_power, Calibration};
    pub use crate::error::{Result, SimError};
    pub use crate::grid::{Pos, Terrain};
    pub use crate::simulation::{run_battle, run_scenario, RunMode};
    pub use crate::units::{Faction, Unit, UnitId};
}
