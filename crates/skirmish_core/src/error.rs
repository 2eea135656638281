//! Error types for the battle simulation.

use thiserror::Error;

/// Result type alias using [`SimError`].
pub type Result<T> = std::result::Result<T, SimError>;

/// Top-level error type for all simulation errors.
///
/// Note that an unreachable path goal is *not* an error: the pathfinding
/// functions report it as a `None` value and callers branch on it.
#[derive(Debug, Error)]
pub enum SimError {
    /// A priority queue was popped while the caller still expected live
    /// entries. This means graph exploration was exhausted without
    /// resolution and indicates a programming error, not a bad map.
    #[error("cannot pop from an empty priority queue")]
    EmptyQueue,

    /// The battle state violated an internal invariant.
    #[error("invalid battle state: {0}")]
    InvalidState(String),

    /// The calibration search hit its defensive iteration cap without
    /// finding a flawless victory.
    #[error("no calibration found below attack power {cap}")]
    CalibrationFailed {
        /// The power value at which the search gave up.
        cap: i32,
    },
}
