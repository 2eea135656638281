//! # Skirmish Test Utilities
//!
//! Shared testing utilities for all crates:
//! - Canonical battle scenarios with known outcomes
//! - Determinism test harness

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod determinism;
pub mod fixtures;

/// Re-export proptest for convenience.
pub use proptest;
