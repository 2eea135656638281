//! Determinism testing utilities.
//!
//! The simulation must be fully deterministic: given identical map text,
//! every run produces identical results. Sources of non-determinism this
//! harness guards against:
//!
//! - **HashMap iteration order**: Rust's default hasher is randomized.
//!   The core iterates rosters in sorted order (`BTreeMap`) and breaks
//!   every tie explicitly by reading order; hash sets are only ever used
//!   for membership queries.
//!
//! - **State leaks between runs**: calibration attempts must be isolated
//!   through snapshot restore, never by reusing mutated state.

use skirmish_core::error::Result;
use skirmish_core::simulation::run_scenario;

/// Result of a determinism test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeterminismResult {
    /// The (baseline, calibrated) score pair from each run.
    pub outcomes: Vec<(u64, u64)>,
}

impl DeterminismResult {
    /// Whether all runs produced identical results.
    #[must_use]
    pub fn is_deterministic(&self) -> bool {
        self.outcomes.windows(2).all(|w| w[0] == w[1])
    }

    /// Assert that all runs matched, with a detailed error message.
    ///
    /// # Panics
    ///
    /// Panics if the runs produced different outcomes.
    pub fn assert_deterministic(&self) {
        assert!(
            self.is_deterministic(),
            "Simulation is non-deterministic!\n\
             Runs: {}\n\
             All outcomes: {:?}",
            self.outcomes.len(),
            self.outcomes,
        );
    }
}

/// Run the full scenario `runs` times on fresh state and collect the
/// outcome of each run.
///
/// # Errors
///
/// Propagates the first simulation error encountered.
pub fn verify_scenario(map: &str, runs: usize) -> Result<DeterminismResult> {
    let mut outcomes = Vec::with_capacity(runs);
    for _ in 0..runs {
        outcomes.push(run_scenario(map)?);
    }
    Ok(DeterminismResult { outcomes })
}
